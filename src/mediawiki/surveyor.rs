//! Contribution Surveyor
//!
//! The survey step proper: given a list of usernames and a namespace, produce
//! formatted wikitext page-report fragments for their contributions on one
//! wiki. The trait keeps the orchestrator independent of where the fragments
//! come from; `ApiSurveyor` is the `list=usercontribs` implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{Session, continuation};
use crate::types::{Result, SurveyError};

/// Produces wikitext report fragments for a set of users on one wiki.
#[async_trait]
pub trait ContributionSurveyor {
    /// Survey `users` in `namespace`, returning one fragment per reported
    /// page. Fragments are plain wikitext lines without trailing newline.
    async fn survey(&self, users: &[String], namespace: i32) -> Result<Vec<String>>;

    /// Implementation name, for logging.
    fn name(&self) -> &str;
}

/// Survey tuning switches.
///
/// The defaults are the ones the survey pipeline always runs with: one
/// comingled listing across all users, page creations only. The remaining
/// three are exposed through configuration and stay off unless asked for.
#[derive(Debug, Clone, Copy)]
pub struct SurveyorOptions {
    /// Merge all users into one chronological listing instead of one
    /// listing per user.
    pub comingle: bool,
    /// Only page creations (`ucshow=new`).
    pub new_only: bool,
    /// Only edits that are still the page's latest revision (`ucshow=top`).
    pub top_only: bool,
    /// Drop edits marked minor (`ucshow=!minor`).
    pub skip_minor: bool,
    /// Oldest edits first (`ucdir=newer`).
    pub oldest_first: bool,
}

impl Default for SurveyorOptions {
    fn default() -> Self {
        Self {
            comingle: true,
            new_only: true,
            top_only: false,
            skip_minor: false,
            oldest_first: false,
        }
    }
}

impl SurveyorOptions {
    /// The combined `ucshow` value, or `None` when no show filter applies.
    fn show_value(&self) -> Option<String> {
        let mut parts = Vec::new();
        if self.new_only {
            parts.push("new");
        }
        if self.top_only {
            parts.push("top");
        }
        if self.skip_minor {
            parts.push("!minor");
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("|"))
        }
    }
}

/// `list=usercontribs`-backed surveyor for one wiki.
pub struct ApiSurveyor {
    session: Session,
    options: SurveyorOptions,
    page_limit: u32,
}

impl ApiSurveyor {
    pub fn new(session: Session, options: SurveyorOptions, page_limit: u32) -> Self {
        Self {
            session,
            options,
            page_limit,
        }
    }

    /// Fetch all matching contributions for `users`, following continuation
    /// until the listing is exhausted.
    async fn fetch(&self, users: &[String], namespace: i32) -> Result<Vec<Contribution>> {
        let ucuser = users.join("|");
        let ns = namespace.to_string();
        let limit = self.page_limit.to_string();
        let show = self.options.show_value();

        let mut contributions = Vec::new();
        let mut cont: Vec<(String, String)> = Vec::new();

        loop {
            let mut params: Vec<(&str, &str)> = vec![
                ("action", "query"),
                ("list", "usercontribs"),
                ("ucuser", &ucuser),
                ("ucnamespace", &ns),
                ("ucprop", "ids|title|timestamp|sizediff|flags"),
                ("uclimit", &limit),
            ];
            if let Some(show) = show.as_deref() {
                params.push(("ucshow", show));
            }
            if self.options.oldest_first {
                params.push(("ucdir", "newer"));
            }
            params.extend(cont.iter().map(|(k, v)| (k.as_str(), v.as_str())));

            let body = self.session.get(&params).await?;
            contributions.extend(parse_contributions(self.session.host(), &body)?);

            cont = continuation(&body);
            if cont.is_empty() {
                break;
            }
        }

        debug!(
            "{} contributions on {} for {} user(s)",
            contributions.len(),
            self.session.host(),
            users.len()
        );

        Ok(contributions)
    }
}

#[async_trait]
impl ContributionSurveyor for ApiSurveyor {
    async fn survey(&self, users: &[String], namespace: i32) -> Result<Vec<String>> {
        info!(
            "Surveying {} user(s) on {} (namespace {})",
            users.len(),
            self.session.host(),
            namespace
        );

        if self.options.comingle {
            let contributions = self.fetch(users, namespace).await?;
            // attribution is only informative when the listing mixes users
            let attribute = users.len() > 1;
            return Ok(contributions
                .iter()
                .map(|c| format_fragment(c, attribute))
                .collect());
        }

        let mut fragments = Vec::new();
        for user in users {
            let contributions = self.fetch(std::slice::from_ref(user), namespace).await?;
            if contributions.is_empty() {
                continue;
            }
            fragments.extend(user_group(user, &contributions));
        }
        Ok(fragments)
    }

    fn name(&self) -> &str {
        "usercontribs"
    }
}

// =============================================================================
// Fragment Formatting
// =============================================================================

/// One page-report line:
/// `* [[:Title]] ([[Special:Diff/123|+456]]) 2020-05-17`, with ` by <user>`
/// appended when `attribute` is set.
fn format_fragment(contribution: &Contribution, attribute: bool) -> String {
    let mut line = format!(
        "* [[:{}]] ([[Special:Diff/{}|{}]]) {}",
        contribution.title,
        contribution.revid,
        format_sizediff(contribution.sizediff),
        contribution.timestamp.format("%Y-%m-%d")
    );
    if attribute {
        line.push_str(&format!(" by {}", contribution.user));
    }
    line
}

/// Non-negative deltas carry an explicit `+`; negative ones already carry
/// their sign.
fn format_sizediff(diff: i64) -> String {
    if diff >= 0 {
        format!("+{}", diff)
    } else {
        diff.to_string()
    }
}

/// Per-user block for non-comingled surveys: a `; <user>` definition line
/// followed by that user's fragments.
fn user_group(user: &str, contributions: &[Contribution]) -> Vec<String> {
    let mut fragments = Vec::with_capacity(contributions.len() + 1);
    fragments.push(format!("; {}", user));
    fragments.extend(contributions.iter().map(|c| format_fragment(c, false)));
    fragments
}

fn parse_contributions(host: &str, body: &Value) -> Result<Vec<Contribution>> {
    let raw = body
        .get("query")
        .and_then(|q| q.get("usercontribs"))
        .cloned()
        .ok_or_else(|| SurveyError::bad_response(host, "missing query.usercontribs"))?;

    Ok(serde_json::from_value(raw)?)
}

// Response types

#[derive(Debug, Clone, Deserialize)]
struct Contribution {
    user: String,
    title: String,
    revid: u64,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    sizediff: i64,
}
