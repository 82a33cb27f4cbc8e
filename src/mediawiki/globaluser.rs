//! Global User Info Lookup
//!
//! Queries `meta=globaluserinfo` (CentralAuth) to find every wiki on which
//! a global account has ever edited. This is what turns one username into a
//! set of wikis worth surveying.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::Session;
use crate::types::{Result, SurveyError};

/// A global account as reported by CentralAuth.
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalUserInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub home: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub registration: Option<DateTime<Utc>>,
    /// Set when no global account exists under the queried name.
    #[serde(default)]
    pub missing: bool,
    /// Per-wiki local accounts attached to the global account.
    #[serde(default)]
    pub merged: Vec<WikiAccount>,
}

/// One local account attached to a global account.
#[derive(Debug, Clone, Deserialize)]
pub struct WikiAccount {
    pub wiki: String,
    /// Origin URL of the wiki, e.g. `https://de.wikipedia.org`.
    pub url: String,
    #[serde(default)]
    pub editcount: u64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub method: Option<String>,
}

/// Look up the global account for `username`.
///
/// A name with no global account is fatal: surveying a non-existent user
/// would silently produce an empty report.
pub async fn lookup(session: &Session, username: &str) -> Result<GlobalUserInfo> {
    debug!("Fetching global user info for {:?}", username);

    let body = session
        .get(&[
            ("action", "query"),
            ("meta", "globaluserinfo"),
            ("guiuser", username),
            ("guiprop", "merged"),
        ])
        .await?;

    let info = parse_response(session.host(), username, &body)?;
    debug!("{:?} has {} attached accounts", username, info.merged.len());

    Ok(info)
}

fn parse_response(host: &str, username: &str, body: &Value) -> Result<GlobalUserInfo> {
    let raw = body
        .get("query")
        .and_then(|q| q.get("globaluserinfo"))
        .cloned()
        .ok_or_else(|| SurveyError::bad_response(host, "missing query.globaluserinfo"))?;

    let info: GlobalUserInfo = serde_json::from_value(raw)?;

    if info.missing {
        return Err(SurveyError::UnknownUser(username.to_string()));
    }

    Ok(info)
}
