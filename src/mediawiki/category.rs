//! Category Member Expansion
//!
//! Walks a category (and its subcategories) and collects every member page
//! in the User namespace. Sockpuppet investigations keep their suspects in
//! category trees like `Category:Suspected sockpuppets of X`, so one
//! category name stands in for the whole farm.

use std::collections::{HashSet, VecDeque};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{Session, continuation};
use crate::types::{Result, SurveyError};

const NS_USER: i32 = 2;
const NS_CATEGORY: i32 = 14;

/// List the User-namespace members of `category`, recursing into
/// subcategories. Titles keep their `User:` prefix; duplicates across
/// subcategories are kept as encountered. Parents are fully listed before
/// their children, siblings in listing order.
pub async fn user_members(
    session: &Session,
    category: &str,
    page_limit: u32,
) -> Result<Vec<String>> {
    let root = canonical_title(category);
    let limit = page_limit.to_string();

    let mut users = Vec::new();
    let mut pending = VecDeque::from([root.clone()]);
    let mut visited: HashSet<String> = HashSet::from([root]);

    while let Some(cat) = pending.pop_front() {
        debug!("Listing members of {:?}", cat);

        let mut cont: Vec<(String, String)> = Vec::new();
        loop {
            let mut params: Vec<(&str, &str)> = vec![
                ("action", "query"),
                ("list", "categorymembers"),
                ("cmtitle", &cat),
                ("cmnamespace", "2|14"),
                ("cmtype", "page|subcat"),
                ("cmprop", "title"),
                ("cmlimit", &limit),
            ];
            params.extend(cont.iter().map(|(k, v)| (k.as_str(), v.as_str())));

            let body = session.get(&params).await?;
            absorb(
                parse_members(session.host(), &body)?,
                &mut users,
                &mut pending,
                &mut visited,
            );

            cont = continuation(&body);
            if cont.is_empty() {
                break;
            }
        }
    }

    debug!("Category {:?} expanded to {} user pages", category, users.len());
    Ok(users)
}

/// Prepend the `Category:` namespace unless the caller already did.
fn canonical_title(category: &str) -> String {
    if category.starts_with("Category:") {
        category.to_string()
    } else {
        format!("Category:{}", category)
    }
}

/// Fold one page of members into the walk: user pages are collected in
/// listing order, unseen subcategories join the back of the queue. The
/// visited set keeps category cycles from looping the walk forever. Other
/// namespaces (possible when a wiki miscategorizes) are dropped.
fn absorb(
    members: Vec<CategoryMember>,
    users: &mut Vec<String>,
    pending: &mut VecDeque<String>,
    visited: &mut HashSet<String>,
) {
    for member in members {
        match member.ns {
            NS_USER => users.push(member.title),
            NS_CATEGORY => {
                if visited.insert(member.title.clone()) {
                    pending.push_back(member.title);
                }
            }
            _ => {}
        }
    }
}

fn parse_members(host: &str, body: &Value) -> Result<Vec<CategoryMember>> {
    let raw = body
        .get("query")
        .and_then(|q| q.get("categorymembers"))
        .cloned()
        .ok_or_else(|| SurveyError::bad_response(host, "missing query.categorymembers"))?;

    Ok(serde_json::from_value(raw)?)
}

// Response types

#[derive(Debug, Deserialize)]
struct CategoryMember {
    ns: i32,
    title: String,
}
