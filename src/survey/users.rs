//! User List Resolution
//!
//! Builds the immutable list of usernames a run will survey: the primary
//! account first, then (when a category was given) every user-namespace
//! member of that category. Page titles arrive as `User:Name` and are
//! normalized down to bare usernames.

use tracing::info;

use crate::mediawiki::{Session, category};
use crate::types::{Result, SurveyError};

/// Strip a namespace prefix: everything up to and including the first `:`.
/// Titles without a colon are already bare usernames.
pub fn normalize(title: &str) -> String {
    match title.split_once(':') {
        Some((_, name)) => name.to_string(),
        None => title.to_string(),
    }
}

/// Resolve the full user list for a run.
pub async fn resolve(
    session: &Session,
    username: &str,
    category: Option<&str>,
    page_limit: u32,
) -> Result<Vec<String>> {
    if username.trim().is_empty() {
        return Err(SurveyError::Config("username must not be empty".into()));
    }

    let mut members = Vec::new();
    if let Some(category) = category {
        members = category::user_members(session, category, page_limit).await?;
        info!("Category {:?} added {} user(s)", category, members.len());
    }

    Ok(assemble(username, members))
}

/// Primary username first, then members in listing order, every entry
/// normalized. Duplicates are kept; the contribution listing tolerates them.
fn assemble(primary: &str, members: Vec<String>) -> Vec<String> {
    let mut users = Vec::with_capacity(members.len() + 1);
    users.push(normalize(primary));
    users.extend(members.into_iter().map(|title| normalize(&title)));
    users
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    #[test]
    fn test_normalize_strips_user_prefix() {
        assert_eq!(normalize("User:Alice"), "Alice");
        assert_eq!(normalize("Benutzer:Alice"), "Alice");
    }

    #[test]
    fn test_normalize_keeps_bare_names() {
        assert_eq!(normalize("Alice"), "Alice");
    }

    #[test]
    fn test_normalize_strips_only_the_first_prefix() {
        // page titles may contain further colons past the namespace
        assert_eq!(normalize("User:Example:2020"), "Example:2020");
    }

    #[test]
    fn test_category_members_follow_the_primary() {
        let members = vec![
            "User:Sock one".to_string(),
            "User:Sock two".to_string(),
            "User:Sock one".to_string(),
        ];

        let users = assemble("Prime", members);
        // order preserved, duplicates kept
        assert_eq!(users, vec!["Prime", "Sock one", "Sock two", "Sock one"]);
    }

    #[tokio::test]
    async fn test_no_category_yields_just_the_primary() {
        let session = Session::open("en.wikipedia.org", &ApiConfig::default()).unwrap();
        let users = resolve(&session, "Alice", None, 500).await.unwrap();
        assert_eq!(users, vec!["Alice"]);
    }

    #[tokio::test]
    async fn test_primary_username_is_normalized_too() {
        let session = Session::open("en.wikipedia.org", &ApiConfig::default()).unwrap();
        let users = resolve(&session, "User:Alice", None, 500).await.unwrap();
        assert_eq!(users, vec!["Alice"]);
    }

    #[tokio::test]
    async fn test_empty_username_is_rejected() {
        let session = Session::open("en.wikipedia.org", &ApiConfig::default()).unwrap();
        let result = resolve(&session, "  ", None, 500).await;
        assert!(matches!(result, Err(SurveyError::Config(_))));
    }
}
