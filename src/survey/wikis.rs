//! Wiki Set Discovery
//!
//! Turns the user list into the set of wiki hostnames worth surveying: every
//! wiki where any of the users has at least one edit, per CentralAuth, plus
//! the home wiki unconditionally. The set only ever grows during discovery;
//! iteration order is left arbitrary.

use std::collections::HashSet;

use tracing::{debug, info};
use url::Url;

use crate::mediawiki::Session;
use crate::mediawiki::globaluser::{self, GlobalUserInfo};
use crate::types::{Result, SurveyError};

/// Discover the wiki set for `users`. One global-info lookup per user, all
/// made through the home-wiki session (CentralAuth data is global).
pub async fn discover(
    session: &Session,
    users: &[String],
    home_wiki: &str,
) -> Result<HashSet<String>> {
    let mut wikis = HashSet::from([home_wiki.to_string()]);

    for user in users {
        let info = globaluser::lookup(session, user).await?;
        collect(&info, &mut wikis)?;
        debug!("After {:?}: {} wiki(s) in the set", user, wikis.len());
    }

    info!("{} wiki(s) discovered for {} user(s)", wikis.len(), users.len());
    Ok(wikis)
}

/// Fold one user's attached accounts into the set: a wiki qualifies iff the
/// local editcount is nonzero. Hostnames come from the account URL.
fn collect(info: &GlobalUserInfo, wikis: &mut HashSet<String>) -> Result<()> {
    for account in &info.merged {
        if account.editcount == 0 {
            continue;
        }

        let url = Url::parse(&account.url).map_err(|e| {
            SurveyError::bad_response(
                &account.wiki,
                format!("unparseable account URL {:?}: {}", account.url, e),
            )
        })?;
        let host = url
            .host_str()
            .ok_or_else(|| SurveyError::bad_response(&account.wiki, "account URL has no host"))?;

        wikis.insert(host.to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::mediawiki::globaluser::WikiAccount;

    #[tokio::test]
    async fn test_home_wiki_is_seeded_before_any_lookup() {
        // an empty user list means discovery makes no lookups at all
        let session = Session::open("en.wikipedia.org", &ApiConfig::default()).unwrap();
        let wikis = discover(&session, &[], "en.wikipedia.org").await.unwrap();

        assert_eq!(wikis, HashSet::from(["en.wikipedia.org".to_string()]));
    }

    fn account(wiki: &str, url: &str, editcount: u64) -> WikiAccount {
        WikiAccount {
            wiki: wiki.to_string(),
            url: url.to_string(),
            editcount,
            timestamp: None,
            method: None,
        }
    }

    fn info_for(name: &str, accounts: Vec<WikiAccount>) -> GlobalUserInfo {
        GlobalUserInfo {
            name: name.to_string(),
            home: None,
            id: None,
            registration: None,
            missing: false,
            merged: accounts,
        }
    }

    #[test]
    fn test_zero_editcount_never_adds_a_wiki() {
        let info = info_for(
            "Alice",
            vec![
                account("dewiki", "https://de.wikipedia.org", 5),
                account("frwiki", "https://fr.wikipedia.org", 0),
            ],
        );

        let mut wikis = HashSet::from(["en.wikipedia.org".to_string()]);
        collect(&info, &mut wikis).unwrap();

        assert_eq!(wikis.len(), 2);
        assert!(wikis.contains("en.wikipedia.org"));
        assert!(wikis.contains("de.wikipedia.org"));
        assert!(!wikis.contains("fr.wikipedia.org"));
    }

    #[test]
    fn test_home_wiki_survives_rediscovery() {
        // the home wiki stays even when the user has no local account there
        let info = info_for(
            "Alice",
            vec![account("wikidatawiki", "https://www.wikidata.org", 100)],
        );

        let mut wikis = HashSet::from(["en.wikipedia.org".to_string()]);
        collect(&info, &mut wikis).unwrap();

        assert!(wikis.contains("en.wikipedia.org"));
        assert!(wikis.contains("www.wikidata.org"));
    }

    #[test]
    fn test_duplicate_wikis_collapse_in_the_set() {
        let alice = info_for("Alice", vec![account("dewiki", "https://de.wikipedia.org", 5)]);
        let bob = info_for("Bob", vec![account("dewiki", "https://de.wikipedia.org", 9)]);

        let mut wikis = HashSet::from(["en.wikipedia.org".to_string()]);
        collect(&alice, &mut wikis).unwrap();
        collect(&bob, &mut wikis).unwrap();

        assert_eq!(wikis.len(), 2);
    }

    #[test]
    fn test_malformed_account_url_is_fatal() {
        let info = info_for("Alice", vec![account("zzwiki", "not a url", 3)]);

        let mut wikis = HashSet::new();
        let err = collect(&info, &mut wikis).unwrap_err();
        assert!(matches!(err, SurveyError::BadResponse { .. }));
    }
}
