//! Survey Pipeline
//!
//! End-to-end orchestration of one run: resolve the user list, discover the
//! wiki set, then survey each wiki in turn and append its section to the
//! report. Strictly sequential; the first failure of any step aborts the
//! whole run.

pub mod users;
pub mod wikis;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::{Config, SurveyConfig};
use crate::mediawiki::Session;
use crate::mediawiki::surveyor::{ApiSurveyor, ContributionSurveyor, SurveyorOptions};
use crate::report::{ReportWriter, rewrite_links, wiki_prefix};
use crate::types::Result;

/// What a finished run did, for the end-of-run summary.
pub struct RunSummary {
    pub users: usize,
    pub wikis: usize,
    pub fragments: usize,
    pub output: PathBuf,
}

/// One survey run over a resolved configuration.
pub struct SurveyPipeline<'a> {
    config: &'a Config,
}

impl<'a> SurveyPipeline<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub async fn run(&self, username: &str, category: Option<&str>) -> Result<RunSummary> {
        info!("Starting survey for {:?}", username);

        // user resolution and wiki discovery both go through the home wiki
        let home = Session::open(&self.config.home_wiki, &self.config.api)?;
        let users = users::resolve(&home, username, category, self.config.api.page_limit).await?;
        let wikis = wikis::discover(&home, &users, &self.config.home_wiki).await?;

        let options = surveyor_options(&self.config.survey);
        let mut writer = ReportWriter::create(&self.config.output)?;
        let mut fragments = 0;

        for host in &wikis {
            let session = Session::open(host, &self.config.api)?;
            let surveyor = ApiSurveyor::new(session, options, self.config.api.page_limit);
            fragments +=
                survey_wiki(&mut writer, &surveyor, host, &users, self.config.survey.namespace)
                    .await?;
        }

        writer.finish()?;
        info!("Survey finished: {} fragment(s) written", fragments);

        Ok(RunSummary {
            users: users.len(),
            wikis: wikis.len(),
            fragments,
            output: self.config.output.clone(),
        })
    }
}

/// The pipeline always comingles users and surveys creations only; the three
/// remaining switches come from configuration.
fn surveyor_options(survey: &SurveyConfig) -> SurveyorOptions {
    SurveyorOptions {
        top_only: survey.top_only,
        skip_minor: survey.skip_minor,
        oldest_first: survey.oldest_first,
        ..SurveyorOptions::default()
    }
}

/// Survey one wiki and append its section, links rewritten for pasting
/// outside that wiki. Returns the fragment count.
async fn survey_wiki(
    writer: &mut ReportWriter,
    surveyor: &dyn ContributionSurveyor,
    host: &str,
    users: &[String],
    namespace: i32,
) -> Result<usize> {
    debug!("Running {} surveyor against {}", surveyor.name(), host);
    let fragments = surveyor.survey(users, namespace).await?;

    let prefix = wiki_prefix(host);
    let rewritten: Vec<String> = fragments
        .iter()
        .map(|fragment| rewrite_links(fragment, prefix))
        .collect();

    writer.write_section(host, &rewritten)?;
    Ok(rewritten.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SurveyError;
    use async_trait::async_trait;
    use std::fs;

    struct StubSurveyor {
        fragments: Vec<String>,
        fail: bool,
    }

    impl StubSurveyor {
        fn with_fragments(fragments: &[&str]) -> Self {
            Self {
                fragments: fragments.iter().map(|s| s.to_string()).collect(),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fragments: Vec::new(),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl ContributionSurveyor for StubSurveyor {
        async fn survey(&self, _users: &[String], _namespace: i32) -> Result<Vec<String>> {
            if self.fail {
                return Err(SurveyError::bad_response("stub.example.org", "stub failure"));
            }
            Ok(self.fragments.clone())
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    #[test]
    fn test_config_switches_never_disable_comingle_or_new_only() {
        let survey = SurveyConfig {
            namespace: 0,
            top_only: true,
            skip_minor: true,
            oldest_first: true,
        };

        let options = surveyor_options(&survey);
        assert!(options.comingle);
        assert!(options.new_only);
        assert!(options.top_only);
        assert!(options.skip_minor);
        assert!(options.oldest_first);
    }

    #[tokio::test]
    async fn test_survey_wiki_rewrites_and_writes_a_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spam.txt");
        let mut writer = ReportWriter::create(&path).unwrap();

        let surveyor = StubSurveyor::with_fragments(&[
            "* [[:Acme Widgets]] ([[Special:Diff/1|+10]]) 2020-05-17",
        ]);
        let users = vec!["Alice".to_string()];

        let count = survey_wiki(&mut writer, &surveyor, "de.wikipedia.org", &users, 0)
            .await
            .unwrap();
        writer.finish().unwrap();

        assert_eq!(count, 1);
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("==de.wikipedia.org==\n\n"));
        assert!(contents.contains("* [[:de:Acme Widgets]] ([[:de:Special:Diff/1|+10]]) 2020-05-17"));
    }

    #[tokio::test]
    async fn test_wikidata_sections_use_the_d_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spam.txt");
        let mut writer = ReportWriter::create(&path).unwrap();

        let surveyor = StubSurveyor::with_fragments(&["* [[:Q42]] ([[Special:Diff/2|+5]]) 2021-01-01"]);
        let users = vec!["Alice".to_string()];

        survey_wiki(&mut writer, &surveyor, "www.wikidata.org", &users, 0)
            .await
            .unwrap();
        writer.finish().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("==www.wikidata.org=="));
        assert!(contents.contains("[[:d:Q42]]"));
        assert!(contents.contains("[[:d:Special:Diff/2|+5]]"));
    }

    #[tokio::test]
    async fn test_surveyor_failure_aborts_the_wiki() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spam.txt");
        let mut writer = ReportWriter::create(&path).unwrap();

        let surveyor = StubSurveyor::failing();
        let users = vec!["Alice".to_string()];

        let result = survey_wiki(&mut writer, &surveyor, "en.wikipedia.org", &users, 0).await;
        assert!(matches!(result, Err(SurveyError::BadResponse { .. })));
    }
}
