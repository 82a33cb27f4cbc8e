//! Survey Report Output
//!
//! The report is one flat wikitext file: a `==<host>==` heading per surveyed
//! wiki, each followed by that wiki's page-report fragments. Sections are
//! appended in survey order and the file is flushed once at the end of a
//! successful run; a failed run may leave a truncated file behind.

pub mod links;

pub use links::{rewrite_links, wiki_prefix};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::types::Result;

/// Buffered writer for the survey report file.
pub struct ReportWriter {
    writer: BufWriter<File>,
}

impl ReportWriter {
    /// Create (or truncate) the report file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        debug!("Writing report to {}", path.display());

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Append one wiki's section: heading, blank line, then every fragment
    /// followed by a blank line. The heading is written even when the survey
    /// found nothing, so the report shows the wiki was covered.
    pub fn write_section(&mut self, host: &str, fragments: &[String]) -> Result<()> {
        writeln!(self.writer, "=={}==", host)?;
        writeln!(self.writer)?;

        for fragment in fragments {
            writeln!(self.writer, "{}", fragment)?;
            writeln!(self.writer)?;
        }

        Ok(())
    }

    /// Flush and close the report. Dropping without calling this still
    /// closes the file, but buffered output may be lost on error paths.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
