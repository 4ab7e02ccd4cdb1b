//! Rendering of search results.
//!
//! Human output groups matches under their file name; JSON output is one
//! object per match so results can be streamed into other tools.

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use crate::cli::ResolvedOutputFormat;
use crate::search::{FileReport, MatchRecord};

#[derive(Serialize)]
struct JsonMatch<'a> {
    path: &'a Path,
    #[serde(flatten)]
    record: &'a MatchRecord,
}

pub(crate) struct Renderer {
    format: ResolvedOutputFormat,
    colour: bool,
}

impl Renderer {
    pub(crate) const fn new(format: ResolvedOutputFormat, colour: bool) -> Self {
        Self { format, colour }
    }

    /// Writes the matches of one file; files without matches print nothing.
    pub(crate) fn write_report<W: Write>(
        &self,
        out: &mut W,
        report: &FileReport,
    ) -> io::Result<()> {
        if report.matches.is_empty() {
            return Ok(());
        }
        match self.format {
            ResolvedOutputFormat::Human => self.write_human(out, report),
            ResolvedOutputFormat::Json => write_json(out, report),
        }
    }

    fn write_human<W: Write>(&self, out: &mut W, report: &FileReport) -> io::Result<()> {
        let header = report.path.display().to_string();
        if self.colour {
            writeln!(out, "{}", header.magenta())?;
        } else {
            writeln!(out, "{header}")?;
        }
        for record in &report.matches {
            let line = format!("{}:", record.line);
            if self.colour {
                writeln!(out, "{} {}", line.bold(), record.text)?;
            } else {
                writeln!(out, "{line} {}", record.text)?;
            }
        }
        Ok(())
    }
}

fn write_json<W: Write>(out: &mut W, report: &FileReport) -> io::Result<()> {
    for record in &report.matches {
        let entry = JsonMatch {
            path: &report.path,
            record,
        };
        serde_json::to_writer(&mut *out, &entry)?;
        writeln!(out)?;
    }
    Ok(())
}
