//! Console reporter: plain lines or one JSON object per cycle.

use std::collections::BTreeMap;
use std::io::{self, Stdout, Write};

use serde_json::json;

use crate::report::Reporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// `<domain> has <N>% availability percentage`, one line per domain.
    #[default]
    Text,
    /// `{"cycle":N,"availability":{...}}`, one line per cycle.
    Json,
}

pub struct ConsoleReporter<W> {
    writer: W,
    format: ReportFormat,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout(format: ReportFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(writer: W, format: ReportFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Reporter for ConsoleReporter<W> {
    fn report(&mut self, cycle: u64, availability: &BTreeMap<String, u8>) -> io::Result<()> {
        match self.format {
            ReportFormat::Text => {
                for (domain, percent) in availability {
                    writeln!(self.writer, "{} has {}% availability percentage", domain, percent)?;
                }
            }
            ReportFormat::Json => {
                let line = json!({ "cycle": cycle, "availability": availability });
                serde_json::to_writer(&mut self.writer, &line)?;
                writeln!(self.writer)?;
            }
        }
        self.writer.flush()
    }
}
