use std::path::PathBuf;
use std::time::Duration;

use crate::config::SourceConfig;

use super::error::PipelineError;
use super::loader::{load_csv_file, parse_csv};
use super::model::RawTable;

/// Something that can hand back the worksheet as a [`RawTable`].
///
/// A source is built for one load and dropped afterwards; nothing is cached
/// between loads.
pub trait DataSource {
    /// Human-readable origin, for logs and the status bar.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<RawTable, PipelineError>;
}

// ---------------------------------------------------------------------------
// Google Sheets CSV export
// ---------------------------------------------------------------------------

/// One worksheet of a link-shared Google spreadsheet.
pub struct SheetSource {
    spreadsheet_id: String,
    worksheet: String,
    agent: ureq::Agent,
}

impl SheetSource {
    pub fn new(config: &SourceConfig) -> Result<Self, PipelineError> {
        let spreadsheet_id = spreadsheet_id(&config.url)
            .ok_or_else(|| PipelineError::InvalidSourceUrl(config.url.clone()))?;

        let mut builder = ureq::AgentBuilder::new();
        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        }

        Ok(Self {
            spreadsheet_id: spreadsheet_id.to_string(),
            worksheet: config.worksheet.clone(),
            agent: builder.build(),
        })
    }

    /// gviz endpoint that serves a single worksheet as CSV.
    pub fn export_url(&self) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/gviz/tq",
            self.spreadsheet_id
        )
    }

    /// The export request. `headers=1` makes gviz treat exactly the first
    /// row as the header.
    pub fn request(&self) -> ureq::Request {
        self.agent
            .get(&self.export_url())
            .query("tqx", "out:csv")
            .query("headers", "1")
            .query("sheet", &self.worksheet)
    }
}

impl DataSource for SheetSource {
    fn describe(&self) -> String {
        format!("sheet {} / {}", self.spreadsheet_id, self.worksheet)
    }

    fn fetch(&self) -> Result<RawTable, PipelineError> {
        let request = self.request();
        let url = request.url().to_string();
        log::debug!("GET {url}");

        let response = request
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(status, _) => PipelineError::Http {
                    status,
                    worksheet: self.worksheet.clone(),
                },
                ureq::Error::Transport(t) => PipelineError::Transport {
                    url: url.clone(),
                    message: t.to_string(),
                },
            })?;

        parse_csv(response.into_reader())
    }
}

/// Extract `<id>` from `https://docs.google.com/spreadsheets/d/<id>/...`.
pub fn spreadsheet_id(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("/spreadsheets/d/")?;
    let id = rest
        .split(|c: char| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or("");
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

// ---------------------------------------------------------------------------
// Local CSV export
// ---------------------------------------------------------------------------

/// A worksheet previously downloaded as CSV.
pub struct CsvFileSource {
    pub path: PathBuf,
}

impl DataSource for CsvFileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn fetch(&self) -> Result<RawTable, PipelineError> {
        load_csv_file(&self.path)
    }
}
