use std::fmt;

use thiserror::Error;

/// Pipeline stage a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Validate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Fetch => write!(f, "fetch"),
            Stage::Validate => write!(f, "validate"),
        }
    }
}

/// Errors raised while loading the worksheet.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The configured URL does not name a spreadsheet.
    #[error("not a Google Sheets URL: {0}")]
    InvalidSourceUrl(String),

    /// The export endpoint answered with a non-success status.
    #[error("spreadsheet export returned HTTP {status} for worksheet '{worksheet}'")]
    Http { status: u16, worksheet: String },

    /// Network-level failure (DNS, TLS, timeout, ...).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A column the dashboard depends on is not in the header row.
    #[error("missing expected column: {0}")]
    MissingColumn(String),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::MissingColumn(_) => Stage::Validate,
            _ => Stage::Fetch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_names_the_column() {
        let e = PipelineError::MissingColumn("緯度".into());
        assert_eq!(e.to_string(), "missing expected column: 緯度");
        assert_eq!(e.stage(), Stage::Validate);
    }

    #[test]
    fn http_errors_belong_to_fetch() {
        let e = PipelineError::Http {
            status: 404,
            worksheet: "test0225".into(),
        };
        assert_eq!(e.stage(), Stage::Fetch);
        assert!(e.to_string().contains("404"));
    }
}
