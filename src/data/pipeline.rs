use crate::config::ColumnConfig;

use super::coerce::coerce;
use super::error::PipelineError;
use super::model::Dataset;
use super::schema::Schema;
use super::source::DataSource;

/// Guidance shown above the error detail when a load fails.
pub const LOAD_FAILURE_GUIDANCE: &str =
    "連線或解析失敗。請確認：\n1. 網址是否正確\n2. 欄位名稱(年度/緯度/經度)是否與試算表一致";

/// Fetch, validate and type one worksheet.
pub fn load(source: &dyn DataSource, columns: &ColumnConfig) -> Result<Dataset, PipelineError> {
    let origin = source.describe();

    let raw = source.fetch()?;
    log::info!("Fetched {} rows x {} columns from {origin}", raw.rows.len(), raw.headers.len());

    let schema = Schema::resolve(&raw, columns)?;
    let dataset = coerce(&raw, &schema);
    log::info!("Kept {} rows with valid coordinates", dataset.len());

    Ok(dataset)
}

/// The single message shown for a failed load.
pub fn failure_message(err: &PipelineError) -> String {
    format!("{LOAD_FAILURE_GUIDANCE}\n錯誤訊息: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::Stage;
    use crate::data::loader::parse_csv;
    use crate::data::model::RawTable;

    struct Fixed(&'static str);

    impl DataSource for Fixed {
        fn describe(&self) -> String {
            "fixture".into()
        }

        fn fetch(&self) -> Result<RawTable, PipelineError> {
            parse_csv(self.0.as_bytes())
        }
    }

    struct Unreachable;

    impl DataSource for Unreachable {
        fn describe(&self) -> String {
            "unreachable".into()
        }

        fn fetch(&self) -> Result<RawTable, PipelineError> {
            Err(PipelineError::Transport {
                url: "https://docs.google.com".into(),
                message: "connection refused".into(),
            })
        }
    }

    #[test]
    fn loads_valid_worksheet() {
        let source = Fixed("年度,裝置位置,緯度,經度\n113,客廳,22.7,121.1\n113,臥室,,121.2\n");
        let ds = load(&source, &ColumnConfig::default()).unwrap();
        assert_eq!(ds.source_rows, 2);
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn fetch_failure_is_attributed_to_fetch() {
        let err = load(&Unreachable, &ColumnConfig::default()).unwrap_err();
        assert_eq!(err.stage(), Stage::Fetch);

        let message = failure_message(&err);
        assert!(message.starts_with(LOAD_FAILURE_GUIDANCE));
        assert!(message.contains("connection refused"));
    }

    #[test]
    fn renamed_header_fails_validation() {
        let source = Fixed("年度,裝置位置,latitude,經度\n113,客廳,22.7,121.1\n");
        let err = load(&source, &ColumnConfig::default()).unwrap_err();
        assert_eq!(err.stage(), Stage::Validate);
        assert!(failure_message(&err).contains("missing expected column: 緯度"));
    }
}
