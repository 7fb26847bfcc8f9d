use crate::config::ColumnConfig;

use super::error::PipelineError;
use super::model::RawTable;

/// Column positions of a worksheet, resolved against [`ColumnConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub year: usize,
    pub position: usize,
    pub latitude: usize,
    pub longitude: usize,
    pub eligibility: Option<usize>,
    pub device_count: Option<usize>,
}

impl Schema {
    /// Locate every column the dashboard reads.
    ///
    /// Fails on the first required column that is missing, so a renamed
    /// header surfaces as `missing expected column: <name>` rather than as a
    /// confusing error later on.
    pub fn resolve(raw: &RawTable, columns: &ColumnConfig) -> Result<Self, PipelineError> {
        let find = |name: &str| raw.headers.iter().position(|h| h == name);
        let require =
            |name: &str| find(name).ok_or_else(|| PipelineError::MissingColumn(name.to_string()));

        Ok(Schema {
            year: require(&columns.year)?,
            position: require(&columns.position)?,
            latitude: require(&columns.latitude)?,
            longitude: require(&columns.longitude)?,
            eligibility: find(&columns.eligibility),
            device_count: find(&columns.device_count),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    #[test]
    fn resolves_all_columns() {
        let raw = table(&["姓名", "年度", "補助資格", "裝置位置", "裝置數量", "緯度", "經度"]);
        let schema = Schema::resolve(&raw, &ColumnConfig::default()).unwrap();
        assert_eq!(
            schema,
            Schema {
                year: 1,
                position: 3,
                latitude: 5,
                longitude: 6,
                eligibility: Some(2),
                device_count: Some(4),
            }
        );
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let raw = table(&["年度", "裝置位置", "緯度", "經度"]);
        let schema = Schema::resolve(&raw, &ColumnConfig::default()).unwrap();
        assert_eq!(schema.eligibility, None);
        assert_eq!(schema.device_count, None);
    }

    #[test]
    fn missing_required_column_is_named() {
        let raw = table(&["年度", "裝置位置", "lat", "經度"]);
        let err = Schema::resolve(&raw, &ColumnConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "missing expected column: 緯度");
    }
}
