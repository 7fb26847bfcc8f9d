use super::model::{CellValue, Dataset, RawTable, Record};
use super::schema::Schema;

/// Parse a coordinate cell. Anything that is not a finite number is
/// treated as missing.
pub fn to_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Type the worksheet rows and drop those without both coordinates.
pub fn coerce(raw: &RawTable, schema: &Schema) -> Dataset {
    let mut records = Vec::with_capacity(raw.rows.len());

    for row in 0..raw.rows.len() {
        let (Some(latitude), Some(longitude)) = (
            to_coordinate(raw.cell(row, schema.latitude)),
            to_coordinate(raw.cell(row, schema.longitude)),
        ) else {
            continue;
        };

        let cells: Vec<CellValue> = (0..raw.headers.len())
            .map(|col| CellValue::guess(raw.cell(row, col)))
            .collect();

        records.push(Record {
            year: cells[schema.year].clone(),
            position: cells[schema.position].clone(),
            eligibility: schema.eligibility.map(|col| cells[col].clone()),
            device_count: schema.device_count.and_then(|col| cells[col].as_f64()),
            latitude,
            longitude,
            cells,
        });
    }

    let dataset = Dataset {
        columns: raw.headers.clone(),
        records,
        source_rows: raw.rows.len(),
        has_eligibility: schema.eligibility.is_some(),
        has_device_count: schema.device_count.is_some(),
    };

    if dataset.dropped_rows() > 0 {
        log::warn!(
            "Dropped {} of {} rows without valid coordinates",
            dataset.dropped_rows(),
            dataset.source_rows
        );
    }
    dataset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnConfig;
    use crate::data::loader::parse_csv;

    #[test]
    fn coordinates_parse_leniently() {
        assert_eq!(to_coordinate(" 22.758 "), Some(22.758));
        assert_eq!(to_coordinate("121"), Some(121.0));
        assert_eq!(to_coordinate("N/A"), None);
        assert_eq!(to_coordinate(""), None);
        assert_eq!(to_coordinate("NaN"), None);
        assert_eq!(to_coordinate("inf"), None);
    }

    #[test]
    fn rows_without_coordinates_are_dropped() {
        let raw = parse_csv(
            "年度,裝置位置,緯度,經度\n\
             113,客廳,22.75,121.15\n\
             113,臥室,N/A,121.10\n\
             114,廚房,22.80,121.20\n\
             114,客廳,22.81,\n"
                .as_bytes(),
        )
        .unwrap();
        let schema = Schema::resolve(&raw, &ColumnConfig::default()).unwrap();
        let ds = coerce(&raw, &schema);

        assert_eq!(ds.source_rows, 4);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.dropped_rows(), 2);
        assert!(ds
            .records
            .iter()
            .all(|r| r.latitude.is_finite() && r.longitude.is_finite()));
        assert_eq!(ds.records[1].position, CellValue::Text("廚房".into()));
        assert!(!ds.has_eligibility);
        assert!(ds.records.iter().all(|r| r.eligibility.is_none()));
    }

    #[test]
    fn device_count_is_lenient() {
        let raw = parse_csv(
            "年度,裝置位置,裝置數量,緯度,經度\n\
             113,客廳,2,22.75,121.15\n\
             113,臥室,兩顆,22.76,121.10\n"
                .as_bytes(),
        )
        .unwrap();
        let schema = Schema::resolve(&raw, &ColumnConfig::default()).unwrap();
        let ds = coerce(&raw, &schema);
        assert_eq!(ds.records[0].device_count, Some(2.0));
        assert_eq!(ds.records[1].device_count, None);
        assert!(ds.has_device_count);
    }
}
