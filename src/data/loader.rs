use std::io::Read;
use std::path::Path;

use super::error::PipelineError;
use super::model::RawTable;

// ---------------------------------------------------------------------------
// CSV parsing shared by every data source
// ---------------------------------------------------------------------------

/// Parse a worksheet CSV export: header row, then data rows.
///
/// Rows may be ragged (Sheets drops trailing empty cells in some exports);
/// short rows are read as if padded with empty cells.
pub fn parse_csv<R: Read>(reader: R) -> Result<RawTable, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(RawTable { headers, rows })
}

/// Read a CSV export saved on disk.
pub fn load_csv_file(path: &Path) -> Result<RawTable, PipelineError> {
    let file = std::fs::File::open(path)?;
    parse_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_headers_and_rows() {
        let text = "年度, 緯度 ,經度\n113,22.75,121.15\n114,,\n";
        let raw = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(raw.headers, vec!["年度", "緯度", "經度"]);
        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.cell(0, 1), "22.75");
        assert_eq!(raw.cell(1, 2), "");
    }

    #[test]
    fn accepts_ragged_rows() {
        let text = "a,b,c\n1\n1,2,3\n";
        let raw = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(raw.rows[0].len(), 1);
        assert_eq!(raw.cell(0, 2), "");
    }

    #[test]
    fn reads_quoted_gviz_export() {
        let text = "\"年度\",\"裝置位置\"\n\"113\",\"客廳, 臥室\"\n";
        let raw = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(raw.cell(0, 1), "客廳, 臥室");
    }

    #[test]
    fn loads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "x,y\n1,2\n").unwrap();
        let raw = load_csv_file(file.path()).unwrap();
        assert_eq!(raw.headers, vec!["x", "y"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_csv_file(Path::new("/nonexistent/alarm.csv")).unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}
