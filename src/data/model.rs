use std::fmt;

/// Largest magnitude below which every integral `f64` is an exact `i64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the worksheet
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value guessed from the CSV text.
/// Used as a `BTreeSet` key by the filters, so `CellValue` must be `Ord`.
#[derive(Debug, Clone)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        use std::cmp::Ordering;

        // Integers and floats compare numerically; `guess` never yields an
        // integral float, so a tie only breaks by variant.
        match (self, other) {
            (Integer(a), Float(b)) => return (*a as f64).total_cmp(b).then(Ordering::Less),
            (Float(a), Integer(b)) => return a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            _ => {}
        }

        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) | Float(_) => 2,
                Text(_) => 3,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    /// Guess the type of a raw CSV cell.
    pub fn guess(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return CellValue::Null;
        }
        // Phone numbers and codes: "0912..." must keep its leading zero.
        if s.len() > 1 && s.starts_with('0') && !s.starts_with("0.") {
            return CellValue::Text(s.to_string());
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            // "113.0" is the year 113, same as "113".
            if f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER {
                return CellValue::Integer(f as i64);
            }
            if f.is_finite() {
                return CellValue::Float(f);
            }
        }
        match s {
            "TRUE" | "true" => CellValue::Bool(true),
            "FALSE" | "false" => CellValue::Bool(false),
            _ => CellValue::Text(s.to_string()),
        }
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – the worksheet exactly as fetched
// ---------------------------------------------------------------------------

/// Header row plus untyped rows, straight from the CSV export.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Cell text at (row, col); missing trailing cells read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Record – one installation row with its typed filter columns
// ---------------------------------------------------------------------------

/// A single installation (one worksheet row) that has valid coordinates.
#[derive(Debug, Clone)]
pub struct Record {
    pub year: CellValue,
    pub position: CellValue,
    /// `None` when the worksheet has no eligibility column at all.
    pub eligibility: Option<CellValue>,
    /// Units installed; `None` when absent or not a number.
    pub device_count: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
    /// Every source cell in header order, for the detail table.
    pub cells: Vec<CellValue>,
}

// ---------------------------------------------------------------------------
// Dataset – coordinate-valid records of one load
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Source column names, in header order.
    pub columns: Vec<String>,
    pub records: Vec<Record>,
    /// Rows in the worksheet before rows without coordinates were dropped.
    pub source_rows: usize,
    /// Whether the worksheet has an eligibility column.
    pub has_eligibility: bool,
    /// Whether the worksheet has a device-count column.
    pub has_device_count: bool,
}

impl Dataset {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Rows dropped because a coordinate was missing or unparseable.
    pub fn dropped_rows(&self) -> usize {
        self.source_rows - self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn guesses_cell_types() {
        assert_eq!(CellValue::guess("113"), CellValue::Integer(113));
        assert_eq!(CellValue::guess(" 22.75 "), CellValue::Float(22.75));
        assert_eq!(CellValue::guess(""), CellValue::Null);
        assert_eq!(CellValue::guess("TRUE"), CellValue::Bool(true));
        assert_eq!(CellValue::guess("客廳"), CellValue::Text("客廳".into()));
        assert_eq!(CellValue::guess("NaN"), CellValue::Text("NaN".into()));
        assert_eq!(CellValue::guess("0912345678"), CellValue::Text("0912345678".into()));
        assert_eq!(CellValue::guess("0.5"), CellValue::Float(0.5));
        assert_eq!(CellValue::guess("0"), CellValue::Integer(0));
        assert_eq!(CellValue::guess("113.0"), CellValue::Integer(113));
        assert_eq!(CellValue::guess("-0.0"), CellValue::Integer(0));
        assert_eq!(CellValue::guess("1e3"), CellValue::Integer(1000));
    }

    #[test]
    fn integral_floats_share_one_year_key() {
        let years: BTreeSet<CellValue> = ["113", "113.0", " 113 "]
            .into_iter()
            .map(CellValue::guess)
            .collect();
        assert_eq!(years.len(), 1);
        let labels: Vec<String> = years.iter().map(|y| y.to_string()).collect();
        assert_eq!(labels, vec!["113"]);
    }

    #[test]
    fn equality_agrees_with_ordering() {
        let pos = CellValue::Float(0.0);
        let neg = CellValue::Float(-0.0);
        assert_eq!(pos == neg, pos.cmp(&neg) == std::cmp::Ordering::Equal);
        assert_ne!(pos, neg);

        let a = CellValue::Float(22.75);
        assert_eq!(a, CellValue::Float(22.75));
        assert_eq!(a.cmp(&CellValue::Float(22.75)), std::cmp::Ordering::Equal);
    }

    #[test]
    fn numbers_sort_numerically_across_variants() {
        let set: BTreeSet<CellValue> = [
            CellValue::Integer(114),
            CellValue::Float(112.5),
            CellValue::Integer(112),
            CellValue::Null,
        ]
        .into_iter()
        .collect();
        let ordered: Vec<_> = set.into_iter().collect();
        assert_eq!(
            ordered,
            vec![
                CellValue::Null,
                CellValue::Integer(112),
                CellValue::Float(112.5),
                CellValue::Integer(114),
            ]
        );
    }

    #[test]
    fn integer_and_equal_float_stay_distinct() {
        let a = CellValue::Integer(113);
        let b = CellValue::Float(113.0);
        assert_ne!(a.cmp(&b), std::cmp::Ordering::Equal);
        assert_eq!(a.cmp(&b).reverse(), b.cmp(&a));
    }

    #[test]
    fn raw_table_pads_missing_cells() {
        let raw = RawTable {
            headers: vec!["a".into(), "b".into()],
            rows: vec![vec!["1".into()]],
        };
        assert_eq!(raw.cell(0, 0), "1");
        assert_eq!(raw.cell(0, 1), "");
        assert_eq!(raw.cell(5, 0), "");
    }
}
