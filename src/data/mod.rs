/// Data layer: sources, schema validation, coercion, filtering, presentation.
///
/// Architecture:
/// ```text
///  Google Sheets CSV export / local .csv
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  DataSource::fetch → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  locate expected headers, fail fast on a missing one
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  coerce   │  typed Records, rows without coordinates dropped
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  present  │  metrics, map points, redacted table
///   └──────────┘
/// ```

pub mod coerce;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod present;
pub mod schema;
pub mod source;
