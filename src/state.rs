use crate::color::YearColors;
use crate::config::DashboardConfig;
use crate::data::error::PipelineError;
use crate::data::filter::{FilterColumn, FilterDomains, FilterSelection};
use crate::data::model::{CellValue, Dataset};
use crate::data::pipeline::{self, failure_message};
use crate::data::present::Presentation;
use crate::data::source::{DataSource, SheetSource};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Dataset of the last successful load.
    pub dataset: Option<Dataset>,

    /// Options offered by the side-panel filters.
    pub domains: FilterDomains,

    /// Values currently accepted by each filter.
    pub selection: FilterSelection,

    /// Metrics, map points and table for the current selection (cached).
    pub presentation: Presentation,

    pub year_colors: YearColors,

    /// Where the current dataset came from.
    pub origin: Option<String>,

    /// Load failure shown as the error banner.
    pub error: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            dataset: None,
            domains: FilterDomains::default(),
            selection: FilterSelection::default(),
            presentation: Presentation::default(),
            year_colors: YearColors::default(),
            origin: None,
            error: None,
        }
    }

    /// Run the pipeline against `source` and install the result, or record
    /// the failure. A failed load clears the previous dataset.
    pub fn load_from(&mut self, source: &dyn DataSource) {
        match pipeline::load(source, &self.config.columns) {
            Ok(dataset) => {
                self.origin = Some(source.describe());
                self.set_dataset(dataset);
            }
            Err(e) => self.record_failure(&source.describe(), &e),
        }
    }

    /// Fetch the configured worksheet again.
    pub fn reload_sheet(&mut self) {
        match SheetSource::new(&self.config.source) {
            Ok(source) => self.load_from(&source),
            Err(e) => self.record_failure(&self.config.source.url.clone(), &e),
        }
    }

    fn record_failure(&mut self, origin: &str, err: &PipelineError) {
        log::error!("Failed to load {origin} ({} stage): {err}", err.stage());
        self.dataset = None;
        self.origin = None;
        self.presentation = Presentation::default();
        self.error = Some(failure_message(err));
    }

    /// Ingest a newly loaded dataset, initialise filters and colours.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.domains = FilterDomains::derive(&dataset);
        self.selection = FilterSelection::all(&self.domains);
        self.year_colors = YearColors::new(&self.domains.years);
        self.dataset = Some(dataset);
        self.error = None;
        self.refilter();
    }

    /// Recompute the presentation after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.presentation = Presentation::build(ds, &self.selection, &self.config.redaction);
        }
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: FilterColumn, value: &CellValue) {
        self.selection.toggle(column, value);
        self.refilter();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: FilterColumn) {
        self.selection.select_all(column, &self.domains);
        self.refilter();
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: FilterColumn) {
        self.selection.select_none(column);
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;
    use crate::data::model::RawTable;

    struct Fixture(&'static str);

    impl DataSource for Fixture {
        fn describe(&self) -> String {
            "fixture".into()
        }

        fn fetch(&self) -> Result<RawTable, PipelineError> {
            parse_csv(self.0.as_bytes())
        }
    }

    struct Broken;

    impl DataSource for Broken {
        fn describe(&self) -> String {
            "broken".into()
        }

        fn fetch(&self) -> Result<RawTable, PipelineError> {
            Err(PipelineError::Http {
                status: 403,
                worksheet: "test0225".into(),
            })
        }
    }

    const SHEET: &str = "年度,裝置位置,緯度,經度\n113,客廳,22.7,121.1\n114,臥室,22.8,121.2\n";

    #[test]
    fn successful_load_selects_everything() {
        let mut state = AppState::new(DashboardConfig::default());
        state.load_from(&Fixture(SHEET));
        assert!(state.error.is_none());
        assert_eq!(state.origin.as_deref(), Some("fixture"));
        assert_eq!(state.presentation.points.len(), 2);
    }

    #[test]
    fn filter_changes_refresh_presentation() {
        let mut state = AppState::new(DashboardConfig::default());
        state.load_from(&Fixture(SHEET));

        state.toggle_filter_value(FilterColumn::Year, &CellValue::Integer(113));
        assert_eq!(state.presentation.points.len(), 1);

        state.select_none(FilterColumn::Position);
        assert!(state.presentation.points.is_empty());
        assert_eq!(state.presentation.metrics.as_ref().unwrap().households, 0);

        state.select_all(FilterColumn::Position);
        state.select_all(FilterColumn::Year);
        assert_eq!(state.presentation.points.len(), 2);
    }

    #[test]
    fn failed_load_shows_one_error_and_no_map() {
        let mut state = AppState::new(DashboardConfig::default());
        state.load_from(&Fixture(SHEET));
        state.load_from(&Broken);

        assert!(state.dataset.is_none());
        assert!(state.presentation.points.is_empty());
        assert!(state.presentation.metrics.is_none());
        let error = state.error.unwrap();
        assert!(error.contains("HTTP 403"));
        assert_eq!(error.matches("錯誤訊息").count(), 1);
    }

    #[test]
    fn bad_sheet_url_is_reported_not_fetched() {
        let mut config = DashboardConfig::default();
        config.source.url = "https://example.com/not-a-sheet".into();
        let mut state = AppState::new(config);
        state.reload_sheet();
        assert!(state.error.unwrap().contains("not a Google Sheets URL"));
    }
}
