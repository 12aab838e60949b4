use pyo3::prelude::*;
use pyo3_polars::PyDataFrame;

use crate::config::{LoaderConfig, ReshapeConfig};
use crate::element::Element;
use crate::locale::Locale;
use crate::query::{sort_by_year, ObservationTable};
use crate::visualization::{self, ChartOptions};

/// Crop dataset loaded once and reshaped to long form.
///
/// Every query returns a new polars DataFrame; the loaded table itself is
/// never modified.
#[pyclass(frozen)]
pub struct CropExplorer {
    table: ObservationTable,
}

#[pymethods]
impl CropExplorer {
    /// Load and reshape a crop statistics CSV.
    ///
    /// `encoding` is a WHATWG label ("latin1", "utf-8", ...); `-`, `_` and
    /// case are ignored, so "latin-1" works too.
    /// `separator` must be a single ASCII character.
    #[new]
    #[pyo3(signature = (path, encoding="latin1", separator=","))]
    fn new(path: &str, encoding: &str, separator: &str) -> PyResult<Self> {
        let sep = match separator.as_bytes() {
            [b] if b.is_ascii() => *b,
            _ => {
                return Err(pyo3::exceptions::PyValueError::new_err(format!(
                    "separator must be a single ASCII character, got {separator:?}"
                )))
            }
        };
        let loader = LoaderConfig::new(path)
            .with_encoding(encoding)
            .with_separator(sep);
        let table = ObservationTable::load(&loader, &ReshapeConfig::default())?;
        Ok(Self { table })
    }

    // ── Properties ──────────────────────────────────────────────────────────

    #[getter]
    fn observations(&self) -> PyDataFrame {
        PyDataFrame(self.table.observations().clone())
    }

    #[getter]
    fn year_range(&self) -> Option<(i32, i32)> {
        self.table.year_range()
    }

    #[getter]
    fn countries(&self) -> Vec<String> {
        self.table.countries().to_vec()
    }

    #[getter]
    fn crops(&self) -> Vec<String> {
        self.table.crops().to_vec()
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    /// All countries for one year and element.
    fn cross_section(&self, year: i32, element: &str) -> PyResult<PyDataFrame> {
        let element: Element = element.parse()?;
        Ok(PyDataFrame(self.table.cross_section(year, element)?))
    }

    /// Rows for the given countries, crop and element.
    /// With `sort=True` they come back ordered by country then year.
    #[pyo3(signature = (countries, crop, element, sort=false))]
    fn trend(
        &self,
        countries: Vec<String>,
        crop: &str,
        element: &str,
        sort: bool,
    ) -> PyResult<PyDataFrame> {
        let element: Element = element.parse()?;
        let df = self.table.trend(&countries, crop, element)?;
        let df = if sort { sort_by_year(&df)? } else { df };
        Ok(PyDataFrame(df))
    }

    // ── Visualization ───────────────────────────────────────────────────────

    /// Cross-section chart(s) as an HTML string.
    ///
    /// Use with `IPython.display.HTML(...)`. An empty selection returns a
    /// message block instead of a chart. `locale` is "en" or "es".
    #[pyo3(signature = (year, element, histogram=true, scatter=false, width_px=800, height_px=420, locale="en"))]
    #[allow(clippy::too_many_arguments)]
    fn render_cross_section(
        &self,
        year: i32,
        element: &str,
        histogram: bool,
        scatter: bool,
        width_px: u32,
        height_px: u32,
        locale: &str,
    ) -> PyResult<String> {
        let element: Element = element.parse()?;
        let locale: Locale = locale.parse()?;
        let options = ChartOptions {
            histogram,
            scatter,
            width_px,
            height_px,
            locale,
        };
        let rendered = visualization::render_cross_section(&self.table, year, element, &options)?;
        Ok(rendered.into_html(locale))
    }

    /// Trend line chart as an HTML string.
    #[pyo3(signature = (countries, crop, element, width_px=800, height_px=420, locale="en"))]
    fn render_trend(
        &self,
        countries: Vec<String>,
        crop: &str,
        element: &str,
        width_px: u32,
        height_px: u32,
        locale: &str,
    ) -> PyResult<String> {
        let element: Element = element.parse()?;
        let locale: Locale = locale.parse()?;
        let options = ChartOptions {
            width_px,
            height_px,
            locale,
            ..ChartOptions::default()
        };
        let rendered =
            visualization::render_trend(&self.table, &countries, crop, element, &options)?;
        Ok(rendered.into_html(locale))
    }

    fn __len__(&self) -> usize {
        self.table.len()
    }

    fn __repr__(&self) -> String {
        match self.table.year_range() {
            Some((lo, hi)) => format!(
                "CropExplorer({} observations, {} countries, {} crops, {lo}-{hi})",
                self.table.len(),
                self.table.countries().len(),
                self.table.crops().len(),
            ),
            None => "CropExplorer(empty)".to_string(),
        }
    }
}
