//! Wide-to-long reshape of the raw table into observations.
//!
//! One parameterized transform (`melt_element`) runs once per entry of the
//! element catalogue; the per-element constants come from that table, never
//! from per-category code.

use log::{debug, info};
use polars::prelude::*;

use crate::config::ReshapeConfig;
use crate::element::{Element, ElementSpec, CATALOGUE};
use crate::error::ExplorerError;
use crate::loader::require_columns;
use crate::schema::{observation, raw};

// ── Year column selection ───────────────────────────────────────────────────

/// Declarative year-column filter: prefix match and flag-suffix exclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearColumns {
    prefix: String,
    flag_suffix: String,
}

impl YearColumns {
    pub fn new(prefix: impl Into<String>, flag_suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            flag_suffix: flag_suffix.into(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        let flagged = !self.flag_suffix.is_empty() && name.ends_with(self.flag_suffix.as_str());
        name.starts_with(self.prefix.as_str()) && !flagged
    }

    /// Matching columns paired with their year, in header order.
    ///
    /// A matching column whose label does not end in an integer is a
    /// malformed header.
    pub fn select(&self, columns: &[&str]) -> Result<Vec<(String, i32)>, ExplorerError> {
        columns
            .iter()
            .copied()
            .filter(|name| self.matches(name))
            .map(|name| {
                name[self.prefix.len()..]
                    .parse::<i32>()
                    .map(|year| (name.to_string(), year))
                    .map_err(|_| ExplorerError::InvalidYearColumn(name.to_string()))
            })
            .collect()
    }
}

impl From<&ReshapeConfig> for YearColumns {
    fn from(config: &ReshapeConfig) -> Self {
        Self::new(config.year_prefix.as_str(), config.flag_suffix.as_str())
    }
}

// ── Observation record ──────────────────────────────────────────────────────

/// One row of the long-form table. Unit and description follow from the
/// element and are not stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub country: String,
    pub crop: String,
    pub element: Element,
    pub year: i32,
    pub value: f64,
}

impl Observation {
    pub fn unit(&self) -> &'static str {
        self.element.unit()
    }

    pub fn description(&self) -> &'static str {
        self.element.description()
    }
}

/// Extract typed observations from a frame with the observation schema.
/// Rows with a null key or value are skipped.
pub fn to_observations(df: &DataFrame) -> Result<Vec<Observation>, ExplorerError> {
    let country = df.column(observation::COUNTRY)?.str()?;
    let crop = df.column(observation::CROP)?.str()?;
    let element = df.column(observation::ELEMENT)?.str()?;
    let year = df.column(observation::YEAR)?.as_materialized_series().i32()?;
    let value = df.column(observation::VALUE)?.as_materialized_series().f64()?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let (Some(c), Some(cr), Some(label), Some(y), Some(v)) = (
            country.get(i),
            crop.get(i),
            element.get(i),
            year.get(i),
            value.get(i),
        ) else {
            continue;
        };
        let el = Element::from_label(label)
            .ok_or_else(|| ExplorerError::InvalidElement(label.to_string()))?;
        rows.push(Observation {
            country: c.to_string(),
            crop: cr.to_string(),
            element: el,
            year: y,
            value: v,
        });
    }
    Ok(rows)
}

/// A zero-row frame with the observation schema.
pub fn empty_observations() -> Result<DataFrame, ExplorerError> {
    let columns: Vec<Column> = observation::ALL
        .iter()
        .map(|&name| {
            let dtype = match name {
                observation::YEAR => DataType::Int32,
                observation::VALUE => DataType::Float64,
                _ => DataType::String,
            };
            Series::new_empty(name.into(), &dtype).into()
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

// ── Reshape ─────────────────────────────────────────────────────────────────

/// Build the long-form observation table from the raw wide table.
///
/// Rows whose `Element` is not in the catalogue are left out, as are
/// observations whose value is missing or not numeric.
pub fn reshape(raw_df: &DataFrame, config: &ReshapeConfig) -> Result<DataFrame, ExplorerError> {
    require_columns(raw_df, &raw::REQUIRED)?;

    let years = YearColumns::from(config).select(&raw_df.get_column_names_str())?;
    if years.is_empty() {
        info!("no year columns found; observation table is empty");
        return empty_observations();
    }

    let mut slices = Vec::with_capacity(CATALOGUE.len());
    for spec in CATALOGUE.iter() {
        let slice = raw_df
            .clone()
            .lazy()
            .filter(col(raw::ELEMENT).eq(lit(spec.label)))
            .collect()?;
        let long = melt_element(&slice, spec, &years)?;
        debug!(
            "{}: {} raw rows -> {} observations",
            spec.label,
            slice.height(),
            long.height()
        );
        slices.push(long.lazy());
    }

    let df = concat(slices, UnionArgs::default())?.collect()?;
    info!(
        "reshaped {} raw rows into {} observations over {} year columns",
        raw_df.height(),
        df.height(),
        years.len()
    );
    Ok(df)
}

/// Unpivot one element slice: every (row, year column) pair becomes a row,
/// tagged with the element's constants. Missing values are dropped here.
fn melt_element(
    slice: &DataFrame,
    spec: &ElementSpec,
    years: &[(String, i32)],
) -> Result<DataFrame, ExplorerError> {
    let parts: Vec<LazyFrame> = years
        .iter()
        .map(|(name, year)| {
            slice.clone().lazy().select([
                col(raw::AREA).alias(observation::COUNTRY),
                col(raw::ITEM).alias(observation::CROP),
                lit(spec.label).alias(observation::ELEMENT),
                lit(*year).cast(DataType::Int32).alias(observation::YEAR),
                col(name.as_str())
                    .str()
                    .strip_chars(lit(" \t\r\n"))
                    .cast(DataType::Float64)
                    .alias(observation::VALUE),
                lit(spec.unit).alias(observation::UNIT),
                lit(spec.description).alias(observation::DESCRIPTION),
            ])
        })
        .collect();

    let df = concat(parts, UnionArgs::default())?
        .filter(
            col(observation::VALUE)
                .is_not_null()
                .and(col(observation::VALUE).is_not_nan())
                .and(col(observation::COUNTRY).is_not_null())
                .and(col(observation::COUNTRY).neq(lit("")))
                .and(col(observation::CROP).is_not_null())
                .and(col(observation::CROP).neq(lit(""))),
        )
        .collect()?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coffee() -> DataFrame {
        df!(
            "Area" => ["Costa Rica"],
            "Item" => ["Coffee"],
            "Element" => ["Production"],
            "Y2019" => [Some("100")],
            "Y2019F" => [Some("A")],
            "Y2020" => [Some("110.5")],
            "Y2020F" => [Some("E")],
            "Y2021" => [None::<&str>],
        )
        .unwrap()
    }

    #[test]
    fn year_columns_skip_flags_and_other_columns() {
        let selector = YearColumns::new("Y", "F");
        let cols = ["Area", "Item Code", "Y1961", "Y1961F", "Y1962", "Unit"];
        let years = selector.select(&cols).unwrap();
        assert_eq!(
            years,
            vec![("Y1961".to_string(), 1961), ("Y1962".to_string(), 1962)]
        );
    }

    #[test]
    fn malformed_year_column_is_rejected() {
        let selector = YearColumns::new("Y", "F");
        let err = selector.select(&["Y1961", "Year Code"]).unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidYearColumn(ref c) if c == "Year Code"));
    }

    #[test]
    fn empty_flag_suffix_excludes_nothing() {
        let selector = YearColumns::new("Y", "");
        assert!(selector.matches("Y2000"));
    }

    #[test]
    fn coffee_scenario() {
        let df = reshape(&coffee(), &ReshapeConfig::default()).unwrap();
        assert_eq!(df.get_column_names_str(), observation::ALL);

        let rows = to_observations(&df).unwrap();
        assert_eq!(
            rows,
            vec![
                Observation {
                    country: "Costa Rica".into(),
                    crop: "Coffee".into(),
                    element: Element::Production,
                    year: 2019,
                    value: 100.0,
                },
                Observation {
                    country: "Costa Rica".into(),
                    crop: "Coffee".into(),
                    element: Element::Production,
                    year: 2020,
                    value: 110.5,
                },
            ]
        );

        let unit = df.column(observation::UNIT).unwrap().str().unwrap();
        let desc = df.column(observation::DESCRIPTION).unwrap().str().unwrap();
        for i in 0..df.height() {
            assert_eq!(unit.get(i), Some("Tonnes"));
            assert_eq!(desc.get(i), Some("Total produced"));
        }
    }

    #[test]
    fn metadata_follows_element() {
        let raw_df = df!(
            "Area" => ["Chile", "Chile", "Chile", "Chile"],
            "Item" => ["Maize", "Maize", "Maize", "Maize"],
            "Element" => ["Production", "Area harvested", "Yield", "Stocks"],
            "Y2000" => ["1", "2", "3", "4"],
        )
        .unwrap();
        let df = reshape(&raw_df, &ReshapeConfig::default()).unwrap();
        assert_eq!(df.height(), 3);

        let element = df.column(observation::ELEMENT).unwrap().str().unwrap();
        let unit = df.column(observation::UNIT).unwrap().str().unwrap();
        let desc = df.column(observation::DESCRIPTION).unwrap().str().unwrap();
        for i in 0..df.height() {
            let el = Element::from_label(element.get(i).unwrap()).unwrap();
            assert_eq!(unit.get(i), Some(el.unit()));
            assert_eq!(desc.get(i), Some(el.description()));
        }
        assert_eq!(element.get(0), Some("Production"));
        assert_eq!(element.get(1), Some("Area harvested"));
        assert_eq!(element.get(2), Some("Yield"));
    }

    #[test]
    fn invalid_tokens_are_dropped() {
        let raw_df = df!(
            "Area" => ["Chile", "Peru"],
            "Item" => ["Maize", "Maize"],
            "Element" => ["Yield", "Yield"],
            "Y2000" => [" 12.5 ", "n.a."],
            "Y2001" => ["nan", "7"],
        )
        .unwrap();
        let rows = to_observations(&reshape(&raw_df, &ReshapeConfig::default()).unwrap()).unwrap();
        let triples: Vec<(&str, i32, f64)> = rows
            .iter()
            .map(|o| (o.country.as_str(), o.year, o.value))
            .collect();
        assert_eq!(triples, vec![("Chile", 2000, 12.5), ("Peru", 2001, 7.0)]);
    }

    #[test]
    fn missing_country_or_crop_is_dropped() {
        let raw_df = df!(
            "Area" => [Some("Chile"), None, Some("")],
            "Item" => [Some("Maize"), Some("Maize"), Some("Maize")],
            "Element" => ["Yield", "Yield", "Yield"],
            "Y2000" => ["1", "2", "3"],
        )
        .unwrap();
        let df = reshape(&raw_df, &ReshapeConfig::default()).unwrap();
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn empty_slice_yields_nothing() {
        let raw_df = df!(
            "Area" => ["Chile"],
            "Item" => ["Maize"],
            "Element" => ["Yield"],
            "Y2000" => ["3"],
        )
        .unwrap();
        let rows = to_observations(&reshape(&raw_df, &ReshapeConfig::default()).unwrap()).unwrap();
        assert!(rows.iter().all(|o| o.element == Element::Yield));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn no_year_columns_gives_typed_empty_table() {
        let raw_df = df!(
            "Area" => ["Chile"],
            "Item" => ["Maize"],
            "Element" => ["Yield"],
        )
        .unwrap();
        let df = reshape(&raw_df, &ReshapeConfig::default()).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.column(observation::YEAR).unwrap().dtype(), &DataType::Int32);
        assert_eq!(df.column(observation::VALUE).unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn reshape_is_idempotent() {
        let a = reshape(&coffee(), &ReshapeConfig::default()).unwrap();
        let b = reshape(&coffee(), &ReshapeConfig::default()).unwrap();
        assert!(a.equals_missing(&b));
    }

    #[test]
    fn rows_ordered_by_element_then_year_then_file_row() {
        let raw_df = df!(
            "Area" => ["Peru", "Chile", "Peru"],
            "Item" => ["Maize", "Maize", "Maize"],
            "Element" => ["Yield", "Production", "Production"],
            "Y2000" => ["7", "1", "2"],
            "Y2001" => ["8", "3", "4"],
        )
        .unwrap();

        let rows = to_observations(&reshape(&raw_df, &ReshapeConfig::default()).unwrap()).unwrap();
        let got: Vec<(Element, &str, i32, f64)> = rows
            .iter()
            .map(|o| (o.element, o.country.as_str(), o.year, o.value))
            .collect();
        assert_eq!(
            got,
            vec![
                (Element::Production, "Chile", 2000, 1.0),
                (Element::Production, "Peru", 2000, 2.0),
                (Element::Production, "Chile", 2001, 3.0),
                (Element::Production, "Peru", 2001, 4.0),
                (Element::Yield, "Peru", 2000, 7.0),
                (Element::Yield, "Peru", 2001, 8.0),
            ]
        );
    }

    #[test]
    fn missing_required_column() {
        let raw_df = df!("Area" => ["Chile"], "Y2000" => ["1"]).unwrap();
        let err = reshape(&raw_df, &ReshapeConfig::default()).unwrap_err();
        assert!(matches!(err, ExplorerError::MissingColumn(_)));
    }
}
