use std::collections::BTreeSet;

use log::debug;
use polars::prelude::*;

use crate::config::{LoaderConfig, ReshapeConfig};
use crate::element::Element;
use crate::error::ExplorerError;
use crate::loader::load_raw;
use crate::reshape::{reshape, to_observations, Observation};
use crate::schema::observation;

/// The materialized long-form table. Built once, never mutated; queries
/// return new frames.
#[derive(Debug, Clone)]
pub struct ObservationTable {
    df: DataFrame,
    year_range: Option<(i32, i32)>,
    countries: Vec<String>,
    crops: Vec<String>,
}

impl ObservationTable {
    /// Load the file and reshape it. Any failure here is fatal to startup.
    pub fn load(loader: &LoaderConfig, reshape_config: &ReshapeConfig) -> Result<Self, ExplorerError> {
        let raw = load_raw(loader)?;
        Self::from_raw(&raw, reshape_config)
    }

    pub fn from_raw(raw: &DataFrame, config: &ReshapeConfig) -> Result<Self, ExplorerError> {
        Self::from_observations(reshape(raw, config)?)
    }

    /// Wrap an already reshaped frame, deriving the selector metadata.
    pub fn from_observations(df: DataFrame) -> Result<Self, ExplorerError> {
        let years: Vec<i32> = df
            .column(observation::YEAR)?
            .as_materialized_series()
            .i32()?
            .into_iter()
            .flatten()
            .collect();
        let year_range = years
            .iter()
            .min()
            .copied()
            .zip(years.iter().max().copied());

        let countries = distinct_strings(&df, observation::COUNTRY)?;
        let crops = distinct_strings(&df, observation::CROP)?;

        Ok(Self {
            df,
            year_range,
            countries,
            crops,
        })
    }

    pub fn observations(&self) -> &DataFrame {
        &self.df
    }

    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Smallest and largest year present, `None` for an empty table.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        self.year_range
    }

    /// Sorted distinct country names.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Sorted distinct crop names.
    pub fn crops(&self) -> &[String] {
        &self.crops
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    /// All countries for one year and one element.
    pub fn cross_section(&self, year: i32, element: Element) -> Result<DataFrame, ExplorerError> {
        let df = self
            .df
            .clone()
            .lazy()
            .filter(
                col(observation::YEAR)
                    .eq(lit(year))
                    .and(col(observation::ELEMENT).eq(lit(element.label()))),
            )
            .collect()?;
        debug!("cross_section({year}, {element}) -> {} rows", df.height());
        Ok(df)
    }

    /// Rows for the given countries, one crop and one element, in table
    /// order. Callers wanting a time series use [`sort_by_year`].
    pub fn trend<I, S>(&self, countries: I, crop: &str, element: Element) -> Result<DataFrame, ExplorerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let countries: Vec<String> = countries
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect();
        if countries.is_empty() {
            return Ok(self.df.clear());
        }

        let wanted = Series::new(observation::COUNTRY.into(), countries);
        let df = self
            .df
            .clone()
            .lazy()
            .filter(
                col(observation::COUNTRY)
                    .is_in(lit(wanted), false)
                    .and(col(observation::CROP).eq(lit(crop)))
                    .and(col(observation::ELEMENT).eq(lit(element.label()))),
            )
            .collect()?;
        debug!("trend({crop}, {element}) -> {} rows", df.height());
        Ok(df)
    }

    pub fn to_observations(&self) -> Result<Vec<Observation>, ExplorerError> {
        to_observations(&self.df)
    }
}

/// Order rows by country then year, keeping input order for ties.
pub fn sort_by_year(df: &DataFrame) -> Result<DataFrame, ExplorerError> {
    let sorted = df
        .clone()
        .lazy()
        .sort_by_exprs(
            [col(observation::COUNTRY), col(observation::YEAR)],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?;
    Ok(sorted)
}

fn distinct_strings(df: &DataFrame, column: &str) -> Result<Vec<String>, ExplorerError> {
    let values: BTreeSet<&str> = df.column(column)?.str()?.into_iter().flatten().collect();
    Ok(values.into_iter().map(str::to_string).collect())
}
