//! Display language for chart titles, element descriptions and notices.
//!
//! Only presentation text is localized. The `description` column of the
//! observation table is always English.

use std::fmt;
use std::str::FromStr;

use crate::element::Element;
use crate::error::ExplorerError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    English,
    Spanish,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::English, Locale::Spanish];

    /// Short language tag (`en`, `es`).
    pub fn tag(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Spanish => "es",
        }
    }

    pub fn description(self, element: Element) -> &'static str {
        match (self, element) {
            (Locale::English, _) => element.description(),
            (Locale::Spanish, Element::Production) => "Total producido",
            (Locale::Spanish, Element::AreaHarvested) => "Área utilizada para cosecha",
            (Locale::Spanish, Element::Yield) => "Relación producción / área",
        }
    }

    pub(crate) fn histogram_prefix(self) -> &'static str {
        match self {
            Locale::English => "Histogram",
            Locale::Spanish => "Histograma",
        }
    }

    pub(crate) fn scatter_prefix(self) -> &'static str {
        match self {
            Locale::English => "Scatter",
            Locale::Spanish => "Dispersión",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Accepts the language tag or its name, case-insensitive (`es`, `Spanish`,
/// `español`).
impl FromStr for Locale {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "es" | "spanish" | "español" | "espanol" => Ok(Locale::Spanish),
            _ => Err(ExplorerError::InvalidLocale(s.to_string())),
        }
    }
}
