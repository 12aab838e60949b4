//! The three measured variables of the dataset and their fixed metadata.

use std::fmt;
use std::str::FromStr;

use crate::error::ExplorerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    Production,
    AreaHarvested,
    Yield,
}

/// Per-element constants attached to every observation of that element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementSpec {
    pub element: Element,
    /// Exact value of the raw `Element` column.
    pub label: &'static str,
    pub unit: &'static str,
    pub description: &'static str,
}

/// Parameter table driving the reshape. Order here is output order.
pub const CATALOGUE: [ElementSpec; 3] = [
    ElementSpec {
        element: Element::Production,
        label: "Production",
        unit: "Tonnes",
        description: "Total produced",
    },
    ElementSpec {
        element: Element::AreaHarvested,
        label: "Area harvested",
        unit: "ha",
        description: "Area used for harvest",
    },
    ElementSpec {
        element: Element::Yield,
        label: "Yield",
        unit: "Hg/ha",
        description: "Production to area ratio",
    },
];

impl Element {
    pub const ALL: [Element; 3] = [Element::Production, Element::AreaHarvested, Element::Yield];

    pub fn spec(self) -> &'static ElementSpec {
        match self {
            Element::Production => &CATALOGUE[0],
            Element::AreaHarvested => &CATALOGUE[1],
            Element::Yield => &CATALOGUE[2],
        }
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    pub fn unit(self) -> &'static str {
        self.spec().unit
    }

    pub fn description(self) -> &'static str {
        self.spec().description
    }

    /// Exact match against the raw column value.
    pub fn from_label(label: &str) -> Option<Element> {
        CATALOGUE
            .iter()
            .find(|spec| spec.label == label)
            .map(|spec| spec.element)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lenient parsing for user input: case-insensitive, and the two-word label
/// may be written with `-`, `_` or no separator.
impl FromStr for Element {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "production" => Ok(Element::Production),
            "areaharvested" => Ok(Element::AreaHarvested),
            "yield" => Ok(Element::Yield),
            _ => Err(ExplorerError::InvalidElement(s.to_string())),
        }
    }
}
