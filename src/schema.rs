//! Column-name constants for the crop dataset.
//! Single source of truth - exported to Python via PyO3.

// ── Raw (wide form) columns ─────────────────────────────────────────────────
pub mod raw {
    pub const AREA: &str = "Area";
    pub const ITEM: &str = "Item";
    pub const ELEMENT: &str = "Element";

    pub const REQUIRED: [&str; 3] = [AREA, ITEM, ELEMENT];
}

// ── Year column markers ─────────────────────────────────────────────────────
pub mod year_column {
    /// Prefix in front of every year label (`Y1961`).
    pub const PREFIX: &str = "Y";
    /// Suffix of the data-quality flag sibling (`Y1961F`).
    pub const FLAG_SUFFIX: &str = "F";
}

// ── Observation (long form) columns ─────────────────────────────────────────
pub mod observation {
    pub const COUNTRY: &str = "country";
    pub const CROP: &str = "crop";
    pub const ELEMENT: &str = "element";
    pub const YEAR: &str = "year";
    pub const VALUE: &str = "value";
    pub const UNIT: &str = "unit";
    pub const DESCRIPTION: &str = "description";

    pub const ALL: [&str; 7] = [COUNTRY, CROP, ELEMENT, YEAR, VALUE, UNIT, DESCRIPTION];
}
