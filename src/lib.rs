pub mod config;
pub mod element;
pub mod error;
pub mod loader;
pub mod locale;
pub mod query;
pub mod reshape;
pub mod schema;
pub mod visualization;

#[cfg(feature = "python")]
mod python;

pub use config::{LoaderConfig, ReshapeConfig};
pub use element::Element;
pub use error::ExplorerError;
pub use locale::Locale;
pub use query::{sort_by_year, ObservationTable};
pub use reshape::Observation;

#[cfg(feature = "python")]
mod bindings {
    use pyo3::prelude::*;
    use pyo3::types::PyModule;

    use crate::element::Element;
    use crate::python::CropExplorer;
    use crate::schema;

    /// Export schema constants as Python submodules
    fn add_schema_exports(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Raw
        let raw = PyModule::new(m.py(), "raw")?;
        raw.add("AREA", schema::raw::AREA)?;
        raw.add("ITEM", schema::raw::ITEM)?;
        raw.add("ELEMENT", schema::raw::ELEMENT)?;
        m.add_submodule(&raw)?;

        // Observation
        let observation = PyModule::new(m.py(), "observation")?;
        observation.add("COUNTRY", schema::observation::COUNTRY)?;
        observation.add("CROP", schema::observation::CROP)?;
        observation.add("ELEMENT", schema::observation::ELEMENT)?;
        observation.add("YEAR", schema::observation::YEAR)?;
        observation.add("VALUE", schema::observation::VALUE)?;
        observation.add("UNIT", schema::observation::UNIT)?;
        observation.add("DESCRIPTION", schema::observation::DESCRIPTION)?;
        m.add_submodule(&observation)?;

        // Element labels
        let element = PyModule::new(m.py(), "element")?;
        element.add("PRODUCTION", Element::Production.label())?;
        element.add("AREA_HARVESTED", Element::AreaHarvested.label())?;
        element.add("YIELD", Element::Yield.label())?;
        element.add("ALL", Element::ALL.map(Element::label).to_vec())?;
        m.add_submodule(&element)?;

        Ok(())
    }

    #[pymodule]
    fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<CropExplorer>()?;
        add_schema_exports(m)?;
        Ok(())
    }
}
