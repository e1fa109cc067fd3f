//! # quoteform
//!
//! Data-driven form automation core. Rotate test-data records deterministically
//! and map them onto a multi-page web form through declarative field mappings.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quoteform::{QuoteFlow, TestDataSource, TraceSurface};
//!
//! # #[tokio::main]
//! # async fn main() -> quoteform::Result<()> {
//! let source = TestDataSource::load("data/appdata.json")?;
//! let record = source.next_record();
//!
//! let surface = TraceSurface::new();
//! let flow = QuoteFlow::new();
//! flow.run(&surface, &record).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The browser itself stays outside this crate: anything implementing
//! [`FormSurface`] can be driven, and the shipped [`TraceSurface`] records
//! interactions for tests and dry runs.

mod data;
mod mapper;
mod mapping;
mod pages;
mod suite;
mod surface;

pub use data::{TestDataRecord, TestDataSource};
pub use mapper::apply;
pub use mapping::{ControlKind, FieldMapping, FieldSpec, RadioExclusiveSpec, RadioIndexedSpec};
pub use pages::{
    insurant_mapping, price_option_mapping, product_mapping, send_quote_mapping, vehicle_mapping,
};
pub use suite::{QuoteFlow, VehicleType, APP_URL};
pub use surface::{FormSurface, SurfaceError, SurfaceOp, TraceSurface};

/// Result type for quoteform operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during data loading, mapping configuration, or
/// form interaction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Backing test data is missing or malformed. Fatal at load time.
    #[error("data source error: {0}")]
    DataSource(String),

    /// Invalid mapping table, vehicle type, or parameter.
    #[error("config error: {0}")]
    Config(String),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A named field's control could not be located or manipulated.
    /// Aborts the remaining fill sequence of the current page.
    #[error("interaction failed for field '{field}' at {selector}: {source}")]
    FormInteraction {
        field: String,
        selector: String,
        source: SurfaceError,
    },

    #[error("assertion failed: {0}")]
    AssertionFailed(String),
}

impl Error {
    pub(crate) fn interaction(field: &str, selector: &str, source: SurfaceError) -> Self {
        Self::FormInteraction {
            field: field.to_string(),
            selector: selector.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_error_names_field_and_selector() {
        let err = Error::interaction("Make", "#make", SurfaceError::not_found("#make"));
        let msg = err.to_string();
        assert!(msg.contains("Make"));
        assert!(msg.contains("#make"));
    }

    #[test]
    fn test_data_source_error_display() {
        let err = Error::DataSource("the 'TestData' array is empty".into());
        assert_eq!(
            err.to_string(),
            "data source error: the 'TestData' array is empty"
        );
    }
}
