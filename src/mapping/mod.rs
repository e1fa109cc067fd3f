pub mod kind;
pub mod schema;
pub mod template;

pub use kind::{ControlKind, RadioExclusiveSpec, RadioIndexedSpec};
pub use schema::{FieldMapping, FieldSpec};
