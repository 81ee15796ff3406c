//! The query-folder definition model.

pub mod column;
pub mod databox;
pub mod loader;
pub mod param;

pub use column::ColumnConfig;
pub use databox::{DataBox, DefinitionError};
pub use loader::{load, load_from_str, save, to_toml, LoadError, LoadResult};
pub use param::{ParamKind, Parameter};
