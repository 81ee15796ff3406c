//! # DataBox
//!
//! Saved, parameterized catalog queries ("query folders") with a
//! configurable table rendering and CSV/Excel export.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │              DataBox definition (TOML)                   │
//! │    (query, columns, static parameters, date range)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [engine]
//! ┌─────────────────────────────────────────────────────────┐
//! │       Parameter inflation (dependency graph +            │
//! │            sandboxed expression evaluation)              │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [catalog]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Catalog search (filters, date range, sort)        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [view]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Row building (reference dereferencing, code cells,     │
//! │                display converters)                       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [export]
//! ┌─────────────────────────────────────────────────────────┐
//! │                    CSV / Excel                           │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod convert;
pub mod engine;
pub mod export;
pub mod model;
pub mod schema;
pub mod settings;
pub mod setup;
pub mod store;
pub mod value;
pub mod view;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::catalog::{Catalog, CatalogQuery, Record, SortOrder};
    pub use crate::convert::{convert_to, ConverterRegistry};
    pub use crate::engine::{inflate, InflatedParams, Sandbox};
    pub use crate::model::{ColumnConfig, DataBox, ParamKind, Parameter};
    pub use crate::schema::{FieldKind, FieldSpec, SchemaRegistry, TypeInfo, DEFAULT_REF};
    pub use crate::value::{Uid, Value};
    pub use crate::view::{Cell, DataBoxView};
}
