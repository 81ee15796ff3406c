//! The listing view: columns, rows and reference dereferencing.
//!
//! `DataBoxView` binds a definition to a catalog and produces the table:
//! visible columns, inflated parameters, the effective query and the
//! per-record row cells. Reference columns walk linked records along the
//! configured attribute path; `code` columns recompute their cell in the
//! sandbox; named converters produce the display string.

pub mod grid;

use inflector::Inflector;
use std::cell::OnceCell;
use tracing::info;

use crate::catalog::{Catalog, CatalogQuery, Record};
use crate::convert::ConverterRegistry;
use crate::engine::{self, InflatedParams, Sandbox};
use crate::model::{ColumnConfig, DataBox, Parameter};
use crate::schema::DEFAULT_REF;
use crate::value::Value;

/// Errors raised while setting up or driving a view.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("expression sandbox: {0}")]
    Sandbox(#[from] mlua::Error),
}

/// A visible column, keyed by its position in the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumn {
    /// Position key ("0", "1", ...).
    pub id: String,
    /// Source field key.
    pub column: String,
    pub title: String,
    pub refs: Vec<String>,
    pub code: Option<String>,
    pub converter: Option<String>,
    /// Databox columns are never catalog-sortable; the real values are
    /// dereferenced per row.
    pub sortable: bool,
}

/// One hop of a configured reference-column chain, for the column
/// controls. Built from the schemas alone, no records involved.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceColumn {
    pub key: String,
    pub content_type: String,
    pub fields: Vec<String>,
}

/// A rendered table cell: the computed value plus its display string.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: Value,
    pub display: String,
}

/// The default listing view of a query folder.
pub struct DataBoxView<'a> {
    databox: &'a DataBox,
    catalog: &'a Catalog,
    converters: ConverterRegistry,
    sandbox: Sandbox,
    inflated: OnceCell<InflatedParams>,
}

impl<'a> DataBoxView<'a> {
    pub fn new(databox: &'a DataBox, catalog: &'a Catalog) -> Result<Self, ViewError> {
        Ok(Self {
            databox,
            catalog,
            converters: ConverterRegistry::with_defaults(),
            sandbox: Sandbox::new()?,
            inflated: OnceCell::new(),
        })
    }

    pub fn databox(&self) -> &DataBox {
        self.databox
    }

    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    /// Visible columns. A box without columns renders the single default
    /// title column; missing titles are derived from the field key.
    pub fn columns(&self) -> Vec<ResolvedColumn> {
        let configs: Vec<ColumnConfig> = if self.databox.columns.is_empty() {
            vec![ColumnConfig::new("title").with_title("Title")]
        } else {
            self.databox.columns.clone()
        };

        configs
            .into_iter()
            .enumerate()
            .map(|(num, config)| {
                let title = config
                    .title
                    .clone()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| config.column.to_title_case());
                ResolvedColumn {
                    id: num.to_string(),
                    column: config.column,
                    title,
                    refs: config.refs,
                    code: config.code,
                    converter: config.converter,
                    sortable: false,
                }
            })
            .collect()
    }

    /// The inflated parameters, memoized per view.
    pub fn params(&self) -> &InflatedParams {
        self.inflated
            .get_or_init(|| engine::inflate(&self.databox.params, &self.databox.query, &self.sandbox))
    }

    /// The box's parameters plus the grid's trailing auto-append row.
    pub fn params_grid(&self) -> Vec<Parameter> {
        let mut params = self.databox.params.clone();
        params.push(Parameter::empty());
        params
    }

    /// Effective start of the date range, ISO or empty.
    pub fn date_from(&self) -> String {
        self.databox
            .date_from()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// Effective end of the date range, clamped to the start, ISO or empty.
    pub fn date_to(&self) -> String {
        self.databox
            .date_to()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// Assemble the query that actually runs: placeholders substituted,
    /// date range bound, limit applied. Exports ignore the limit.
    pub fn effective_query(&self, export: bool) -> CatalogQuery {
        let mut query = engine::substitute_placeholders(&self.databox.query, self.params());
        query.date_from = self.databox.date_from();
        query.date_to = self.databox.date_to();
        query.limit = if export { 0 } else { self.databox.limit };
        query
    }

    /// The matched records, listing limit applied.
    pub fn records(&self) -> Vec<&'a Record> {
        self.catalog.search(&self.effective_query(false))
    }

    /// The matched records without the listing limit.
    pub fn all_records(&self) -> Vec<&'a Record> {
        self.catalog.search(&self.effective_query(true))
    }

    /// Column titles, in listing order.
    pub fn header(&self) -> Vec<String> {
        self.columns().into_iter().map(|c| c.title).collect()
    }

    /// Render the cells of one record.
    pub fn row(&self, record: &Record) -> Vec<Cell> {
        self.columns()
            .iter()
            .map(|column| self.cell(record, column))
            .collect()
    }

    /// All rows of the listing (limit applied unless exporting).
    pub fn rows(&self, export: bool) -> Vec<Vec<Cell>> {
        let records = if export {
            self.all_records()
        } else {
            self.records()
        };
        records.into_iter().map(|r| self.row(r)).collect()
    }

    /// Compute one cell.
    fn cell(&self, record: &Record, column: &ResolvedColumn) -> Cell {
        // the raw field value; `parent` resolves the containment parent
        let mut value = if column.column == "parent" {
            match self.catalog.parent_of(record) {
                Some(parent) => Value::Ref(parent.uid),
                None => Value::Null,
            }
        } else {
            record.get(&column.column)
        };

        // reference columns walk the configured attribute path
        let mut context = record;
        if let Some(linked) = self.catalog.deref(&value) {
            let refs = effective_refs(&column.refs);
            let resolved = self.resolve_reference(linked, &refs);
            value = resolved.get(refs.last().map(String::as_str).unwrap_or(DEFAULT_REF));
            context = resolved;
        }

        // inline code recomputes the cell in the sandbox
        if let Some(code) = &column.code {
            if !code.is_empty() {
                value = self.execute_code(code, record, context);
            }
        }

        let display = column
            .converter
            .as_deref()
            .filter(|name| !name.is_empty())
            .and_then(|name| self.converters.apply(name, context, &column.id, &value))
            .unwrap_or_else(|| value.to_display());

        Cell { value, display }
    }

    /// Walk an attribute path through linked records.
    ///
    /// Each hop whose field value is a link moves to the linked record;
    /// a hop that is not a link stays put.
    fn resolve_reference<'c>(&'c self, mut model: &'c Record, refs: &[String]) -> &'c Record {
        for name in refs {
            let value = model.get(name);
            if let Some(linked) = self.catalog.deref(&value) {
                model = linked;
            }
        }
        model
    }

    /// Evaluate a column code snippet against a record.
    fn execute_code(&self, code: &str, record: &Record, context: &Record) -> Value {
        let params = self.params();
        self.sandbox.eval_expr(code, |lua, env| {
            env.set("parameters", self.sandbox.value_table(params.iter())?)?;
            env.set(
                "query",
                engine::params::query_table(lua, &self.databox.query)?,
            )?;
            env.set("obj", record_table(lua, record)?)?;
            env.set("context", record_table(lua, context)?)?;
            env.set("model", record_table(lua, context)?)?;
            env.set("uid", record.uid.to_string())?;
            Ok(())
        })
    }

    /// The configured reference-column chain of a column, for the column
    /// controls. Walks the schemas from the column's field through
    /// reference field types; when the last configured hop is itself a
    /// reference, the default title hop of its target is appended.
    pub fn reference_columns(&self, id: &str) -> Vec<ReferenceColumn> {
        let mut chain = Vec::new();

        let columns = self.columns();
        let Some(column) = columns.iter().find(|c| c.id == id) else {
            return chain;
        };
        let Some(content_type) = self.databox.query.content_type.as_deref() else {
            return chain;
        };

        let schemas = self.catalog.schemas();
        let Some(field) = schemas.field(content_type, &column.column) else {
            return chain;
        };
        if !field.is_reference() {
            return chain;
        }

        let refs = effective_refs(&column.refs);
        info!("Reference columns '{}' -> {:?}", id, refs);

        let Some(mut ref_type) = field.ref_type().map(str::to_string) else {
            return chain;
        };

        for (num, name) in refs.iter().enumerate() {
            let Some(field) = schemas.field(&ref_type, name).cloned() else {
                continue;
            };

            chain.push(ReferenceColumn {
                key: name.clone(),
                content_type: ref_type.clone(),
                fields: schemas.field_names(&ref_type),
            });

            let last = num == refs.len() - 1;
            match field.ref_type() {
                Some(next) => {
                    ref_type = next.to_string();
                    if last {
                        chain.push(ReferenceColumn {
                            key: DEFAULT_REF.to_string(),
                            content_type: ref_type.clone(),
                            fields: schemas.field_names(&ref_type),
                        });
                    }
                }
                // not a reference anymore
                None => break,
            }
        }

        chain
    }
}

fn effective_refs(refs: &[String]) -> Vec<String> {
    if refs.is_empty() {
        vec![DEFAULT_REF.to_string()]
    } else {
        refs.to_vec()
    }
}

/// The Lua binding of a record: its fields plus `uid` and `content_type`.
fn record_table(lua: &mlua::Lua, record: &Record) -> mlua::Result<mlua::Table> {
    let table = lua.create_table()?;
    for (name, value) in &record.fields {
        table.set(name.as_str(), crate::engine::sandbox::to_lua(lua, value)?)?;
    }
    table.set("uid", record.uid.to_string())?;
    table.set("content_type", record.content_type.as_str())?;
    Ok(table)
}
