//! Parameter inflation.
//!
//! Literal parameters are coerced directly. Expression parameters may
//! reference each other (`parameters.name`), so they are ordered over a
//! dependency graph before evaluation: dependencies first, dependents
//! after. A recursive reference does not abort inflation; every
//! parameter inside the cycle, and every parameter downstream of it,
//! receives an error value naming the recursive call instead.

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use tracing::warn;

use super::sandbox::Sandbox;
use crate::catalog::CatalogQuery;
use crate::convert::convert_to;
use crate::model::Parameter;
use crate::value::Value;

/// Pattern for parameter references inside expression source:
/// `parameters.name`, `parameters["name"]` or `parameters['name']`.
static PARAM_REF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\bparameters\s*(?:\.\s*([A-Za-z_][A-Za-z0-9_]*)|\[\s*"([^"]+)"\s*\]|\[\s*'([^']+)'\s*\])"#,
    )
    .unwrap()
});

/// Extract the parameter names an expression references, in source order,
/// deduplicated.
pub fn extract_param_refs(source: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for caps in PARAM_REF_PATTERN.captures_iter(source) {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().to_string());
        if let Some(name) = name {
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
    }
    names
}

/// Inflated parameter values, in evaluation order.
#[derive(Debug, Clone, Default)]
pub struct InflatedParams {
    order: Vec<String>,
    values: HashMap<String, Value>,
}

impl InflatedParams {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Name/value pairs in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.order
            .iter()
            .filter_map(|name| self.values.get(name).map(|v| (name.as_str(), v)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn set(&mut self, name: &str, value: Value) {
        if !self.values.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.values.insert(name.to_string(), value);
    }
}

/// The evaluation plan: parameter indexes in inflation order, plus the
/// error attached to each parameter poisoned by a recursive reference.
#[derive(Debug)]
pub struct InflationPlan {
    pub order: Vec<usize>,
    pub errors: HashMap<String, String>,
}

/// Build the inflation plan for a parameter list.
///
/// Literals come first in definition order; they are always available and
/// can never be part of a cycle. Expression parameters follow in
/// topological order of their mutual references. Parameters with empty
/// names (the grid's trailing auto-append row) are skipped.
pub fn build_plan(params: &[Parameter]) -> InflationPlan {
    let mut order = Vec::new();
    let mut errors = HashMap::new();

    let literal_names: HashSet<&str> = params
        .iter()
        .filter(|p| !p.kind.is_expression())
        .map(|p| p.name.as_str())
        .collect();

    // literals first, definition order
    for (idx, param) in params.iter().enumerate() {
        if !param.kind.is_expression() && !param.name.is_empty() {
            order.push(idx);
        }
    }

    // dependency graph over expression parameters only
    let mut graph: DiGraph<usize, ()> = DiGraph::new();
    let mut node_of: HashMap<&str, NodeIndex> = HashMap::new();
    for (idx, param) in params.iter().enumerate() {
        if param.kind.is_expression() && !param.name.is_empty() {
            let node = graph.add_node(idx);
            node_of.insert(param.name.as_str(), node);
        }
    }
    for param in params.iter().filter(|p| p.kind.is_expression()) {
        let Some(&dependent) = node_of.get(param.name.as_str()) else {
            continue;
        };
        for dep in extract_param_refs(&param.value) {
            if literal_names.contains(dep.as_str()) {
                continue;
            }
            // unknown names are left for the sandbox to resolve to nil
            if let Some(&dependency) = node_of.get(dep.as_str()) {
                graph.add_edge(dependency, dependent, ());
            }
        }
    }

    // cycles: every member gets an error naming the recursive call
    for scc in tarjan_scc(&graph) {
        let cyclic = scc.len() > 1
            || graph
                .edges_connecting(scc[0], scc[0])
                .next()
                .is_some();
        if !cyclic {
            continue;
        }
        let members: HashSet<NodeIndex> = scc.iter().copied().collect();
        for &node in &scc {
            let name = params[graph[node]].name.as_str();
            let partner = graph
                .neighbors_directed(node, Direction::Outgoing)
                .find(|n| members.contains(n))
                .map(|n| params[graph[n]].name.as_str())
                .unwrap_or(name);
            let message =
                format!("Parameter [{name}] contains [{partner}] recursive call");
            warn!("{message}");
            errors.insert(name.to_string(), message);
        }
    }

    // poison every parameter downstream of a cycle
    let mut pending: Vec<NodeIndex> = graph
        .node_indices()
        .filter(|&n| errors.contains_key(params[graph[n]].name.as_str()))
        .collect();
    while let Some(node) = pending.pop() {
        let message = errors[params[graph[node]].name.as_str()].clone();
        for dependent in graph.neighbors_directed(node, Direction::Outgoing) {
            let name = params[graph[dependent]].name.as_str();
            if !errors.contains_key(name) {
                errors.insert(name.to_string(), message.clone());
                pending.push(dependent);
            }
        }
    }

    // topological order over the clean expression parameters
    let mut clean: DiGraph<usize, ()> = DiGraph::new();
    let mut clean_of: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    for node in graph.node_indices() {
        if !errors.contains_key(params[graph[node]].name.as_str()) {
            clean_of.insert(node, clean.add_node(graph[node]));
        }
    }
    for edge in graph.edge_indices() {
        let (a, b) = graph.edge_endpoints(edge).expect("edge endpoints");
        if let (Some(&ca), Some(&cb)) = (clean_of.get(&a), clean_of.get(&b)) {
            clean.add_edge(ca, cb, ());
        }
    }
    let sorted = toposort(&clean, None).expect("cyclic parameters were removed");
    order.extend(sorted.into_iter().map(|n| clean[n]));

    // errored parameters still get entries, in definition order
    for (idx, param) in params.iter().enumerate() {
        if errors.contains_key(param.name.as_str()) {
            order.push(idx);
        }
    }

    InflationPlan { order, errors }
}

/// Inflate a parameter list against a query.
///
/// Expressions see `parameters` (the values inflated so far) and `query`
/// (the filter map, with the content type under `content_type`).
pub fn inflate(params: &[Parameter], query: &CatalogQuery, sandbox: &Sandbox) -> InflatedParams {
    let plan = build_plan(params);
    let mut inflated = InflatedParams::default();

    for idx in plan.order {
        let param = &params[idx];
        if !param.kind.is_expression() {
            inflated.set(&param.name, convert_to(&param.value, param.kind));
            continue;
        }

        if let Some(message) = plan.errors.get(param.name.as_str()) {
            inflated.set(&param.name, Value::Error(message.clone()));
            continue;
        }

        let value = sandbox.eval_expr(&param.value, |lua, env| {
            env.set("parameters", sandbox.value_table(inflated.iter())?)?;
            env.set("query", query_table(lua, query)?)?;
            Ok(())
        });
        inflated.set(&param.name, value);
    }

    inflated
}

/// Substitute `$name` placeholders in string filter values.
///
/// Unknown names are left untouched; an errored parameter substitutes its
/// error value, which matches nothing.
pub fn substitute_placeholders(query: &CatalogQuery, params: &InflatedParams) -> CatalogQuery {
    let mut resolved = query.clone();
    for value in resolved.filters.values_mut() {
        if let Value::Str(s) = value {
            if let Some(name) = s.strip_prefix('$') {
                if let Some(param) = params.get(name) {
                    *value = param.clone();
                }
            }
        }
    }
    resolved
}

/// The `query` binding: the filter map, content type included.
pub(crate) fn query_table(lua: &mlua::Lua, query: &CatalogQuery) -> mlua::Result<mlua::Table> {
    let table = lua.create_table()?;
    for (field, value) in &query.filters {
        table.set(field.as_str(), super::sandbox::to_lua(lua, value)?)?;
    }
    if let Some(content_type) = &query.content_type {
        table.set("content_type", content_type.as_str())?;
    }
    Ok(table)
}
