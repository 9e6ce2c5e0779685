use crate::compiler::{CompiledQuery, compile};
use crate::model::Query;
use cartographer_api::Params;
use serde::Serialize;
use std::fmt;

/// Procedure that collapses matched paths into one nested tree per root.
pub const TREE_PROCEDURE: &str = "apoc.convert.toTree";

/// Shape of result a statement is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
    /// Exactly one root node, with its direct neighbours folded in.
    /// Orderings and pagination are not rendered.
    Point,
    /// Zero or more root nodes, ordered and paginated.
    Collection,
}

/// A complete statement ready for the store: text plus bound parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub text: String,
    pub params: Params,
}

impl Statement {
    /// Compiles `query` and wraps it for `lookup`.
    ///
    /// ```text
    /// MATCH p = (country:Country)-[*0..1]->()
    /// WHERE country.ISO3166Alpha2 = $`country.ISO3166Alpha2`
    /// WITH COLLECT(p) AS v, country AS node
    /// CALL apoc.convert.toTree(v) YIELD value
    /// RETURN value, node
    /// ```
    pub fn render(lookup: Lookup, query: &Query) -> Self {
        let alias = query.alias();
        let CompiledQuery {
            match_clause,
            where_clause,
            order_clause,
            params,
        } = compile(query);

        let lines = match lookup {
            Lookup::Point => vec![
                format!("MATCH p = {match_clause}-[*0..1]->()"),
                where_clause,
                format!("WITH COLLECT(p) AS v, {alias} AS node"),
                format!("CALL {TREE_PROCEDURE}(v) YIELD value"),
                "RETURN value, node".to_string(),
            ],
            Lookup::Collection => vec![
                format!("MATCH p = {match_clause}"),
                where_clause,
                format!("WITH p, {alias}"),
                order_clause,
                "WITH COLLECT(p) AS val".to_string(),
                format!("CALL {TREE_PROCEDURE}(val) YIELD value"),
                "RETURN COLLECT(value) AS value".to_string(),
            ],
        };

        let text = lines
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        Self { text, params }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
