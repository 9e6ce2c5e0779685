//! Translates a [`Query`] into Cypher clause fragments and bound parameters.

use crate::model::{Condition, Query};
use cartographer_api::{Params, Value};

/// Clause fragments for one query.
///
/// `where_clause` includes its `WHERE` keyword and is empty when the query
/// has no filters. `order_clause` holds the `ORDER BY`, `SKIP` and `LIMIT`
/// fragments, space separated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompiledQuery {
    pub match_clause: String,
    pub where_clause: String,
    pub order_clause: String,
    pub params: Params,
}

/// Compiles `query`. Pure and deterministic: the same query always yields
/// byte-identical clauses and parameters.
///
/// Patterns share the root variable, so the comma-joined match is one
/// connected pattern anchored on the root rather than a cartesian product.
///
/// Parameters are keyed `alias.field` across the root and every relation.
/// Two filters on the same key share one binding:
/// - `Equal` always emits `alias.field = $key` and rebinds the key.
/// - `In` emits `alias.field IN $key` only when the key is unbound; when the
///   key already holds a list the value is appended to it, and when it holds
///   a scalar (bound by an earlier `Equal`) the value is dropped.
pub fn compile(query: &Query) -> CompiledQuery {
    let alias = query.alias();

    let mut patterns = vec![format!("({alias}:{})", query.node())];
    let mut predicates = Vec::new();
    let mut params = Params::new();

    compile_filters(query, &mut predicates, &mut params);

    for related in query.incomings() {
        patterns.push(format!(
            "({alias})<-[*]-({}:{})",
            related.alias(),
            related.node()
        ));
        compile_filters(related, &mut predicates, &mut params);
    }

    for related in query.outgoings() {
        patterns.push(format!(
            "({alias})-[*]->({}:{})",
            related.alias(),
            related.node()
        ));
        compile_filters(related, &mut predicates, &mut params);
    }

    let mut order = Vec::with_capacity(query.orderings().len() + 2);
    for ordering in query.orderings() {
        order.push(format!(
            "ORDER BY {alias}.{} {}",
            ordering.field,
            ordering.direction.keyword()
        ));
    }
    if query.offset() > 0 {
        order.push(format!("SKIP {}", query.offset()));
    }
    if query.limit() > 0 {
        order.push(format!("LIMIT {}", query.limit()));
    }

    let where_clause = if predicates.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", predicates.join(" AND "))
    };

    CompiledQuery {
        match_clause: patterns.join(", "),
        where_clause,
        order_clause: order.join(" "),
        params,
    }
}

fn compile_filters(query: &Query, predicates: &mut Vec<String>, params: &mut Params) {
    let alias = query.alias();

    for filter in query.filters() {
        let key = format!("{alias}.{}", filter.field);
        match filter.condition {
            Condition::Equal => {
                predicates.push(format!("{alias}.{} = $`{key}`", filter.field));
                params.insert(key, filter.value.clone());
            }
            Condition::In => match params.get_mut(&key) {
                Some(Value::List(values)) => values.push(filter.value.clone()),
                // Bound to a scalar by an earlier Equal on the same key.
                Some(_) => {}
                None => {
                    predicates.push(format!("{alias}.{} IN $`{key}`", filter.field));
                    params.insert(key, Value::List(vec![filter.value.clone()]));
                }
            },
        }
    }
}
