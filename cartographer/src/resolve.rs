//! Maps named caller arguments onto queries and dispatches lookups.
//!
//! Argument conventions:
//! - scalars filter the root by equality;
//! - a list under an outgoing relation name becomes one related query whose
//!   filters are `In` over every key of every element;
//! - a map under an incoming relation name becomes one related query whose
//!   filters are `Equal` over its keys;
//! - `limit` and `offset` paginate collection lookups and never filter.

use crate::config::{DEFAULT_LIMIT, DEFAULT_OFFSET};
use crate::domain::{self, Country, Identified, Region};
use crate::error::{Error, Result};
use crate::repository::Repository;
use cartographer_api::{GraphDriver, Value};
use cartographer_query::{Condition, Direction, Lookup, Query};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::{error, warn};

/// Named arguments supplied by the caller for one field.
pub type Args = BTreeMap<String, Value>;

pub const LIMIT_ARG: &str = "limit";
pub const OFFSET_ARG: &str = "offset";

/// Relation argument tables a root label accepts.
#[derive(Debug, Clone, Copy)]
pub struct Relations {
    pub incoming: &'static [(&'static str, &'static str)],
    pub outgoing: &'static [(&'static str, &'static str)],
}

impl Relations {
    pub const COUNTRY: Relations = Relations {
        incoming: &[],
        outgoing: domain::OUTGOING,
    };

    pub const REGION: Relations = Relations {
        incoming: domain::INCOMING,
        outgoing: &[],
    };

    pub fn for_label(label: &str) -> Self {
        if label == domain::COUNTRY_NODE {
            Self::COUNTRY
        } else {
            Self::REGION
        }
    }
}

/// Builds a point lookup: every argument except `limit` and `offset` filters
/// the root by equality.
pub fn point_query(label: &str, args: &Args) -> Result<Query> {
    let mut query = Query::new(label);
    for (key, value) in args {
        if key == LIMIT_ARG || key == OFFSET_ARG {
            continue;
        }
        query.filter(key.as_str(), Condition::Equal, value.clone());
    }

    if query.filters().is_empty() {
        return Err(Error::validation(query.alias(), "need min one argument"));
    }
    Ok(query)
}

/// Builds a collection lookup ordered by name.
///
/// An argument named after the root label itself is ignored.
pub fn collection_query(label: &str, args: &Args, relations: Relations) -> Result<Query> {
    let mut query = Query::new(label);
    let alias = query.alias();

    let offset = pagination(&alias, args, OFFSET_ARG, DEFAULT_OFFSET)?;
    let limit = pagination(&alias, args, LIMIT_ARG, DEFAULT_LIMIT)?;
    query
        .slice(offset, limit)
        .ordering("name", Direction::Ascending);

    for (key, value) in args {
        if key == LIMIT_ARG || key == OFFSET_ARG || *key == alias {
            continue;
        }
        match value {
            Value::List(items) => {
                if let Some(node) = domain::relation_label(relations.outgoing, key) {
                    let mut related = Query::new(node);
                    for fields in items.iter().filter_map(Value::as_map) {
                        for (field, v) in fields {
                            related.filter(field.as_str(), Condition::In, v.clone());
                        }
                    }
                    query.outgoing(related);
                }
            }
            Value::Map(fields) => {
                if let Some(node) = domain::relation_label(relations.incoming, key) {
                    let mut related = Query::new(node);
                    for (field, v) in fields {
                        related.filter(field.as_str(), Condition::Equal, v.clone());
                    }
                    query.incoming(related);
                }
            }
            _ => {
                query.filter(key.as_str(), Condition::Equal, value.clone());
            }
        }
    }

    Ok(query)
}

fn pagination(alias: &str, args: &Args, name: &str, default: u64) -> Result<u64> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Int(n)) => Ok(u64::try_from(*n).unwrap_or(0)),
        Some(_) => Err(Error::validation(alias, format!("{name} must be an integer"))),
    }
}

/// A resolvable field: which label it selects and how many roots it yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub lookup: Lookup,
}

const FIELDS: &[(&str, &str, &str)] = &[
    ("country", "countries", domain::COUNTRY_NODE),
    ("province", "provinces", domain::PROVINCE_NODE),
    ("city", "cities", domain::CITY_NODE),
    ("regency", "regencies", domain::REGENCY_NODE),
    ("district", "districts", domain::DISTRICT_NODE),
    ("village", "villages", domain::VILLAGE_NODE),
];

impl Field {
    /// Resolves a field name such as `city` or `cities`.
    pub fn parse(name: &str) -> Option<Self> {
        FIELDS.iter().find_map(|&(one, many, label)| {
            if name == one {
                Some(Field {
                    label,
                    lookup: Lookup::Point,
                })
            } else if name == many {
                Some(Field {
                    label,
                    lookup: Lookup::Collection,
                })
            } else {
                None
            }
        })
    }

    /// Builds the query this field issues for `args`.
    pub fn query(&self, args: &Args) -> Result<Query> {
        match self.lookup {
            Lookup::Point => point_query(self.label, args),
            Lookup::Collection => collection_query(self.label, args, Relations::for_label(self.label)),
        }
    }
}

/// Dispatches fields to the repository and logs unexpected failures.
#[derive(Debug)]
pub struct Resolver<D> {
    repository: Repository<D>,
}

impl<D: GraphDriver> Resolver<D> {
    pub fn new(repository: Repository<D>) -> Self {
        Self { repository }
    }

    /// Looks up one country and decodes its flag.
    pub fn country(&self, args: &Args) -> Result<Country> {
        let mut country: Country = self.find(domain::COUNTRY_NODE, args)?;
        decode_flag(&mut country)?;
        Ok(country)
    }

    pub fn countries(&self, args: &Args) -> Result<Vec<Country>> {
        let mut countries: Vec<Country> =
            self.find_all(domain::COUNTRY_NODE, args, Relations::COUNTRY)?;
        for country in &mut countries {
            decode_flag(country)?;
        }
        Ok(countries)
    }

    pub fn region(&self, label: &str, args: &Args) -> Result<Region> {
        self.find(label, args)
    }

    pub fn regions(&self, label: &str, args: &Args) -> Result<Vec<Region>> {
        self.find_all(label, args, Relations::REGION)
    }

    /// Resolves `field` and returns its result as JSON.
    pub fn resolve(&self, field: Field, args: &Args) -> Result<serde_json::Value> {
        let is_country = field.label == domain::COUNTRY_NODE;
        match (field.lookup, is_country) {
            (Lookup::Point, true) => to_json(self.country(args)?),
            (Lookup::Collection, true) => to_json(self.countries(args)?),
            (Lookup::Point, false) => to_json(self.region(field.label, args)?),
            (Lookup::Collection, false) => to_json(self.regions(field.label, args)?),
        }
    }

    fn find<T: DeserializeOwned>(&self, label: &str, args: &Args) -> Result<T> {
        let query = point_query(label, args).inspect_err(|_| {
            warn!(node = label, args = ?args, "query is empty");
        })?;

        self.repository.find(&query).inspect_err(|err| {
            if !err.kind().is_recoverable() {
                error!(query = %describe(&query), error = %err, "failed find {label} from storage");
            }
        })
    }

    fn find_all<T: DeserializeOwned + Identified>(
        &self,
        label: &str,
        args: &Args,
        relations: Relations,
    ) -> Result<Vec<T>> {
        let query = collection_query(label, args, relations).inspect_err(|err| {
            warn!(node = label, args = ?args, error = %err, "invalid arguments");
        })?;

        self.repository.find_all(&query).inspect_err(|err| {
            error!(query = %describe(&query), error = %err, "failed find {label} from storage");
        })
    }
}

fn decode_flag(country: &mut Country) -> Result<()> {
    country.decode_flag().inspect_err(|err| {
        error!(id = %country.id, error = %err, "failed decode country flag");
    })?;
    Ok(())
}

fn to_json<T: Serialize>(value: T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

fn describe(query: &Query) -> String {
    serde_json::to_string(query).unwrap_or_else(|_| query.node().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use cartographer_query::compile;

    fn args(pairs: Vec<(&str, Value)>) -> Args {
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    fn map(pairs: Vec<(&str, Value)>) -> Value {
        Value::Map(args(pairs))
    }

    #[test]
    fn point_query_needs_an_argument() {
        let err = point_query("City", &Args::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(err, Error::Validation { ref key, .. } if key == "city"));
    }

    #[test]
    fn point_query_filters_by_equality() {
        let q = point_query("Country", &args(vec![("ISO3166Alpha2", "ID".into())])).unwrap();
        assert_eq!(q.filters().len(), 1);
        assert_eq!(q.filters()[0].condition, Condition::Equal);
        assert_eq!(q.limit(), 0);
    }

    #[test]
    fn point_query_ignores_pagination() {
        let q = Field::parse("province")
            .unwrap()
            .query(&args(vec![
                ("code", "34".into()),
                ("limit", Value::Int(5)),
                ("offset", Value::Int(1)),
            ]))
            .unwrap();
        assert_eq!(q.filters().len(), 1);
        let compiled = compile(&q);
        assert_eq!(compiled.where_clause, "WHERE province.code = $`province.code`");
        assert_eq!(compiled.params.len(), 1);
    }

    #[test]
    fn point_query_with_only_pagination_is_empty() {
        let err = point_query("Village", &args(vec![("limit", Value::Int(1))])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "need min one argument");
    }

    #[test]
    fn collection_defaults() {
        let q = collection_query("Province", &Args::new(), Relations::REGION).unwrap();
        assert_eq!((q.offset(), q.limit()), (0, 25));
        assert_eq!(q.orderings()[0].field, "name");
        assert_eq!(q.orderings()[0].direction, Direction::Ascending);
        assert!(q.filters().is_empty());
    }

    #[test]
    fn pagination_is_not_a_filter() {
        let q = collection_query(
            "City",
            &args(vec![("limit", Value::Int(5)), ("offset", Value::Int(10))]),
            Relations::REGION,
        )
        .unwrap();
        assert_eq!((q.offset(), q.limit()), (10, 5));
        assert!(q.filters().is_empty());
    }

    #[test]
    fn negative_pagination_is_omitted() {
        let q = collection_query("City", &args(vec![("offset", Value::Int(-3))]), Relations::REGION)
            .unwrap();
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn non_integer_pagination_is_rejected() {
        let err = collection_query("City", &args(vec![("limit", "ten".into())]), Relations::REGION)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn incoming_map_becomes_related_query() {
        let q = collection_query(
            "City",
            &args(vec![
                ("province", map(vec![("code", "34".into())])),
                ("city", map(vec![("code", "3471".into())])),
                ("code", "3471".into()),
            ]),
            Relations::REGION,
        )
        .unwrap();

        assert_eq!(q.incomings().len(), 1);
        assert_eq!(q.incomings()[0].node(), "Province");
        assert_eq!(q.incomings()[0].filters()[0].condition, Condition::Equal);
        assert_eq!(q.filters().len(), 1);

        let compiled = compile(&q);
        assert_eq!(compiled.match_clause, "(city:City), (city)<-[*]-(province:Province)");
    }

    #[test]
    fn outgoing_list_becomes_in_filters() {
        let currencies = Value::List(vec![
            map(vec![("id", "e81f".into())]),
            map(vec![("id", "a0b1".into())]),
        ]);
        let q = collection_query(
            "Country",
            &args(vec![("currencies", currencies), ("dialCode", "1".into())]),
            Relations::COUNTRY,
        )
        .unwrap();

        assert_eq!(q.outgoings().len(), 1);
        let compiled = compile(&q);
        assert_eq!(
            compiled.where_clause,
            "WHERE country.dialCode = $`country.dialCode` AND currency.id IN $`currency.id`"
        );
        assert_eq!(
            compiled.params.get("currency.id"),
            Some(&Value::List(vec!["e81f".into(), "a0b1".into()]))
        );
    }

    #[test]
    fn unknown_relations_are_ignored() {
        let q = collection_query(
            "Country",
            &args(vec![
                ("province", map(vec![("code", "34".into())])),
                ("languages", Value::List(vec![map(vec![("id", "en".into())])])),
            ]),
            Relations::COUNTRY,
        )
        .unwrap();
        assert!(q.incomings().is_empty());
        assert!(q.outgoings().is_empty());
        assert!(q.filters().is_empty());
    }

    #[test]
    fn field_names() {
        assert_eq!(
            Field::parse("cities"),
            Some(Field {
                label: "City",
                lookup: Lookup::Collection
            })
        );
        assert_eq!(Field::parse("country").map(|f| f.lookup), Some(Lookup::Point));
        assert_eq!(Field::parse("continent"), None);
    }
}
