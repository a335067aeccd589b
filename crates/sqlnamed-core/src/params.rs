//! Sources of named parameter values.
//!
//! Values reach a [`Parser`](crate::Parser) as `(name, value)` pairs. They
//! can come from a map, from any type implementing [`NamedParams`] (usually
//! through `#[derive(Params)]`), or from a `serde::Serialize` record via
//! [`record_params`].

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::Serialize;

use crate::error::Result;
use crate::record::RecordSerializer;
use crate::value::{SqlValue, ToSqlValue};

/// Trait for types that supply named parameter values.
///
/// Implemented by `#[derive(Params)]` for structs with named fields: each
/// field is offered under its own name, or under the name given with
/// `#[param(name = "...")]`.
///
/// ```rust
/// use sqlnamed_core::{NamedParams, SqlValue};
///
/// struct Lookup {
///     id: i64,
/// }
///
/// impl NamedParams for Lookup {
///     fn visit_params(&self, visitor: &mut dyn FnMut(&str, SqlValue)) {
///         visitor("id", SqlValue::Int(self.id));
///     }
/// }
/// ```
pub trait NamedParams {
    /// Calls `visitor` once for every `(name, value)` pair.
    fn visit_params(&self, visitor: &mut dyn FnMut(&str, SqlValue));

    /// Collects the pairs into a vector.
    fn to_param_pairs(&self) -> Vec<(String, SqlValue)> {
        let mut pairs = Vec::new();
        self.visit_params(&mut |name, value| pairs.push((name.to_string(), value)));
        pairs
    }
}

impl<T: NamedParams + ?Sized> NamedParams for &T {
    fn visit_params(&self, visitor: &mut dyn FnMut(&str, SqlValue)) {
        (**self).visit_params(visitor);
    }
}

impl<K, V, S> NamedParams for HashMap<K, V, S>
where
    K: AsRef<str>,
    V: ToSqlValue + Clone,
    S: BuildHasher,
{
    fn visit_params(&self, visitor: &mut dyn FnMut(&str, SqlValue)) {
        for (name, value) in self {
            visitor(name.as_ref(), value.clone().to_sql_value());
        }
    }
}

impl<K, V> NamedParams for BTreeMap<K, V>
where
    K: AsRef<str>,
    V: ToSqlValue + Clone,
{
    fn visit_params(&self, visitor: &mut dyn FnMut(&str, SqlValue)) {
        for (name, value) in self {
            visitor(name.as_ref(), value.clone().to_sql_value());
        }
    }
}

/// Reads the fields of a serializable record as named parameter values.
///
/// Structs and maps are records: each field or entry becomes one pair, in
/// serialization order, so `#[serde(rename = "...")]` overrides a field's
/// parameter name and `#[serde(skip)]` leaves it out. A unit struct is a
/// record with no fields. Field values are encoded with `serde_json`.
///
/// # Errors
///
/// Returns [`TypeMismatch`](crate::ParamError::TypeMismatch) if the value
/// is not a record (numbers, strings, sequences, unit values, `None`, enum
/// variants), and [`Serialization`](crate::ParamError::Serialization) if its
/// `Serialize` implementation fails.
pub fn record_params<T: Serialize + ?Sized>(record: &T) -> Result<Vec<(String, SqlValue)>> {
    record.serialize(RecordSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParamError;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Filter {
        name: String,
        #[serde(rename = "min_age")]
        age: i32,
        #[serde(skip)]
        #[allow(dead_code)]
        internal: bool,
    }

    #[test]
    fn test_record_params_reads_fields() {
        let filter = Filter {
            name: String::from("ann"),
            age: 30,
            internal: true,
        };
        let mut pairs = record_params(&filter).unwrap();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            pairs,
            vec![
                (String::from("min_age"), SqlValue::Int(30)),
                (String::from("name"), SqlValue::Text(String::from("ann"))),
            ]
        );
    }

    #[test]
    fn test_record_params_rejects_scalars() {
        assert!(matches!(
            record_params(&42),
            Err(ParamError::TypeMismatch { found: "number" })
        ));
        assert!(matches!(
            record_params("text"),
            Err(ParamError::TypeMismatch { found: "string" })
        ));
        assert!(matches!(
            record_params(&vec![1, 2]),
            Err(ParamError::TypeMismatch { found: "sequence" })
        ));
        assert!(matches!(
            record_params(&None::<Filter>),
            Err(ParamError::TypeMismatch { found: "null" })
        ));
    }

    #[test]
    fn test_hash_map_params() {
        let mut map = HashMap::new();
        map.insert("a", 1_i64);
        let pairs = map.to_param_pairs();
        assert_eq!(pairs, vec![(String::from("a"), SqlValue::Int(1))]);
    }

    #[test]
    fn test_btree_map_params_in_key_order() {
        let mut map = BTreeMap::new();
        map.insert(String::from("b"), "two");
        map.insert(String::from("a"), "one");
        let names: Vec<String> = map.to_param_pairs().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
