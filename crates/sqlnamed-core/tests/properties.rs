//! Invariants that hold for every query.

mod common;
use common::*;

use sqlnamed_core::scanner::PARAMETER_MARKER;
use sqlnamed_core::{Parser, SqlValue};

#[test]
fn query_without_marker_is_unchanged() {
    for sql in CORPUS.iter().filter(|s| !s.contains(PARAMETER_MARKER)) {
        let p = parse(sql);
        assert_eq!(p.parsed_query(), *sql);
        assert!(p.parsed_parameters().is_empty());
    }
}

#[test]
fn placeholders_match_occurrences_and_slots() {
    for sql in CORPUS {
        let p = parse(sql);
        let occurrences = p.occurrences().len();
        assert_eq!(
            count_dollar_placeholders(p.parsed_query()),
            occurrences,
            "placeholder count for {sql:?}"
        );
        assert_eq!(p.parsed_parameters().len(), occurrences);
        assert_eq!(p.positions().slot_count(), occurrences);
    }
}

#[test]
fn slots_partition_the_argument_list() {
    for sql in CORPUS {
        let p = parse(sql);
        let mut all: Vec<usize> = p
            .positions()
            .iter()
            .flat_map(|(_, slots)| slots.iter().copied())
            .collect();
        all.sort_unstable();
        let expected: Vec<usize> = (0..p.occurrences().len()).collect();
        assert_eq!(all, expected, "slots for {sql:?}");
    }
}

#[test]
fn slots_follow_occurrence_order() {
    for sql in CORPUS {
        let p = parse(sql);
        for (slot, occurrence) in p.occurrences().iter().enumerate() {
            assert_eq!(occurrence.slot, slot);
            let slots = p.positions().occurrences_of(&occurrence.name);
            assert!(slots.windows(2).all(|w| w[0] < w[1]));
            assert!(slots.contains(&slot));
        }
    }
}

#[test]
fn occurrence_spans_point_at_markers() {
    for sql in CORPUS {
        let p = parse(sql);
        for occurrence in p.occurrences() {
            let token = occurrence.span.slice(sql).unwrap();
            assert!(token.starts_with(PARAMETER_MARKER));
            assert_eq!(&token[1..], occurrence.name);
        }
    }
}

#[test]
fn assigning_every_name_completes_the_store() {
    for sql in CORPUS {
        let mut p = parse(sql);
        let names: Vec<String> = p.parameter_names().map(String::from).collect();
        for (i, name) in names.iter().enumerate() {
            p.set_value(name, i64::try_from(i).unwrap());
        }
        assert!(p.unset_parameters().is_empty(), "unset in {sql:?}");
        assert!(p.bound_parameters().is_ok());
        for occurrence in p.occurrences() {
            let i = names.iter().position(|n| *n == occurrence.name).unwrap();
            assert_eq!(
                p.parsed_parameters()[occurrence.slot],
                Some(SqlValue::Int(i64::try_from(i).unwrap()))
            );
        }
    }
}

#[test]
fn every_dialect_agrees_on_slots() {
    use sqlnamed_core::DialectKind;

    for sql in CORPUS {
        let reference = parse(sql);
        for kind in DialectKind::ALL {
            let p = Parser::builder().dialect(kind.dialect()).parse(sql).unwrap();
            assert_eq!(p.positions(), reference.positions());
            assert_eq!(p.occurrences(), reference.occurrences());
        }
    }
}
