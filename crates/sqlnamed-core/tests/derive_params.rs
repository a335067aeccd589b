//! Tests for the `#[derive(Params)]` macro output.

mod common;
use common::*;

use sqlnamed_core::{NamedParams, SqlValue};
use sqlnamed_derive::Params;

#[allow(dead_code)]
#[derive(Debug, Clone, Params)]
pub struct Article {
    pub id: i64,
    pub title: String,
    #[param(name = "is_published")]
    pub published: bool,
    #[param(skip)]
    pub cached_html: String,
    pub summary: Option<String>,
}

fn article() -> Article {
    Article {
        id: 7,
        title: String::from("Hello"),
        published: true,
        cached_html: String::from("<p>Hello</p>"),
        summary: None,
    }
}

#[test]
fn param_names_constant() {
    assert_eq!(
        Article::PARAM_NAMES,
        &["id", "title", "is_published", "summary"]
    );
}

#[test]
fn visit_params_in_field_order() {
    assert_eq!(
        article().to_param_pairs(),
        vec![
            (String::from("id"), SqlValue::Int(7)),
            (String::from("title"), SqlValue::Text(String::from("Hello"))),
            (String::from("is_published"), SqlValue::Bool(true)),
            (String::from("summary"), SqlValue::Null),
        ]
    );
}

#[test]
fn derived_params_bind_to_query() {
    let mut p = parse(
        "UPDATE articles SET title = :title, published = :is_published, \
         summary = :summary WHERE id = :id",
    );
    p.set_values_from_params(&article());
    assert_eq!(
        p.parsed_parameters(),
        &[
            text("Hello"),
            Some(SqlValue::Bool(true)),
            Some(SqlValue::Null),
            Some(SqlValue::Int(7)),
        ]
    );
}

#[test]
fn override_name_hides_field_name() {
    let mut p = parse("SELECT :published, :is_published");
    p.set_values_from_params(&article());
    assert_eq!(p.parsed_parameters(), &[None, Some(SqlValue::Bool(true))]);
}

#[test]
fn skipped_field_is_not_offered() {
    let mut p = parse("SELECT :cached_html");
    p.set_values_from_params(&article());
    assert_eq!(p.parsed_parameters(), &[None]);
}

#[derive(Params)]
struct Borrowed<'a> {
    name: &'a str,
    r#type: i32,
}

#[test]
fn borrowed_fields_and_raw_identifiers() {
    let mut p = parse("SELECT :name, :type");
    p.set_values_from_params(&Borrowed {
        name: "widget",
        r#type: 2,
    });
    assert_eq!(
        p.parsed_parameters(),
        &[text("widget"), Some(SqlValue::Int(2))]
    );
}

#[derive(Params)]
struct Empty {}

#[test]
fn struct_without_fields_supplies_nothing() {
    assert!(Empty {}.to_param_pairs().is_empty());
    assert!(Empty::PARAM_NAMES.is_empty());
}
