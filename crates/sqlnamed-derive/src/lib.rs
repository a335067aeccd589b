//! Derive macro for supplying SQL named parameters from a struct.
//!
//! This crate provides the `#[derive(Params)]` macro, which implements
//! `sqlnamed_core::NamedParams` so a struct's fields can be bound to the
//! `:name` parameters of a query.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Expr, Fields, Ident, Lit, Meta, parse_macro_input};
use unicode_general_category::{GeneralCategory, get_general_category};

/// Derives `NamedParams` for a struct with named fields.
///
/// Every field is converted with `ToSqlValue` (after a `clone`) and offered
/// under its own name.
///
/// # Field Attributes
///
/// - `#[param(name = "param_name")]` - Binds the field to a differently named
///   parameter
/// - `#[param(skip)]` - Leaves the field out
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Params)]
/// struct Search {
///     #[param(name = "q")]
///     query: String,
///     limit: i64,
///     #[param(skip)]
///     cache_key: u64,
/// }
/// ```
///
/// Enums, unions, tuple structs and unit structs have no named fields and
/// are rejected at compile time.
#[proc_macro_derive(Params, attributes(param))]
pub fn derive_params(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_params_impl(&input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_params_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Params derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Params derive only supports structs",
            ));
        }
    };

    let mut param_infos: Vec<ParamInfo> = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let attrs = parse_param_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        param_infos.push(ParamInfo {
            field_name: field_name.clone(),
            param_name: attrs
                .name
                .unwrap_or_else(|| unraw(&field_name.to_string())),
        });
    }

    let visits: Vec<TokenStream2> = param_infos
        .iter()
        .map(|info| {
            let field_name = &info.field_name;
            let param_name = &info.param_name;
            quote! {
                visitor(
                    #param_name,
                    ::sqlnamed_core::ToSqlValue::to_sql_value(
                        ::core::clone::Clone::clone(&self.#field_name),
                    ),
                );
            }
        })
        .collect();

    let param_names: Vec<&str> = param_infos.iter().map(|i| i.param_name.as_str()).collect();

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::sqlnamed_core::NamedParams for #struct_name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn visit_params(
                &self,
                visitor: &mut dyn FnMut(&str, ::sqlnamed_core::SqlValue),
            ) {
                #(#visits)*
            }
        }

        impl #impl_generics #struct_name #ty_generics #where_clause {
            /// Parameter names supplied by this type, in field order.
            pub const PARAM_NAMES: &'static [&'static str] = &[#(#param_names),*];
        }
    };

    Ok(expanded)
}

struct ParamInfo {
    field_name: Ident,
    param_name: String,
}

#[derive(Default)]
struct ParamAttrs {
    name: Option<String>,
    skip: bool,
}

fn parse_param_attrs(attrs: &[Attribute]) -> syn::Result<ParamAttrs> {
    let mut result = ParamAttrs::default();

    for attr in attrs {
        if attr.path().is_ident("param") {
            // Handle empty attribute like #[param]
            if matches!(attr.meta, Meta::Path(_)) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    result.skip = true;
                } else if meta.path.is_ident("name") {
                    let value: Expr = meta.value()?.parse()?;
                    match value {
                        Expr::Lit(lit) => match lit.lit {
                            Lit::Str(s) if is_valid_param_name(&s.value()) => {
                                result.name = Some(s.value());
                            }
                            Lit::Str(s) => {
                                return Err(syn::Error::new_spanned(
                                    s,
                                    "parameter names may only contain letters, digits and '_'",
                                ));
                            }
                            other => {
                                return Err(syn::Error::new_spanned(
                                    other,
                                    "expected a string literal",
                                ));
                            }
                        },
                        other => {
                            return Err(syn::Error::new_spanned(
                                other,
                                "expected a string literal",
                            ));
                        }
                    }
                } else {
                    return Err(meta.error("unsupported param attribute"));
                }
                Ok(())
            })?;
        }
    }

    Ok(result)
}

/// Names that the query scanner can produce after a `:`.
fn is_valid_param_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_param_char)
}

/// `_`, letters and decimal digits, as accepted by the query scanner.
fn is_param_char(c: char) -> bool {
    c == '_'
        || matches!(
            get_general_category(c),
            GeneralCategory::UppercaseLetter
                | GeneralCategory::LowercaseLetter
                | GeneralCategory::TitlecaseLetter
                | GeneralCategory::ModifierLetter
                | GeneralCategory::OtherLetter
                | GeneralCategory::DecimalNumber
        )
}

/// Strips the `r#` prefix of raw identifiers such as `r#type`.
fn unraw(name: &str) -> String {
    name.strip_prefix("r#").unwrap_or(name).to_string()
}
