//! Derive macros for pagequery.
//!
//! This crate provides `#[derive(Queryable)]`, which lets the reference
//! query engine read a record's fields by name.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! pagequery = { version = "0.1", features = ["derive"] }
//! ```
//!
//! ## Examples
//!
//! ```rust,ignore
//! use pagequery::Queryable;
//!
//! #[derive(Clone, Queryable)]
//! struct Hymn {
//!     id: u64,
//!     #[query(searchable)]
//!     title: String,
//!     #[query(searchable, rename = "composer")]
//!     author: Option<String>,
//!     #[query(skip)]
//!     score_pdf: Vec<u8>,
//! }
//!
//! let hymn = Hymn { id: 378, title: "Amazing Grace".into(), author: None, score_pdf: vec![] };
//! assert_eq!(hymn.field("composer"), Some(FieldValue::Null));
//! assert_eq!(Hymn::SEARCHABLE_FIELDS, &["title", "composer"]);
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, Ident, LitStr, Result, parse_macro_input};

/// Derive macro for implementing the `Queryable` trait.
///
/// Every named field is exposed under its own name, converted with
/// `ToFieldValue`.
///
/// ## Attributes
///
/// - `#[query(skip)]` - The field is not exposed.
/// - `#[query(rename = "...")]` - Expose the field under another name.
/// - `#[query(searchable)]` - List the field in the generated
///   `SEARCHABLE_FIELDS` constant.
///
/// ## Example
///
/// ```rust,ignore
/// #[derive(Queryable)]
/// struct Tag {
///     id: u64,
///     #[query(searchable)]
///     name: String,
/// }
/// ```
#[proc_macro_derive(Queryable, attributes(query))]
pub fn derive_queryable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_queryable_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// One exposed field.
struct QueryField {
    ident: Ident,
    name: String,
    searchable: bool,
}

fn derive_queryable_impl(input: DeriveInput) -> Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = query_fields(&input.data)?;

    let arms = fields.iter().map(|field| {
        let ident = &field.ident;
        let key = &field.name;
        quote! {
            #key => ::core::option::Option::Some(
                ::pagequery::ToFieldValue::to_field_value(&self.#ident)
            ),
        }
    });

    let searchable: Vec<&String> = fields
        .iter()
        .filter(|field| field.searchable)
        .map(|field| &field.name)
        .collect();

    let searchable_const = if searchable.is_empty() {
        quote! {}
    } else {
        quote! {
            impl #impl_generics #name #ty_generics #where_clause {
                /// Fields free-text search looks at.
                pub const SEARCHABLE_FIELDS: &'static [&'static str] = &[#(#searchable),*];
            }
        }
    };

    Ok(quote! {
        impl #impl_generics ::pagequery::Queryable for #name #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::core::option::Option<::pagequery::FieldValue> {
                match name {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        #searchable_const
    })
}

/// Collect the exposed fields of a struct with named fields.
fn query_fields(data: &Data) -> Result<Vec<QueryField>> {
    let fields = match data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unnamed(_) => {
                return Err(Error::new(
                    proc_macro2::Span::call_site(),
                    "tuple structs are not supported",
                ));
            },
            Fields::Unit => {
                return Err(Error::new(
                    proc_macro2::Span::call_site(),
                    "unit structs are not supported",
                ));
            },
        },
        Data::Enum(_) => {
            return Err(Error::new(proc_macro2::Span::call_site(), "enums are not supported"));
        },
        Data::Union(_) => {
            return Err(Error::new(proc_macro2::Span::call_site(), "unions are not supported"));
        },
    };

    let mut out = Vec::with_capacity(fields.len());
    for field in fields {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new_spanned(field, "expected named field"))?;

        let mut skip = false;
        let mut searchable = false;
        let mut rename = None;

        for attr in &field.attrs {
            if !attr.path().is_ident("query") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else if meta.path.is_ident("searchable") {
                    searchable = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    rename = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error("expected `skip`, `searchable` or `rename = \"...\"`"))
                }
            })?;
        }

        if skip {
            if searchable {
                return Err(Error::new_spanned(field, "a skipped field cannot be searchable"));
            }
            continue;
        }

        // Raw identifiers (`r#type`) are exposed without the prefix
        let name = rename.unwrap_or_else(|| {
            let raw = ident.to_string();
            raw.strip_prefix("r#").map(str::to_string).unwrap_or(raw)
        });

        if out.iter().any(|existing: &QueryField| existing.name == name) {
            return Err(Error::new_spanned(field, format!("duplicate field name `{name}`")));
        }

        out.push(QueryField { ident, name, searchable });
    }

    Ok(out)
}
