//! Procedural macro for deriving `AnswerSink` implementations.
//!
//! This crate provides the `#[derive(AnswerSink)]` macro which lets a plain
//! struct receive survey answers: each answer is written into the field whose
//! name matches the question name.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Type, parse_macro_input, parse_quote};

/// Derive the `AnswerSink` trait for a struct with named fields.
///
/// A question named `name` is stored in the field called `name`, compared
/// ignoring ASCII case. The answer is converted with `FromAnswer`, so a field
/// may be `String`, `bool`, any integer or float, `Option<T>`, `Vec<String>`
/// and so on. Every written field type gets a `FromAnswer` bound on the
/// generated impl, so generic fields need no bound on the struct itself.
///
/// # Attributes
///
/// ## On fields
/// - `#[answer(rename = "...")]` - Match this exact question name instead of the field name
/// - `#[answer(skip)]` - Never write answers into this field
#[proc_macro_derive(AnswerSink, attributes(answer))]
pub fn derive_answer_sink(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    implement_answer_sink(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn implement_answer_sink(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "AnswerSink can only be derived for structs with named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "AnswerSink can only be derived for structs",
            ));
        }
    };

    let mut generics = input.generics.clone();
    let mut arms = Vec::new();
    for field in fields {
        let attrs = FieldAttrs::extract(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let Some(ident) = &field.ident else {
            continue;
        };
        let condition = match &attrs.rename {
            Some(rename) => quote! { name == #rename },
            None => {
                let key = ident.to_string();
                let key = key.strip_prefix("r#").unwrap_or(&key).to_string();
                quote! { name.eq_ignore_ascii_case(#key) }
            }
        };
        let ty = &field.ty;
        generics
            .make_where_clause()
            .predicates
            .push(parse_quote! { #ty: survey::FromAnswer });
        arms.push(generate_field_write(ident, ty, &condition));
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics survey::AnswerSink for #name #ty_generics #where_clause {
            fn write_answer(
                &mut self,
                name: &str,
                answer: survey::Answer,
            ) -> ::core::result::Result<(), survey::WriteError> {
                #(#arms)*
                ::core::result::Result::Err(survey::WriteError::UnknownField {
                    name: name.to_string(),
                })
            }
        }
    })
}

fn generate_field_write(ident: &syn::Ident, ty: &Type, condition: &TokenStream2) -> TokenStream2 {
    quote! {
        if #condition {
            self.#ident = <#ty as survey::FromAnswer>::from_answer(answer)
                .map_err(|mismatch| mismatch.at(name))?;
            return ::core::result::Result::Ok(());
        }
    }
}

// ============================================================================
// Attribute Extraction
// ============================================================================

/// Attributes that can appear on fields
#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip: bool,
}

impl FieldAttrs {
    fn extract(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident("answer")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.rename = Some(lit.value());
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `rename = \"...\"` or `skip`"))
                }
            })?;
        }

        Ok(out)
    }
}
