//! Procedural macros for relwalk.
//!
//! `relwalk-macros` is the **compile-time codegen layer**. `#[derive(Record)]`
//! turns a named-field struct into a walkable record by generating:
//!
//! - a `Record` impl exposing every field as an indexed slot
//! - a `Typed` impl with the static `RecordType` metadata
//! - a `Slot` impl so the struct can sit in another record's fields
//!
//! These macros are used by application crates via the `relwalk` facade.

use proc_macro::TokenStream;

mod parse;

use parse::{FieldDef, KindAttr, RecordDef, parse_record};

/// Derive macro for the `Record` trait.
///
/// Field slots are numbered in declaration order, skipping
/// `#[relwalk(skip)]` fields. Slot kinds are inferred from the field type:
/// `Option<_>` is a nullable pointer, `Vec<_>` a collection, `dyn Record`
/// (boxed) an interface, the primitive scalars, `String`/`Value` and
/// `Vec<u8>` are scalars, and anything else is a nested record that must
/// itself derive `Record`. `u8` and `Option<Box<dyn Record>>` fields are
/// rejected.
///
/// The struct must implement `Default`: it is the value a nil pointer to
/// it is replaced with on write-preparing access.
///
/// # Attributes
///
/// - `#[relwalk(name = "name")]` - Override the record type name (defaults to the struct name)
/// - `#[relwalk(column = "name")]` - Override the column name (defaults to the field name)
/// - `#[relwalk(skip)]` - Hide this field from traversal
///
/// # Example
///
/// ```ignore
/// use relwalk::prelude::*;
///
/// #[derive(Record, Default)]
/// struct Order {
///     id: i64,
///     #[relwalk(column = "line_items")]
///     items: Option<Vec<Item>>,
///     customer: Option<Box<Customer>>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(relwalk))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    let record = match parse_record(&input) {
        Ok(r) => r,
        Err(e) => return e.to_compile_error().into(),
    };

    generate_record_impl(&record).into()
}

fn generate_record_impl(record: &RecordDef) -> proc_macro2::TokenStream {
    let name = &record.name;
    let type_name = &record.type_name;

    let slot_infos = record.fields.iter().map(generate_slot_info);
    let indices: Vec<usize> = (0..record.fields.len()).collect();
    let idents: Vec<&syn::Ident> = record.fields.iter().map(|f| &f.ident).collect();
    let consts = generate_index_consts(record);

    quote::quote! {
        impl ::relwalk_core::Record for #name {
            fn record_type(&self) -> &'static ::relwalk_core::RecordType {
                <Self as ::relwalk_core::Typed>::static_type()
            }

            fn slot(&self, index: usize) -> ::std::option::Option<&dyn ::relwalk_core::Slot> {
                match index {
                    #( #indices => ::std::option::Option::Some(&self.#idents as &dyn ::relwalk_core::Slot), )*
                    _ => ::std::option::Option::None,
                }
            }

            fn slot_mut(&mut self, index: usize) -> ::std::option::Option<&mut dyn ::relwalk_core::Slot> {
                match index {
                    #( #indices => ::std::option::Option::Some(&mut self.#idents as &mut dyn ::relwalk_core::Slot), )*
                    _ => ::std::option::Option::None,
                }
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
        }

        impl ::relwalk_core::Typed for #name {
            fn static_type() -> &'static ::relwalk_core::RecordType {
                static TYPE: ::relwalk_core::RecordType = ::relwalk_core::RecordType::new(
                    #type_name,
                    &[ #(#slot_infos),* ],
                );
                &TYPE
            }
        }

        #[allow(dead_code)]
        impl #name {
            #consts
        }

        ::relwalk_core::record_slot!(#name);
    }
}

fn generate_slot_info(field: &FieldDef) -> proc_macro2::TokenStream {
    let name = field.ident.to_string();
    let name = name.strip_prefix("r#").unwrap_or(&name);
    let column = &field.column;
    let nullable = field.nullable;
    let kind = match field.kind {
        KindAttr::Scalar => quote::quote! { ::relwalk_core::SlotKind::Scalar },
        KindAttr::Record => quote::quote! { ::relwalk_core::SlotKind::Record },
        KindAttr::Collection => quote::quote! { ::relwalk_core::SlotKind::Collection },
        KindAttr::Interface => quote::quote! { ::relwalk_core::SlotKind::Interface },
    };
    let target = field.target.as_ref().map(|ty| {
        quote::quote! { .target(<#ty as ::relwalk_core::Typed>::static_type) }
    });

    quote::quote! {
        ::relwalk_core::SlotInfo::new(#name, #kind)
            .column(#column)
            .nullable(#nullable)
            #target
    }
}

/// `pub const FIELD_NAME: usize = n;` for each slot, so paths can be built
/// from indices without string lookups.
fn generate_index_consts(record: &RecordDef) -> proc_macro2::TokenStream {
    let consts = record.fields.iter().enumerate().map(|(index, field)| {
        let name = field.ident.to_string();
        let name = name.strip_prefix("r#").unwrap_or(&name).to_uppercase();
        let const_ident = syn::Ident::new(&name, field.ident.span());
        let doc = format!("Slot index of `{}`.", field.ident);
        quote::quote! {
            #[doc = #doc]
            pub const #const_ident: usize = #index;
        }
    });
    quote::quote! { #(#consts)* }
}
