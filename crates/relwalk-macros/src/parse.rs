//! Parsing of `#[derive(Record)]` input.

use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::{
    Attribute, Data, DeriveInput, Error, Field, Fields, GenericArgument, Ident, Lit, PathArguments,
    Result, Type,
};

/// Parsed record struct.
#[derive(Debug)]
pub struct RecordDef {
    pub name: Ident,
    /// Name reported by `RecordType::name`
    pub type_name: String,
    /// Traversable fields in declaration order (skipped fields excluded)
    pub fields: Vec<FieldDef>,
}

/// Parsed record field.
#[derive(Debug)]
pub struct FieldDef {
    pub ident: Ident,
    pub column: String,
    pub kind: KindAttr,
    pub nullable: bool,
    /// Record type reached through this field, when statically known
    pub target: Option<Type>,
}

/// Slot kind inferred from a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindAttr {
    Scalar,
    Record,
    Collection,
    Interface,
}

const SCALARS: &[&str] = &[
    "bool", "i8", "i16", "i32", "i64", "u16", "u32", "u64", "f32", "f64", "String", "Value",
];

/// Parse a derive input into a record definition.
pub fn parse_record(input: &DeriveInput) -> Result<RecordDef> {
    let name = input.ident.clone();

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic structs",
        ));
    }

    let type_name = parse_struct_attrs(&input.attrs)?.unwrap_or_else(|| name.to_string());

    let fields = match &input.data {
        Data::Struct(data) => parse_fields(&data.fields)?,
        Data::Enum(_) => {
            return Err(Error::new_spanned(
                input,
                "Record can only be derived for structs, not enums",
            ));
        }
        Data::Union(_) => {
            return Err(Error::new_spanned(
                input,
                "Record can only be derived for structs, not unions",
            ));
        }
    };

    Ok(RecordDef {
        name,
        type_name,
        fields,
    })
}

/// Parse struct-level `#[relwalk(...)]` attributes, returning the type name
/// override if any.
fn parse_struct_attrs(attrs: &[Attribute]) -> Result<Option<String>> {
    let mut type_name: Option<String> = None;

    for attr in attrs {
        if !attr.path().is_ident("relwalk") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                if type_name.is_some() {
                    return Err(Error::new_spanned(
                        meta.path,
                        "duplicate relwalk attribute: name",
                    ));
                }
                type_name = Some(string_value(&meta)?);
                Ok(())
            } else {
                Err(meta.error("unknown relwalk struct attribute"))
            }
        })?;
    }

    Ok(type_name)
}

fn parse_fields(fields: &Fields) -> Result<Vec<FieldDef>> {
    match fields {
        Fields::Named(named) => {
            let mut out = Vec::new();
            for field in &named.named {
                if let Some(def) = parse_field(field)? {
                    out.push(def);
                }
            }
            Ok(out)
        }
        Fields::Unnamed(_) => Err(Error::new(
            Span::call_site(),
            "Record requires a struct with named fields, not a tuple struct",
        )),
        Fields::Unit => Err(Error::new(
            Span::call_site(),
            "Record requires a struct with fields, not a unit struct",
        )),
    }
}

/// Parse one field. Returns `None` for `#[relwalk(skip)]`.
fn parse_field(field: &Field) -> Result<Option<FieldDef>> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| Error::new_spanned(field, "expected named field"))?;

    let mut column: Option<String> = None;
    let mut skip = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("relwalk") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else if meta.path.is_ident("column") {
                if column.is_some() {
                    return Err(Error::new_spanned(
                        meta.path,
                        "duplicate relwalk attribute: column",
                    ));
                }
                column = Some(string_value(&meta)?);
                Ok(())
            } else {
                Err(meta.error("unknown relwalk field attribute"))
            }
        })?;
    }

    if skip {
        return Ok(None);
    }

    if let Some(message) = unsupported(&field.ty) {
        return Err(Error::new_spanned(&field.ty, message));
    }

    let (kind, nullable, target) = infer_kind(&field.ty);
    let column = column.unwrap_or_else(|| ident.unraw().to_string());

    Ok(Some(FieldDef {
        ident,
        column,
        kind,
        nullable,
        target,
    }))
}

fn string_value(meta: &syn::meta::ParseNestedMeta<'_>) -> Result<String> {
    let value: Lit = meta.value()?.parse()?;
    if let Lit::Str(lit_str) = value {
        Ok(lit_str.value())
    } else {
        Err(Error::new_spanned(value, "expected string literal"))
    }
}

/// Field shapes that have no slot implementation.
fn unsupported(ty: &Type) -> Option<&'static str> {
    if let Some(inner) = generic_inner(ty, "Option") {
        if matches!(strip_box(inner), Type::TraitObject(_)) {
            return Some(
                "optional interface fields are not supported: a nil `dyn Record` has no default \
                 to materialize; use `Box<dyn Record>` or `Vec<Box<dyn Record>>`",
            );
        }
        return unsupported(inner);
    }
    if let Some(inner) = generic_inner(ty, "Box") {
        return unsupported(inner);
    }
    if let Some(elem) = generic_inner(ty, "Vec") {
        return if is_named(elem, "u8") {
            None
        } else {
            unsupported(elem)
        };
    }
    if is_named(ty, "u8") {
        return Some("`u8` fields are not supported; use `i16`, or `Vec<u8>` for binary data");
    }
    None
}

/// Infer the slot kind, nullability and target record type of a field type.
pub fn infer_kind(ty: &Type) -> (KindAttr, bool, Option<Type>) {
    if let Some(inner) = generic_inner(ty, "Option") {
        let (kind, _, target) = infer_kind(inner);
        return (kind, true, target);
    }
    if let Some(inner) = generic_inner(ty, "Box") {
        return infer_kind(inner);
    }
    if let Some(elem) = generic_inner(ty, "Vec") {
        if is_named(elem, "u8") {
            return (KindAttr::Scalar, false, None);
        }
        let elem = strip_box(elem);
        return match infer_kind(elem) {
            (KindAttr::Interface, ..) => (KindAttr::Interface, false, None),
            (KindAttr::Record, _, target) => (KindAttr::Collection, false, target),
            _ => (KindAttr::Collection, false, None),
        };
    }
    match ty {
        Type::TraitObject(_) => (KindAttr::Interface, false, None),
        Type::Array(_) => (KindAttr::Scalar, false, None),
        Type::Paren(paren) => infer_kind(&paren.elem),
        _ if is_scalar(ty) => (KindAttr::Scalar, false, None),
        _ => (KindAttr::Record, false, Some(ty.clone())),
    }
}

fn strip_box(ty: &Type) -> &Type {
    generic_inner(ty, "Box").unwrap_or(ty)
}

/// The single type argument of `Wrapper<T>`, matched on the last path segment.
fn generic_inner<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn is_scalar(ty: &Type) -> bool {
    SCALARS.iter().any(|name| is_named(ty, name))
}

/// Whether `ty` is a plain path whose last segment is `name`.
fn is_named(ty: &Type, name: &str) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };
    type_path.qself.is_none()
        && type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.arguments.is_empty() && segment.ident == name)
}
