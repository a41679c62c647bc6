//! `#[derive(Describe)]` for fieldcheck records.
//!
//! Every named field is described in declaration order. The directive comes
//! from `#[validate("rule,rule")]`; fields without the attribute get an empty
//! directive. `#[validate(skip)]` leaves a field out entirely, for types that
//! cannot be captured.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::ParseStream;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, LitStr, parse_macro_input};

#[proc_macro_derive(Describe, attributes(validate))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// What a field's `#[validate]` attribute asks for.
enum FieldAttr {
    Directive(LitStr),
    Skip,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Describe can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &data.fields,
            "Describe can only be derived for structs with named fields",
        ));
    };

    let mut descriptors = Vec::with_capacity(fields.named.len());
    for field in &fields.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        let directive = match field_attr(&field.attrs)? {
            Some(FieldAttr::Skip) => continue,
            Some(FieldAttr::Directive(lit)) => lit,
            None => LitStr::new("", ident.span()),
        };
        let name = ident.unraw().to_string();
        descriptors.push(quote! {
            ::fieldcheck::FieldDescriptor::new(
                #name,
                #directive,
                ::fieldcheck::Capture::capture(&self.#ident),
            )
        });
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::fieldcheck::Describe for #ident #ty_generics #where_clause {
            fn describe(&self) -> ::std::vec::Vec<::fieldcheck::FieldDescriptor<'_>> {
                ::std::vec![#(#descriptors),*]
            }
        }
    })
}

fn field_attr(attrs: &[Attribute]) -> syn::Result<Option<FieldAttr>> {
    let mut found = None;
    for attr in attrs {
        if !attr.path().is_ident("validate") {
            continue;
        }
        if found.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "duplicate #[validate] attribute on field",
            ));
        }
        found = Some(attr.parse_args_with(parse_field_attr)?);
    }
    Ok(found)
}

fn parse_field_attr(input: ParseStream<'_>) -> syn::Result<FieldAttr> {
    if input.peek(LitStr) {
        return Ok(FieldAttr::Directive(input.parse()?));
    }
    let ident: Ident = input.parse()?;
    if ident == "skip" {
        Ok(FieldAttr::Skip)
    } else {
        Err(syn::Error::new_spanned(
            ident,
            "expected a directive string such as \"required,email\", or `skip`",
        ))
    }
}
