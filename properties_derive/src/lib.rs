// properties_derive/src/lib.rs
extern crate proc_macro;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute,
    Data,
    DeriveInput,
    Field,
    Fields,
    LitStr,
    parse_macro_input
};

/// `#[derive(Properties)]` – generates an impl of the `PropertyHost` trait.
///
/// Every named field becomes a property through its `PropertyField` impl.
/// Fields accept `#[property(name = "...", label = "...", choices("a", "b"), skip)]`.
#[proc_macro_derive(Properties, attributes(property))]
pub fn derive_properties(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_properties(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_properties(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = input.ident;
    let generics = input.generics;

    let fields = match input.data {
        Data::Struct(s) => match s.fields {
            Fields::Named(named) => named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    s.struct_token,
                    "Properties can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Properties can only be derived for structs",
            ));
        }
    };

    let mut inserts = Vec::new();
    let mut updates = Vec::new();

    for field in &fields {
        let options = property_options(&field.attrs)?;
        if options.skip {
            continue;
        }
        let (insert, update) = field_tokens(field, options);
        inserts.push(insert);
        updates.push(update);
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::properties_core::PropertyHost for #name #ty_generics #where_clause {
            fn properties(&self) -> ::properties_core::PropertyMap {
                let mut properties = ::properties_core::PropertyMap::new();
                #(#inserts)*
                properties
            }

            fn update_property(&mut self, name: &str, value: &str) -> bool {
                match name {
                    #(#updates)*
                    _ => false,
                }
            }
        }
    })
}

/// The `properties()` insert and the `update_property` match arm of one field.
fn field_tokens(field: &Field, options: PropertyOptions) -> (TokenStream2, TokenStream2) {
    let ident = &field.ident;
    let ty = &field.ty;
    let property_name = options.name.unwrap_or_else(|| {
        ident
            .as_ref()
            .map(|i| camel_case(&i.to_string()))
            .unwrap_or_default()
    });

    let label = options.label.map(|l| quote! { .set_label(#l) });
    let choices = &options.choices;
    let choice_type = (!choices.is_empty()).then(|| quote! {
        .set_type(::properties_core::constants::TYPE_CHOICE)
        #( .add_extra_info(#choices) )*
    });

    let insert = quote! {
        properties.insert(
            #property_name,
            <#ty as ::properties_core::PropertyField>::to_property(&self.#ident)
                #choice_type
                #label
        );
    };

    let update = if choices.is_empty() {
        quote! { <#ty as ::properties_core::PropertyField>::update_from(&mut self.#ident, value) }
    } else {
        quote! {
            [#(#choices),*].contains(&value)
                && <#ty as ::properties_core::PropertyField>::update_from(&mut self.#ident, value)
        }
    };

    (insert, quote! { #property_name => #update, })
}

#[derive(Default)]
struct PropertyOptions {
    name: Option<String>,
    label: Option<String>,
    choices: Vec<String>,
    skip: bool,
}

/// Reads every `#[property(...)]` attribute of a field.
fn property_options(attrs: &[Attribute]) -> syn::Result<PropertyOptions> {
    let mut options = PropertyOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("property") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
            } else if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                options.name = Some(lit.value());
            } else if meta.path.is_ident("label") {
                let lit: LitStr = meta.value()?.parse()?;
                options.label = Some(lit.value());
            } else if meta.path.is_ident("choices") {
                let content;
                syn::parenthesized!(content in meta.input);
                let values = content.parse_terminated(
                    <LitStr as syn::parse::Parse>::parse,
                    syn::Token![,],
                )?;
                options.choices.extend(values.iter().map(LitStr::value));
            } else {
                return Err(meta.error("expected `name`, `label`, `choices` or `skip`"));
            }
            Ok(())
        })?;
    }

    Ok(options)
}

/// `max_speed` -> `maxSpeed`.
fn camel_case(ident: &str) -> String {
    let ident = ident.strip_prefix("r#").unwrap_or(ident);
    let mut out = String::with_capacity(ident.len());
    let mut upper_next = false;

    for c in ident.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
