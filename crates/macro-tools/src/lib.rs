use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod builder;
mod deref;
mod fields;

/// Implements `Deref`/`DerefMut` toward the field marked `#[deref]`.
#[proc_macro_derive(Deref, attributes(deref))]
pub fn deref(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    deref::macro_deref(input)
}

/// Generates `<Name>Builder` with one chained setter per field, a `Default`
/// impl for both types driven by `#[default = expr]`, and `From<Builder>`.
#[proc_macro_derive(Builder, attributes(default, builder, shared))]
pub fn builder(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    builder::macro_builder(input)
}

/// Generates accessors. `#[r]` reads (primitives and `#[r(copy)]` by value),
/// `#[w]` writes through `_mut`, `#[w(set)]` / `#[w(reducer)]` generate `set_`.
#[proc_macro_derive(Fields, attributes(shared, r, w))]
pub fn fields(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    fields::macro_fields(input)
}
