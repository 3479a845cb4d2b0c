use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Expr, Fields, Meta};

fn is_setter_skipped(attrs: &[Attribute]) -> bool {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("builder") || attr.path().is_ident("shared"))
        .any(|attr| {
            let mut skip = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                }
                Ok(())
            });
            skip
        })
}

fn default_expr(attrs: &[Attribute]) -> Option<Expr> {
    attrs
        .iter()
        .find(|attr| attr.path().is_ident("default"))
        .and_then(|attr| match &attr.meta {
            Meta::Path(_) => None,
            Meta::NameValue(meta) => Some(meta.value.clone()),
            Meta::List(list) => list.parse_args().ok(),
        })
}

pub fn macro_builder(input: DeriveInput) -> TokenStream {
    let origin_ident = input.ident;
    let vis = input.vis;

    if !input.generics.params.is_empty() {
        return syn::Error::new(origin_ident.span(), "Builder does not support generics")
            .into_compile_error()
            .into();
    }

    let Data::Struct(data) = input.data else {
        return syn::Error::new(origin_ident.span(), "Builder can only be applied to structs")
            .into_compile_error()
            .into();
    };

    let Fields::Named(fields) = data.fields else {
        return syn::Error::new(origin_ident.span(), "Builder requires named fields")
            .into_compile_error()
            .into();
    };

    let ident = format_ident!("{}Builder", origin_ident);

    let default_fields: Vec<_> = fields
        .named
        .iter()
        .map(|field| {
            let field_ident = &field.ident;
            match default_expr(&field.attrs) {
                Some(expr) => quote!(#field_ident: #expr,),
                None => quote!(#field_ident: Default::default(),),
            }
        })
        .collect();

    let builder_fields = fields.named.iter().map(|field| {
        let field_ident = &field.ident;
        let ty = &field.ty;
        quote!(#field_ident: #ty,)
    });

    let build_fields = fields.named.iter().map(|field| {
        let field_ident = &field.ident;
        quote!(#field_ident: value.#field_ident,)
    });

    let setters = fields
        .named
        .iter()
        .filter(|field| !is_setter_skipped(&field.attrs))
        .map(|field| {
            let field_ident = &field.ident;
            let ty = &field.ty;
            quote!(
                pub fn #field_ident(mut self, value: impl Into<#ty>) -> Self {
                    self.#field_ident = value.into();
                    self
                }
            )
        });

    quote!(
        #[derive(Clone, Debug)]
        #vis struct #ident {
            #(#builder_fields)*
        }

        impl Default for #ident {
            fn default() -> Self {
                Self {
                    #(#default_fields)*
                }
            }
        }

        impl Default for #origin_ident {
            fn default() -> Self {
                Self {
                    #(#default_fields)*
                }
            }
        }

        impl From<#ident> for #origin_ident {
            fn from(value: #ident) -> Self {
                Self {
                    #(#build_fields)*
                }
            }
        }

        impl #ident {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn build(self) -> #origin_ident {
                self.into()
            }

            #(#setters)*
        }
    )
    .into()
}
