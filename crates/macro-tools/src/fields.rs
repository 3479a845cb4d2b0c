use proc_macro::TokenStream;
use quote::{format_ident, quote, ToTokens};
use syn::{parenthesized, Attribute, Data, DeriveInput, Field, Fields, Type, Visibility};

// these types are returned by value from generated readers
const COPY_TYPES: [&str; 20] = [
    "bool",
    "u8",
    "u16",
    "u32",
    "u64",
    "u128",
    "usize",
    "i8",
    "i16",
    "i32",
    "i64",
    "i128",
    "f32",
    "f64",
    "FloatNum",
    "ID",
    "Vector",
    "Point",
    "Mass",
    "SubscriptionId",
];

#[derive(Clone)]
struct ReadAttr {
    vis: Visibility,
    copy: bool,
}

#[derive(Clone)]
struct WriteAttr {
    vis: Visibility,
    set: bool,
    reducer: bool,
}

fn find_attr<'a>(attrs: &'a [Attribute], ident: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(ident))
}

fn is_skipped(attrs: &[Attribute]) -> bool {
    attrs
        .iter()
        .filter(|attr| ["shared", "r", "w"].iter().any(|k| attr.path().is_ident(k)))
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

fn parse_read(attrs: &[Attribute], default_vis: &Visibility) -> Option<ReadAttr> {
    let attr = find_attr(attrs, "r")?;
    let mut read = ReadAttr {
        vis: default_vis.clone(),
        copy: false,
    };
    let _ = attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("vis") {
            let content;
            parenthesized!(content in meta.input);
            read.vis = content.parse::<Visibility>()?;
        } else if meta.path.is_ident("copy") {
            read.copy = true;
        }
        Ok(())
    });
    Some(read)
}

fn parse_write(attrs: &[Attribute], default_vis: &Visibility) -> Option<WriteAttr> {
    let attr = find_attr(attrs, "w")?;
    let mut write = WriteAttr {
        vis: default_vis.clone(),
        set: false,
        reducer: false,
    };
    let _ = attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("reducer") {
            write.reducer = true;
            write.set = true;
        } else if meta.path.is_ident("set") {
            write.set = true;
        } else if meta.path.is_ident("vis") {
            let content;
            parenthesized!(content in meta.input);
            write.vis = content.parse::<Visibility>()?;
        }
        Ok(())
    });
    Some(write)
}

fn is_copy_type(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => {
            let name = path.into_token_stream().to_string();
            COPY_TYPES.iter().any(|copy_type| *copy_type == name)
        }
        _ => false,
    }
}

fn reader(field: &Field, read: ReadAttr) -> proc_macro2::TokenStream {
    let ident = &field.ident;
    let ty = &field.ty;
    let vis = read.vis;

    if read.copy || is_copy_type(ty) {
        quote!(
            #[inline]
            #vis fn #ident(&self) -> #ty {
                self.#ident
            }
        )
    } else {
        quote!(
            #[inline]
            #vis fn #ident(&self) -> &#ty {
                &self.#ident
            }
        )
    }
}

fn writer(field: &Field, write: WriteAttr) -> proc_macro2::TokenStream {
    let Some(ident) = field.ident.as_ref() else {
        return quote!();
    };
    let ty = &field.ty;
    let vis = write.vis;

    if !write.set {
        let ident_mut = format_ident!("{}_mut", ident);
        return quote!(
            #[inline]
            #vis fn #ident_mut(&mut self) -> &mut #ty {
                &mut self.#ident
            }
        );
    }

    let set_ident = format_ident!("set_{}", ident);

    if write.reducer {
        quote!(
            #vis fn #set_ident(&mut self, reducer: impl FnOnce(#ty) -> #ty) -> &mut Self {
                self.#ident = reducer(core::mem::take(&mut self.#ident));
                self
            }
        )
    } else {
        quote!(
            #vis fn #set_ident(&mut self, value: impl Into<#ty>) -> &mut Self {
                self.#ident = value.into();
                self
            }
        )
    }
}

pub fn macro_fields(input: DeriveInput) -> TokenStream {
    let ident = input.ident;
    let input_vis = input.vis;

    let global_read = parse_read(&input.attrs, &input_vis);
    let global_write = parse_write(&input.attrs, &input_vis);

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data) = input.data else {
        return syn::Error::new(ident.span(), "Fields can only be applied to structs")
            .into_compile_error()
            .into();
    };

    let Fields::Named(fields) = data.fields else {
        return syn::Error::new(ident.span(), "Fields requires named fields")
            .into_compile_error()
            .into();
    };

    let methods = fields
        .named
        .iter()
        .filter(|field| !is_skipped(&field.attrs))
        .map(|field| {
            let read = parse_read(&field.attrs, &input_vis)
                .or_else(|| global_read.clone())
                .map(|read| reader(field, read));

            let write = parse_write(&field.attrs, &input_vis)
                .or_else(|| global_write.clone())
                .map(|write| writer(field, write));

            quote!(
                #read

                #write
            )
        });

    quote!(
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#methods)*
        }
    )
    .into()
}
