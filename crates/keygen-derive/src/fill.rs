use heck::ToSnakeCase;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Field, Fields, Index, LitStr, Token};

/// Parsed `#[keygen(...)]` attributes of one field.
#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip: bool,
    /// Generator name and arguments; an empty list means `generator()`
    generator: Option<Vec<LitStr>>,
}

impl FieldAttrs {
    fn parse(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("keygen")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    attrs.rename = Some(value.value());
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    attrs.skip = true;
                    Ok(())
                } else if meta.path.is_ident("generator") {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let args = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
                    attrs.generator = Some(args.into_iter().collect());
                    Ok(())
                } else {
                    Err(meta.error("unknown keygen attribute"))
                }
            })?;
        }

        if attrs.skip && attrs.generator.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "`skip` and `generator` cannot be used on the same field",
            ));
        }

        Ok(attrs)
    }
}

/// Key segment of a field: the rename if given, else the snake_case name or
/// the positional index.
fn key_segment(field: &Field, position: usize, attrs: &FieldAttrs) -> String {
    if let Some(rename) = &attrs.rename {
        return rename.clone();
    }
    match &field.ident {
        Some(ident) => {
            let name = ident.to_string();
            name.strip_prefix("r#").unwrap_or(&name).to_snake_case()
        }
        None => position.to_string(),
    }
}

pub fn derive_fill(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(mut input: DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input,
            "Fill can only be derived for structs",
        ));
    };

    let mut zero_fields = Vec::new();
    let mut generate_fields = Vec::new();
    let mut fill_stmts = Vec::new();

    for (position, field) in data.fields.iter().enumerate() {
        let attrs = FieldAttrs::parse(field)?;
        let ty = &field.ty;
        let member = match &field.ident {
            Some(ident) => quote! { #ident },
            None => {
                let index = Index::from(position);
                quote! { #index }
            }
        };

        if attrs.skip {
            zero_fields.push(quote! { #member: ::core::default::Default::default() });
            generate_fields.push(quote! { #member: ::core::default::Default::default() });
            continue;
        }

        zero_fields.push(quote! { #member: <#ty as ::keygen::Fill>::zero()? });

        let segment = key_segment(field, position, &attrs);
        match attrs.generator.as_deref() {
            Some([name, args @ ..]) => {
                generate_fields.push(quote! {
                    #member: gen.generate_named::<#ty>(#name, &[#(#args),*], &keys.child(#segment))?
                });
                fill_stmts.push(quote! {
                    gen.fill_named(&mut self.#member, #name, &[#(#args),*], &keys.child(#segment));
                });
            }
            _ => {
                generate_fields.push(quote! {
                    #member: gen.generate::<#ty>(&keys.child(#segment))?
                });
                fill_stmts.push(quote! {
                    gen.fill(&mut self.#member, &keys.child(#segment));
                });
            }
        }
    }

    let (zero, generated) = match &data.fields {
        Fields::Unit => (quote! { Self }, quote! { Self }),
        _ => (
            quote! { Self { #(#zero_fields),* } },
            quote! { Self { #(#generate_fields),* } },
        ),
    };

    let name = &input.ident;
    let name_str = name.to_string();

    let type_params: Vec<_> = input.generics.type_params().map(|p| p.ident.clone()).collect();
    let where_clause = input.generics.make_where_clause();
    for param in type_params {
        where_clause
            .predicates
            .push(parse_quote! { #param: ::keygen::Fill });
    }
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::keygen::Fill for #name #ty_generics #where_clause {
            fn shape() -> ::keygen::Shape {
                ::keygen::Shape::Record(#name_str)
            }

            fn zero() -> ::core::option::Option<Self> {
                ::core::option::Option::Some(#zero)
            }

            #[allow(unused_variables)]
            fn fill_shape(&mut self, gen: &::keygen::Generator, keys: &::keygen::KeyPath) {
                #(#fill_stmts)*
            }

            #[allow(unused_variables)]
            fn generate_shape(
                gen: &::keygen::Generator,
                keys: &::keygen::KeyPath,
            ) -> ::core::option::Option<Self> {
                ::core::option::Option::Some(#generated)
            }
        }
    })
}
