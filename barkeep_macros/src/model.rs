use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, LitStr};

pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let vis = &input.vis;

    let field_enum = parse_struct_attrs(&input).unwrap_or_else(|| format_ident!("{}Field", name));

    let fields = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => &fields.named,
            _ => panic!("Model derive only supports structs with named fields"),
        },
        _ => panic!("Model derive only supports structs"),
    };

    let mut variants = Vec::new();
    let mut labels = Vec::new();
    for field in fields {
        if has_model_skip(&field.attrs) {
            continue;
        }
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let label = ident.to_string();
        variants.push(format_ident!("{}", to_pascal_case(&label)));
        labels.push(label);
    }

    let doc = format!("Editable fields of [`{}`].", name);

    let expanded = quote! {
        #[doc = #doc]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #vis enum #field_enum {
            #(#variants),*
        }

        impl #field_enum {
            /// Every field, in declaration order.
            pub const ALL: &'static [#field_enum] = &[#(#field_enum::#variants),*];

            /// Source name of the field.
            pub fn label(self) -> &'static str {
                match self {
                    #(#field_enum::#variants => #labels),*
                }
            }
        }

        impl barkeep::Model for #name {
            type Field = #field_enum;
        }
    };

    TokenStream::from(expanded)
}

fn parse_struct_attrs(input: &DeriveInput) -> Option<syn::Ident> {
    for attr in &input.attrs {
        if !attr.path().is_ident("model") {
            continue;
        }

        let mut field_enum = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("field") {
                let value: LitStr = meta.value()?.parse()?;
                field_enum = Some(format_ident!("{}", value.value()));
            }
            Ok(())
        });

        if field_enum.is_some() {
            return field_enum;
        }
    }
    None
}

fn has_model_skip(attrs: &[syn::Attribute]) -> bool {
    for attr in attrs {
        if !attr.path().is_ident("model") {
            continue;
        }
        let mut skip = false;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
            }
            Ok(())
        });
        if skip {
            return true;
        }
    }
    false
}

fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut upper_next = true;
    for ch in s.trim_start_matches("r#").chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }
    result
}
