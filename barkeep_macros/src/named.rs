use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

pub fn derive_named(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let id_field = extract_marked_field(&input, "id");
    let name_field = extract_marked_field(&input, "name");

    let expanded = quote! {
        impl barkeep::Named for #name {
            fn id(&self) -> &str {
                &self.#id_field
            }

            fn name(&self) -> &str {
                &self.#name_field
            }
        }
    };

    TokenStream::from(expanded)
}

/// Finds the field tagged `#[named(<marker>)]`, falling back to a field called `<marker>`.
fn extract_marked_field(input: &DeriveInput, marker: &str) -> syn::Ident {
    if let Data::Struct(data_struct) = &input.data {
        if let Fields::Named(fields) = &data_struct.fields {
            for field in &fields.named {
                for attr in &field.attrs {
                    if !attr.path().is_ident("named") {
                        continue;
                    }
                    let mut marked = false;
                    let _ = attr.parse_nested_meta(|meta| {
                        if meta.path.is_ident(marker) {
                            marked = true;
                        }
                        Ok(())
                    });
                    if marked {
                        if let Some(ident) = &field.ident {
                            return ident.clone();
                        }
                    }
                }
            }

            for field in &fields.named {
                if let Some(ident) = &field.ident {
                    if ident == marker {
                        return ident.clone();
                    }
                }
            }
        }
    }

    panic!(
        "Named derive: no field marked with #[named({marker})] and no field named `{marker}`"
    );
}
