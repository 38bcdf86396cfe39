mod model;
mod named;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Model)] derive macro
// ============================================================================

/// Derive macro for the `Model` trait.
///
/// Generates a `<Struct>Field` enum with one variant per named field, used to
/// record which fields the user has touched during an edit session.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Debug, PartialEq, Model)]
/// struct Ingredient {
///     #[model(skip)]
///     pub id: String,
///     pub name: String,
///     pub in_stock: bool,
/// }
///
/// // generates:
/// // pub enum IngredientField { Name, InStock }
/// ```
///
/// - `#[model(skip)]` leaves a field out of the generated enum.
/// - `#[model(field = "MyFieldEnum")]` on the struct renames the enum.
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    model::derive_model(input)
}

// ============================================================================
// #[derive(Named)] derive macro
// ============================================================================

/// Derive macro for the `Named` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Named)]
/// struct Recipe {
///     #[named(id)]
///     pub recipe_id: String,
///     #[named(name)]
///     pub title: String,
/// }
/// ```
///
/// - `#[named(id)]` marks the identity field. Defaults to a field named `id`.
/// - `#[named(name)]` marks the display name field. Defaults to a field named `name`.
#[proc_macro_derive(Named, attributes(named))]
pub fn derive_named(input: TokenStream) -> TokenStream {
    named::derive_named(input)
}
