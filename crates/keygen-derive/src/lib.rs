//! Procedural macros for keygen.
//!
//! Provides `#[derive(Fill)]`, which lets the structural walker populate a
//! struct field by field.

use proc_macro::TokenStream;

/// Fill derive macro implementation.
mod fill;

/// Derives `keygen::Fill` for a struct.
///
/// Each field is filled under the parent key path extended with the field name
/// in snake_case (tuple structs use the field index). Field attributes:
///
/// - `#[keygen(rename = "segment")]` - use `segment` as key segment
/// - `#[keygen(skip)]` - leave the field at `Default::default()`
/// - `#[keygen(generator("name", "arg", ...))]` - fill the field from the
///   named generator `name` with the given arguments; `generator()` with no
///   name fills the field normally
///
/// ```ignore
/// #[derive(Fill)]
/// struct Order {
///     id: u64,
///     #[keygen(rename = "lines")]
///     items: Vec<Item>,
///     #[keygen(generator("int"))]
///     quantity: u16,
///     #[keygen(skip)]
///     note: String,
/// }
/// ```
#[proc_macro_derive(Fill, attributes(keygen))]
pub fn derive_fill(input: TokenStream) -> TokenStream {
    fill::derive_fill(input)
}
