//! Proc macros for trellis: `descriptor!` compile-time descriptor validation.
//!
//! This crate is not meant to be used directly; enable the `macros` feature on `trellis`.

use proc_macro::TokenStream;

mod descriptor_macro;

/// Declare a component descriptor with compile-time validation.
///
/// Expands to a `trellis::descriptor::DescriptorBuilder` chain, suitable as
/// the body of `View::descriptor`.
///
/// # Syntax
///
/// - `property name;`: property with a `Null` default
/// - `property name = <literal>;`: text, bool, integer or float default
/// - `property name = <literal> no_rerender;`: setter stores without re-rendering
/// - `aggregation items => anchorRef;`: aggregation rendered into the element
///   whose `ref` is `anchorRef` (a string literal is also accepted)
/// - `event name;`
///
/// Duplicate names, irregular plurals, empty anchors and non-text `id`
/// defaults are compile errors.
///
/// # Example
///
/// ```ignore
/// fn descriptor(&self) -> DescriptorBuilder {
///     descriptor! {
///         property loading = true;
///         aggregation cards => cardList;
///         event loaded;
///     }
/// }
/// ```
#[proc_macro]
pub fn descriptor(input: TokenStream) -> TokenStream {
    descriptor_macro::descriptor_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
