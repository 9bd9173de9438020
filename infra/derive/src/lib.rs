#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the CarGroup workspace.
//!
//! * [`cargroup_error`] turns an enum into a contextual `thiserror` error.
//! * [`cargroup_slice`] turns a struct into an `Arc`-backed feature slice handle.
//! * [`api_model`] / [`api_handler`] keep DTOs and Axum handlers consistent with the `OpenAPI` document.
//! * [`main`] bootstraps the tuned Tokio runtime (re-exported by `cargroup-runtime`).
//!
//! Doc examples are `ignore`d: the expansions reference crates that only exist
//! in the consuming crates.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Bootstraps a tuned Tokio runtime around an `async fn main`.
///
/// # Arguments
///
/// * `high_performance` - server profile (larger stacks, longer keep-alive).
/// * `memory_efficient` - half the workers, smaller stacks.
/// * `default` or nothing - auto-detected worker count.
///
/// # Examples
///
/// ```rust,ignore
/// #[cargroup_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Defines a wire DTO.
///
/// Adds `Debug`, `Serialize` and `Deserialize` when missing, derives
/// `utoipa::ToSchema` under the consuming crate's `server` feature, and applies
/// `rename_all = "camelCase"` plus `deny_unknown_fields` unless overridden.
///
/// # Example
///
/// ```rust,ignore
/// use cargroup_derive::api_model;
///
/// #[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
/// pub struct GroupView {
///     pub brand: String,
///     pub current_members: u32,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Registers an Axum handler with `utoipa::path` under the consuming crate's
/// `server` feature.
///
/// Accepts the regular `utoipa::path` arguments (`get`, `path = "..."`,
/// `params(...)`, `responses(...)`, `tag = ...`).
///
/// # Example
///
/// ```rust,ignore
/// #[api_handler(get, path = "/car-data", responses((status = OK, body = BrandList)), tag = CATALOG_TAG)]
/// pub async fn list_brands(State(state): State<ApiState>) -> Result<Json<BrandList>, ApiError> {
///     todo!()
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Defines a domain error enum.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` when not already derived.
/// * A `<Name>Ext` trait adding `.context(...)` to `Result<T, Name>` and to
///   `Result<T, Source>` for every variant that wraps a `source`.
/// * `From<Source>` for variants with a `source` field.
/// * `From<&'static str>` / `From<String>` when an `Internal` variant exists.
/// * `Name::context_note()` returning the attached context, if any.
///
/// # Requirements
///
/// Variants must use named fields. Variants with a `source` must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[cargroup_derive::cargroup_error]
/// pub enum CatalogError {
///     #[error("Catalog parse error{}: {source}", format_context(.context))]
///     Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal catalog error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn cargroup_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Defines a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` wraps it in an `Arc`,
/// derefs to it and implements `FeatureSlice` so it can be registered in the
/// kernel's `ApiState`.
///
/// # Example
///
/// ```rust,ignore
/// #[cargroup_derive::cargroup_slice]
/// pub struct Catalog {
///     pub store: CatalogStore,
/// }
///
/// let slice = Catalog::new(CatalogInner { store });
/// ```
#[proc_macro_attribute]
pub fn cargroup_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
