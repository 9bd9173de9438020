use std::borrow::Cow;

/// Failures while loading the vehicle catalog.
#[cargroup_derive::cargroup_error]
pub enum CatalogError {
    #[error("Catalog file error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Catalog parse error{}: {source}", format_context(.context))]
    Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// The document parsed but breaks a catalog rule (duplicate names, price bounds, ...).
    #[error("Invalid catalog{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
