use std::borrow::Cow;

/// Registry, seeding and query failures.
#[cargroup_derive::cargroup_error]
pub enum GroupsError {
    #[error("Group {region}/{brand} already exists{}", format_context(.context))]
    DuplicateGroup { region: String, brand: String, context: Option<Cow<'static, str>> },

    #[error("Group {region}/{brand} not found{}", format_context(.context))]
    GroupNotFound { region: String, brand: String, context: Option<Cow<'static, str>> },

    /// Membership would drop below zero, or an initial count is out of range.
    #[error("Invalid membership{}: {message}", format_context(.context))]
    InvalidMembership { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Capacity exceeded{}: {message}", format_context(.context))]
    CapacityExceeded { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Seeding already in progress{}", format_context(.context))]
    SeedingInProgress { context: Option<Cow<'static, str>> },

    /// A seeding pass stopped early; `created` groups were stored before the failure.
    #[error(
        "Seeding interrupted after {created} created, {skipped} skipped{}: {message}",
        format_context(.context)
    )]
    SeedingInterrupted {
        created: usize,
        skipped: usize,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// Storage backend failed or timed out.
    #[error("Persistence error{}: {message}", format_context(.context))]
    Persistence { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal groups error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl GroupsError {
    pub(crate) fn not_found(region: &str, brand: &str) -> Self {
        Self::GroupNotFound { region: region.to_owned(), brand: brand.to_owned(), context: None }
    }

    pub(crate) fn duplicate(region: &str, brand: &str) -> Self {
        Self::DuplicateGroup { region: region.to_owned(), brand: brand.to_owned(), context: None }
    }
}
