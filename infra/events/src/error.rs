use std::borrow::Cow;

/// Errors raised by [`crate::EventBus`] operations.
#[cargroup_derive::cargroup_error]
pub enum EventBusError {
    /// The channel registered for an event type holds a different sender type.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Broadcast capacity must be greater than zero.
    #[error("Invalid capacity{}: {message}", format_context(.context))]
    InvalidCapacity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
