use cargroup_derive::cargroup_error;
use std::borrow::Cow;

#[cargroup_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err::<(), _>(std::io::Error::other("disk gone")).context("Reading catalog")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.context_note(), Some("Reading catalog"));
    assert_eq!(err.to_string(), "IO error (Reading catalog): disk gone");

    let internal: DemoError = "boom".into();
    assert!(internal.context_note().is_none());
    assert_eq!(internal.to_string(), "Internal error: boom");
}
