use cargroup_derive::cargroup_error;
use std::borrow::Cow;

#[cargroup_error]
pub enum SeedError {
    #[error("Seeding interrupted after {created} groups{}: {message}", format_context(.context))]
    Interrupted { created: usize, message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let result: Result<(), SeedError> =
        Err(SeedError::Interrupted { created: 3, message: "store offline".into(), context: None });
    let err = result.context("Kerala").unwrap_err();
    assert_eq!(err.to_string(), "Seeding interrupted after 3 groups (Kerala): store offline");
}
