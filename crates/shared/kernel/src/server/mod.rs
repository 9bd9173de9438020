pub mod error;
mod extract;
mod health;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorBody, ErrorDetail};
pub use extract::extract_json;
pub use state::{ApiState, ApiStateBuilder, ApiStateError};
