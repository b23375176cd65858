mod draft;
mod errors;
mod input;

pub use draft::{normalize, parse_magnitude, validate, TransactionDraft};
pub use errors::ValidationError;
pub use input::{capitalize_first, filter_amount_input};
