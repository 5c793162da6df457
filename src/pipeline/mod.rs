//! Pipeline Module - Write-time transforms and advisory validators
//!
//! The per-path pipeline the store runs on write ([`Transform`]) and the
//! rules bindings evaluate lazily on read ([`Validator`]). Both sides are
//! pure functions with combinators ([`pipe`], [`all`]).

mod transforms;
mod validators;

pub use transforms::{currency, lowercase, pipe, to_number, trim, uppercase, Transform};
pub use validators::{
    all, email, max_length, min_length, range, required, Validator, Validity,
};
