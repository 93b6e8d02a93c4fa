#![forbid(unsafe_code)]
#![doc = "Common types, error codes, algorithm identifiers, and buffer results for crlkit."]

pub mod algorithm;
pub mod error;
pub mod fill;

pub use algorithm::*;
pub use error::*;
pub use fill::Fill;
