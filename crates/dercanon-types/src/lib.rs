#![forbid(unsafe_code)]
#![doc = "Common error types for the dercanon ASN.1 canonicalizer."]

pub mod error;

pub use error::*;
