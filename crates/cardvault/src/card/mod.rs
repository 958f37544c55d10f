//! Card number extraction, checksum validation, and brand classification.
//!
//! Everything here is pure and synchronous: no I/O, no shared state, and no
//! dependency on `crate::crypto`. Callers in the server layer decide what to do
//! with a missing candidate or an invalid number; nothing in this module errors.
//!
//! # Module invariants
//!
//! - **No logging.** Functions here see raw card digits and must not emit them.

pub mod brand;
pub mod extract;
pub mod luhn;

pub use brand::classify;
pub use extract::extract;
pub use luhn::{normalize, validate};
