//! Common types, protocol definitions, and errors shared across `cardvault` crates.

pub mod brand;
pub mod error;
pub mod protocol;

pub use brand::CardBrand;
pub use error::ServiceError;
