//! Common types shared across the pano-xmp crates.

pub mod error;
pub mod value;

pub use error::{XmpError, XmpResult};
pub use value::XmpValue;
