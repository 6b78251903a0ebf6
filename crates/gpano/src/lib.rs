//! Photo sphere (GPano) metadata schema and writer.
//!
//! Supports:
//! - Validated panorama descriptors per the published GPano schema
//! - Merging photo-sphere properties into an existing XMP document
//!   without disturbing unrelated namespaces

pub mod descriptor;
pub mod schema;
pub mod writer;

pub use descriptor::{
    ConstraintViolation, PanoramaDescriptor, PanoramaParams, ProjectionType, ValidationError,
};
pub use writer::{write_photo_sphere, write_photo_sphere_metadata};
