//! Attribute schema and the generic attribute store handed to the host engine
//!
//! Internally the crate works with strongly typed records. This module is the
//! one boundary where they become the loosely typed, string-keyed map the host
//! configuration engine consumes.

mod resource_data;
mod types;

pub use resource_data::ResourceData;
pub use types::{
    AttributeError,
    AttributeMap,
    AttributeSchema,
    AttributeType,
    AttributeValue,
    ScalarType,
    Schema,
};
