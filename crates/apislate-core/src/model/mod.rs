pub mod operations;
pub mod schemas;
pub mod types;

pub use operations::*;
pub use schemas::*;
pub use types::{Contact, Info, License, NormalizedName, PathItem, Specification, Tag};
