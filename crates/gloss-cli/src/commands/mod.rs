//! CLI command implementations.

pub mod annotate;
pub mod fix;
pub mod highlight;
pub mod lookup;
pub mod scan;
pub mod search;
pub mod status;
pub mod validate;
