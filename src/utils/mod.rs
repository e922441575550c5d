//! Utility modules

pub mod math;

pub use math::{positions_of, rotate, signed_offset};
