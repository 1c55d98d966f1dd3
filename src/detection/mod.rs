//! Detection module.
//!
//! Pattern recognizers and the per-kind maskers that redact what they find.

pub mod maskers;
pub mod patterns;

pub use maskers::*;
pub use patterns::*;
