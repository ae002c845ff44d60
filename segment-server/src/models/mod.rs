//! Domain models
//!
//! Request input is only type-checked; decode failures become
//! `ValidationError`, never a panic.

pub mod segment;
pub mod user;
pub mod validation;

pub use segment::{AssignmentRequest, Segment, SegmentRequest};
pub use user::User;
pub use validation::ValidationError;
