//! Repository implementations for database access
//!
//! Each repository borrows the pool and follows these patterns:
//! - Multi-statement writes run in a transaction
//! - Duplicates handled via ON CONFLICT (no check-then-insert)
//! - Store errors propagate unchanged as `DbError`

pub mod assignments;
pub mod segments;
pub mod users;

pub use assignments::AssignmentRepo;
pub use segments::SegmentRepo;
pub use users::UserRepo;
