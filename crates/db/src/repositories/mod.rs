//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&dyn DocumentStore` as the first argument.

pub mod record_repo;
pub mod testimonial_repo;
pub mod user_repo;

pub use record_repo::RecordRepo;
pub use testimonial_repo::TestimonialRepo;
pub use user_repo::UserRepo;
