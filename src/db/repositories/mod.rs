//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod user_repo;
pub mod workshop_repo;

pub use user_repo::UserRepository;
pub use workshop_repo::{NewWorkshop, WorkshopRepository};
