//! Repository interfaces for entity persistence.

pub mod listing;
pub mod user;

pub use listing::ListingRepository;
pub use user::UserRepository;
