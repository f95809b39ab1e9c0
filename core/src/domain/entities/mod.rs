//! Domain entities.

pub mod listing;
pub mod token;
pub mod user;

pub use listing::Listing;
pub use token::{Claims, TokenScope};
pub use user::User;
