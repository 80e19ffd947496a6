//! Domain entities representing core business objects.

pub mod user;


pub use user::User;
