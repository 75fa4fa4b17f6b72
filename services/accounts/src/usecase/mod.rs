pub mod account;
pub mod admin;
pub mod external;
pub mod seed;
pub mod session;
mod shared;

pub use shared::SignedIn;
