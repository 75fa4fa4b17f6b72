//! Domain types shared across Warden crates.
//!
//! Pure types and rules with no framework dependencies: username and password
//! rules, role names and landing areas, field-level validation errors. Any
//! layer of a service may use them.

pub mod account;
pub mod password;
pub mod role;
pub mod validation;
