//! Test utilities for Warden services.
//!
//! Provides `MockSession` for minting session cookies without going through a
//! sign-in flow. Import in tests only; never in production code.

pub mod session;
