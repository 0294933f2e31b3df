//! Utility Modules
//!
//! This module provides helper functions used across all processors.
//!
//! # Modules
//!
//! - `assertions`: Common validation checks (ownership, signer, PDAs, etc.)
//! - `accounts`: Creating, resizing and closing program accounts
//! - `token`: SPL token and associated token account CPIs

pub mod accounts;
pub mod assertions;
pub mod token;

// Re-export all utilities for easy access
pub use accounts::*;
pub use assertions::*;
pub use token::*;
