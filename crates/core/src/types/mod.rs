//! Core types for Emporium.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod key;

pub use key::*;
