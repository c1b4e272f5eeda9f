//! Shared utilities for the Timeclock backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Timezone-aware calendar and minute-of-day arithmetic
//! - Password hashing with Argon2id

pub mod password;
pub mod time;
