//! # scrooge-primitives
//!
//! Primitive types for the ScroogeLedger validator.
//!
//! This crate provides the fundamental data types used throughout the system.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hash;

pub use hash::{HashError, H256};

/// Coin amount carried by a transaction output.
///
/// Signed: negative values are representable and rejected at validation.
pub type Amount = i64;

/// Position of an output inside its producing transaction
pub type OutputIndex = u32;
