//! Test organization for the chessbox engine
//!
//! This module organizes tests into logical groupings:
//! - `common`: Shared test utilities and helpers
//! - `unit`: Unit tests for individual components

pub mod unit;
