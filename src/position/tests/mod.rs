//! Position module tests.
//!
//! Tests are organized into separate files by category:
//! - `apply.rs` - Move application correctness
//! - `edge_cases.rs` - Castling, en passant, and promotion edge cases
//! - `perft.rs` - Node-count validation of move generation
//! - `proptest.rs` - Property-based tests

mod apply;
