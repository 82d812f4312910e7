//! # Salted-Bloom Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # End-to-end filter scenarios
//!     ├── scenarios.rs  # Range insert/query, sizing, equality
//!     └── sharing.rs    # Filters shared across threads by the caller
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p salted-bloom-tests
//! cargo test -p salted-bloom-tests integration::scenarios::
//! ```

pub mod integration;
