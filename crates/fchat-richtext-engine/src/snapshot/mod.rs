//! # Snapshot Testing Support
//!
//! - **`dump`**: an indented, line-per-node text form of a node tree, used by
//!   `insta` snapshots and the CLI's `tree` output
//! - **`invariants`**: structural checks every parse result must pass

pub mod dump;
pub mod invariants;

pub use dump::{Dump, dump};
pub use invariants::check as invariants;
