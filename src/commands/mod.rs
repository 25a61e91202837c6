//! Command groups of the quantctl CLI.
//!
//! Each group owns its clap tree, the mapping from leaf to dispatch target,
//! and a `schema()` describing its leaves.

pub mod history;
pub mod master;
