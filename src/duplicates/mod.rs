//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Name-stem grouping of the files in one directory
//! - The run pipeline tying walking, grouping and deletion together

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderError, RunSummary};
pub use groups::{group_by_stem, DuplicateGroup, GroupingStats};
