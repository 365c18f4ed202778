//! File actions module.
//!
//! This module provides functionality for:
//! - Permanent deletion (default)
//! - Safe deletion via the trash crate
//! - The per-group deletion policy (prompt / force / pretend)
//!
//! # Deletion
//!
//! ```no_run
//! use namedupe::actions::delete::permanent_delete;
//! use std::path::PathBuf;
//!
//! let path = PathBuf::from("/path/to/track.mp3");
//! let result = permanent_delete(&path);
//! ```
//!
//! # Policy
//!
//! [`DeletionPolicy`] decides, for every delete-eligible member of a
//! duplicate group, whether it is removed, and reports the decision.

pub mod delete;
pub mod policy;

// Re-export commonly used types
pub use delete::{
    delete_file, delete_to_trash, permanent_delete, DeleteError, DeleteMethod, DeleteResult,
};
pub use policy::{DeletionPolicy, FileOutcome, Outcome};
