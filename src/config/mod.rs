//! Configuration module for subsplit
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Source table naming

pub mod paths;
pub mod settings;

pub use paths::SubsplitPaths;
pub use settings::{Settings, TableNames};
