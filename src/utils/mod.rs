//! Utility modules for common functionality
//!
//! This module provides helpers shared by the writers and the commands.

pub(crate) mod write_utils;
pub mod format_utils;
