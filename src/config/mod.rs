//! Configuration module for pagesift
//!
//! Configuration is assembled once from command-line arguments, validated,
//! and passed immutably to the driver. Invalid seeds or patterns are the
//! only fatal errors pagesift knows: everything after startup is isolated
//! per URL.

mod types;
mod validation;

pub use types::{Config, DownloadConfig};
pub use validation::{compile_pattern, parse_seed_url};
