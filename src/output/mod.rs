//! Output module for pagesift
//!
//! Handles everything that touches the filesystem: converting page titles
//! into safe filenames and persisting extracted text without ever leaving
//! a truncated file behind.

mod filename;
mod writer;

pub use filename::sanitize_filename;
pub use writer::{download_filename, write_page_text};
