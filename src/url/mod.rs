//! URL handling module for pagesift
//!
//! Provides href-to-absolute-URL resolution. The canonical absolute string
//! form produced here is the identity used for visit deduplication: two URLs
//! are the same page iff their strings are equal.

mod resolve;

pub use resolve::resolve_href;
