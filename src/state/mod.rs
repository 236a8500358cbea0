//! State module for tracking crawl progress
//!
//! The crawl state is the one piece of shared mutable data in pagesift.
//! It partitions every discovered URL into exactly one of three sets
//! (pending, in-process, visited) and enforces the at-most-once-visit
//! guarantee through atomic claim/complete operations.

mod tracker;

pub use tracker::CrawlState;
