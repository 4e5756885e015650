//! fixrec: fixture reconciler for scraped bookmaker listings.
//!
//! Re-exports the two workspace crates so integration tests, benches and the
//! binary import one path, and hosts the [`app`] layer the CLI drives.
//!
//! # Architecture
//!
//! ```text
//! RowSource ──► SourceAdapter ──► Feed ──► MatchReconciler ──► CsvStore
//!                                               │
//!                       CsvStore (all books) ───┴──► arbitrage
//! ```
//!
//! Everything runs on the calling thread. The feed is polled only when the
//! reconciler asks for the next record.

pub mod app;

pub use fixrec_core::*;
pub use fixrec_feeds as feeds;
pub use fixrec_feeds::{adapter_for, BatchSource, Feed, FeedError, RowSource, ScrapedRow, SnapshotSource, SourceAdapter};
