//! fixrec-core: fixture reconciler core library.
//!
//! Bookmaker listings arrive as raw text: a locale-specific date phrase, two
//! competitor names and three prices. This crate resolves the phrase into a
//! [`CanonicalTimestamp`], folds the names into [`NormalizedName`]s, derives
//! an [`EventIdentity`] and uses it to find or deduplicate fixtures before
//! they are appended to a CSV store.
//!
//! # Architecture
//!
//! ```text
//! phrase ──┐
//!          ├──► identity ──► reconciler ──► store
//! normalizer┘                    │
//!                                └──► arbitrage (across stores)
//! ```
//!
//! Everything is synchronous. "Today" is always an explicit
//! [`ReferenceClock`].

pub mod arbitrage;
pub mod config;
pub mod csv;
pub mod error;
pub mod identity;
pub mod normalizer;
pub mod phrase;
pub mod reconciler;
pub mod store;
pub mod timestamp;
pub mod types;

pub use error::{Field, LookupError, ParseError, RecordError, StoreError};
pub use identity::{EventIdentity, FixtureQuery};
pub use normalizer::NormalizedName;
pub use reconciler::{BulkCollection, Lookup, MatchReconciler, Resolved, ScanReport, Skipped};
pub use store::{Columns, CsvStore, PersistedRecord, RecordSink};
pub use timestamp::CanonicalTimestamp;
pub use types::{Bookmaker, Odds, Outcome, RawEventRecord, ReferenceClock};
