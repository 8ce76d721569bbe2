//! Persistence layer.
//!
//! The application keeps everything in one SQLite file in the data directory.
//! [`db::Db`] owns the connection; [`storage::Storage`] exposes it as a
//! key-value store with whole-value overwrites.
//!
//! ```rust,no_run
//! use lazgo::db::storage::Storage;
//!
//! let mut storage = Storage::new()?;
//! storage.set("theme", "\"dark\"")?;
//! assert_eq!(storage.get("theme")?.as_deref(), Some("\"dark\""));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod db;
pub mod storage;
