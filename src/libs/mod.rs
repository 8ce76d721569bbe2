//! Core library modules for lazgo.
//!
//! - **Domain**: tardiness calculation, records, reasons, roster, insight
//! - **Persistence**: the record store over local key-value storage
//! - **AI reports**: prompts, report results and slots, the controller
//! - **Presentation**: console views, exports, formatting, theme
//! - **Infrastructure**: configuration, data directory, API key, messages
//!
//! ```rust,no_run
//! use lazgo::db::storage::Storage;
//! use lazgo::libs::store::RecordStore;
//!
//! let storage = Storage::new()?;
//! let store = RecordStore::load(&storage)?;
//! println!("{} records", store.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod data_storage;
pub mod export;
pub mod formatter;
pub mod insight;
pub mod messages;
pub mod prompt;
pub mod reason;
pub mod record;
pub mod report;
pub mod roster;
pub mod secret;
pub mod store;
pub mod tardiness;
pub mod theme;
pub mod tracker;
pub mod view;
