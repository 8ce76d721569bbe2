//! # LazGo - student tardiness logging
//!
//! A command-line assistant for school staff that records late arrivals,
//! classifies them by delay, and turns them into ready-to-send reports with
//! the help of a generative-language service.
//!
//! ## Features
//!
//! - **Tardiness Log**: Record late students with arrival time and reason
//! - **Categories**: Ringan, Sedang and Berat by minutes late
//! - **AI Reports**: Per-event summary, WhatsApp message for parents and a
//!   daily recap; monthly analysis with a parent notice for repeat offenders
//! - **Insight**: Most common reason, top class, average delay
//! - **Data Export**: Daily and monthly CSV, Excel and PDF files
//! - **Roster**: Student name and class suggestions from an imported list
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lazgo::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
