//! # Drillbox Architecture
//!
//! Drillbox is a handful of small drills behind one command line: a book
//! catalog, a URL shortener, a calculator with history, a longest increasing
//! subsequence counter, a word counter and a bracket checker. Three of them
//! keep state, and all three keep it the same way: one JSON document each,
//! loaded whole, changed in memory, saved whole.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, cli/)                         │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - One method per user action                               │
//! │  - Returns CmdResult: payload plus leveled messages         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Catalog, links, history, calc, lis, text                 │
//! │  - Typed results (Book, LoanOutcome, Option<String>, ...)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DocumentStore trait: load_or_init / save                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! No command depends on another except through the store contract
//! (the calculator appends to the history log).
//!
//! ## Errors
//!
//! Not finding something is an answer, not an error: a missing book id is a
//! [`commands::catalog::LoanOutcome::NotFound`], a missing short code is
//! `Ok(None)`. [`error::DrillError`] covers the rest: bad input, an exhausted
//! short-code space, and storage failures.
//!
//! ## Single writer
//!
//! Each operation reads a whole document and writes it back. Two processes
//! working on the same data directory can lose each other's updates; the
//! last save wins.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per drill
//! - [`store`]: Document storage abstraction and implementations
//! - [`model`]: Persisted record and document types
//! - [`config`]: Short-code settings in `config.json`
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
