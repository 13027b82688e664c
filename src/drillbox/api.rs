//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. Every UI (the
//! bundled CLI, a menu, a test harness) goes through [`DrillApi`].
//!
//! The facade:
//! - **Dispatches** to the command function for each operation
//! - **Normalizes inputs** (integer lists, short-code settings from config)
//! - **Returns structured types** (`Result<CmdResult>`) with leveled messages
//!
//! Expected negative outcomes (unknown book id, no copies left, unknown short
//! code) come back as `Ok` results carrying a warning message. `Err` is kept
//! for validation, capacity and I/O failures.
//!
//! `DrillApi<S: DocumentStore>` is generic over the storage backend:
//! `FileStore` in production, `InMemoryStore` in tests.

use crate::commands;
use crate::commands::catalog;
use crate::commands::links::{self, CodeGenerator};
use crate::commands::{calc, history, lis, text};
use crate::config::DrillConfig;
use crate::error::Result;
use crate::model::ShortLink;
use crate::store::DocumentStore;
use std::path::PathBuf;

pub struct DrillApi<S: DocumentStore> {
    store: S,
    data_dir: PathBuf,
    generator: CodeGenerator,
}

impl<S: DocumentStore> DrillApi<S> {
    pub fn new(store: S, data_dir: PathBuf, config: &DrillConfig) -> Self {
        Self {
            store,
            data_dir,
            generator: CodeGenerator::from_config(config),
        }
    }

    pub fn add_book(&mut self, title: &str, author: &str, copies: u32) -> Result<CmdResult> {
        let book = catalog::add(&mut self.store, title, author, copies)?;
        let message = CmdMessage::success(format!("Added: {} ({})", book.title, book.id));
        Ok(CmdResult::default()
            .with_books(vec![book])
            .with_message(message))
    }

    pub fn search_books(&mut self, query: &str) -> Result<CmdResult> {
        let books = catalog::search(&mut self.store, query)?;
        let message = if books.is_empty() {
            CmdMessage::info("No results.")
        } else {
            CmdMessage::info(format!("Found {} result(s).", books.len()))
        };
        Ok(CmdResult::default().with_books(books).with_message(message))
    }

    pub fn borrow_book(&mut self, id: &str) -> Result<CmdResult> {
        let outcome = catalog::borrow(&mut self.store, id.trim())?;
        Ok(loan_result(outcome))
    }

    pub fn return_book(&mut self, id: &str) -> Result<CmdResult> {
        let outcome = catalog::give_back(&mut self.store, id.trim())?;
        Ok(loan_result(outcome))
    }

    pub fn shorten(&mut self, url: &str) -> Result<CmdResult> {
        let link = links::shorten(&mut self.store, &self.generator, url.trim())?;
        let message = CmdMessage::success(format!("Short code: {}", link.code));
        Ok(CmdResult::default()
            .with_links(vec![link])
            .with_message(message))
    }

    pub fn redirect(&mut self, code: &str) -> Result<CmdResult> {
        let code = code.trim();
        match links::redirect(&mut self.store, code)? {
            Some(url) => Ok(CmdResult::default().with_links(vec![ShortLink {
                code: code.to_string(),
                url,
            }])),
            None => Ok(CmdResult::default()
                .with_message(CmdMessage::warning(format!("No URL for code: {}", code)))),
        }
    }

    pub fn calculate(&mut self, expr: &str) -> Result<CmdResult> {
        let entry = calc::calculate(&mut self.store, expr)?;
        Ok(CmdResult::default()
            .with_value(entry.result)
            .with_history(vec![entry]))
    }

    pub fn history(&mut self) -> Result<CmdResult> {
        let entries = history::all(&mut self.store)?;
        let mut result = CmdResult::default().with_history(entries);
        if result.history.is_empty() {
            result.add_message(CmdMessage::info("History is empty."));
        }
        Ok(result)
    }

    pub fn lis_length<I: AsRef<str>>(&self, inputs: &[I]) -> Result<CmdResult> {
        let joined = inputs
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<&str>>()
            .join(" ");
        let values = lis::parse_integers(&joined)?;
        Ok(CmdResult::default().with_length(lis::lis_length(&values)))
    }

    pub fn word_frequencies(&self, input: &str) -> Result<CmdResult> {
        Ok(CmdResult::default().with_words(text::word_frequencies(input)))
    }

    pub fn brackets(&self, input: &str) -> Result<CmdResult> {
        let message = if text::brackets_balanced(input) {
            CmdMessage::success("Balanced.")
        } else {
            CmdMessage::warning("Not balanced.")
        };
        Ok(CmdResult::default().with_message(message))
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }
}

fn loan_result(outcome: LoanOutcome) -> CmdResult {
    let message = if outcome.is_success() {
        CmdMessage::success(outcome.message())
    } else {
        CmdMessage::warning(outcome.message())
    };
    let books = outcome.book().cloned().into_iter().collect();
    CmdResult::default().with_books(books).with_message(message)
}

pub use crate::commands::catalog::LoanOutcome;
pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
