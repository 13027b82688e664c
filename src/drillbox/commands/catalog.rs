//! Book catalog: add, search, borrow and return over the `books` document.
//!
//! Ids are derived from title and author (see [`crate::model::book_id`]), so
//! adding the same pair twice yields two records with one id. Lookups by id
//! always act on the first of them.

use crate::error::{DrillError, Result};
use crate::model::{Book, Catalog};
use crate::store::DocumentStore;
use tracing::{debug, info};

/// Result of a borrow or return request.
///
/// Only the two success variants change the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanOutcome {
    Borrowed(Book),
    Returned(Book),
    NotFound,
    NoAvailableCopies,
    NothingToReturn,
}

impl LoanOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoanOutcome::Borrowed(_) | LoanOutcome::Returned(_))
    }

    pub fn book(&self) -> Option<&Book> {
        match self {
            LoanOutcome::Borrowed(book) | LoanOutcome::Returned(book) => Some(book),
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            LoanOutcome::Borrowed(_) => "Borrowed successfully.",
            LoanOutcome::Returned(_) => "Returned successfully.",
            LoanOutcome::NotFound => "Book ID not found.",
            LoanOutcome::NoAvailableCopies => "No available copies.",
            LoanOutcome::NothingToReturn => "No borrowed copies to return.",
        }
    }
}

/// Add a book with `copies` copies. `copies` below 1 is rejected.
pub fn add<S: DocumentStore>(store: &mut S, title: &str, author: &str, copies: u32) -> Result<Book> {
    if copies < 1 {
        return Err(DrillError::Validation(format!(
            "copies must be at least 1, got {}",
            copies
        )));
    }

    let mut catalog: Catalog = store.open()?;
    let book = Book::new(title.to_string(), author.to_string(), copies);
    if catalog.books.iter().any(|b| b.id == book.id) {
        debug!(id = %book.id, "adding book whose id is already in the catalog");
    }
    catalog.books.push(book.clone());
    store.commit(&catalog)?;

    info!(id = %book.id, title = %book.title, copies, "book added");
    Ok(book)
}

/// Case-insensitive match on title or author substring, or on the exact id.
/// Results keep catalog order.
pub fn search<S: DocumentStore>(store: &mut S, query: &str) -> Result<Vec<Book>> {
    let catalog: Catalog = store.open()?;
    let query = query.trim().to_lowercase();

    Ok(catalog
        .books
        .into_iter()
        .filter(|b| {
            b.title.to_lowercase().contains(&query)
                || b.author.to_lowercase().contains(&query)
                || b.id.to_lowercase() == query
        })
        .collect())
}

pub fn borrow<S: DocumentStore>(store: &mut S, id: &str) -> Result<LoanOutcome> {
    update_loan(store, id, |book| {
        if book.borrowed < book.copies {
            book.borrowed += 1;
            LoanOutcome::Borrowed(book.clone())
        } else {
            LoanOutcome::NoAvailableCopies
        }
    })
}

pub fn give_back<S: DocumentStore>(store: &mut S, id: &str) -> Result<LoanOutcome> {
    update_loan(store, id, |book| {
        if book.borrowed > 0 {
            book.borrowed -= 1;
            LoanOutcome::Returned(book.clone())
        } else {
            LoanOutcome::NothingToReturn
        }
    })
}

fn update_loan<S, F>(store: &mut S, id: &str, apply: F) -> Result<LoanOutcome>
where
    S: DocumentStore,
    F: FnOnce(&mut Book) -> LoanOutcome,
{
    let mut catalog: Catalog = store.open()?;
    let Some(book) = catalog.books.iter_mut().find(|b| b.id == id) else {
        return Ok(LoanOutcome::NotFound);
    };

    let outcome = apply(book);
    if outcome.is_success() {
        store.commit(&catalog)?;
    }
    debug!(id, outcome = outcome.message(), "loan update");
    Ok(outcome)
}
