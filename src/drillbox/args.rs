use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "drillbox", version)]
#[command(about = "Book catalog, URL shortener, calculator and friends", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding books.json, urls.json and calc_history.json
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the book catalog
    #[command(alias = "b")]
    Book {
        #[command(subcommand)]
        action: BookCommands,
    },

    /// Shorten URLs and look them up
    #[command(alias = "l")]
    Link {
        #[command(subcommand)]
        action: LinkCommands,
    },

    /// Evaluate an arithmetic expression and record it
    #[command(alias = "c")]
    Calc {
        /// Expression using digits, + - * / % ( ) . and spaces
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        expr: Vec<String>,
    },

    /// Show calculator history
    History,

    /// Length of the longest strictly increasing subsequence
    Lis {
        /// Integers (e.g. 3 10 2 1 20)
        #[arg(num_args = 0.., allow_negative_numbers = true)]
        values: Vec<String>,
    },

    /// Count word frequencies in a paragraph
    Words { text: String },

    /// Check that (), [] and {} are balanced
    Brackets { text: String },

    /// Get or set configuration
    Config {
        /// Configuration key (code-length, code-alphabet, max-attempts)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum BookCommands {
    /// Add a book
    #[command(alias = "a")]
    Add {
        title: String,
        author: String,

        /// Number of copies (at least 1)
        #[arg(short, long, default_value_t = 1)]
        copies: u32,
    },

    /// Search by title, author or id
    #[command(alias = "s")]
    Search {
        #[arg(default_value = "")]
        query: String,
    },

    /// Borrow a copy
    Borrow { id: String },

    /// Return a copy
    Return { id: String },
}

#[derive(Subcommand, Debug)]
pub enum LinkCommands {
    /// Create a short code for a URL
    #[command(alias = "s")]
    Shorten { url: String },

    /// Print the URL behind a code
    #[command(alias = "redirect")]
    Open { code: String },
}
