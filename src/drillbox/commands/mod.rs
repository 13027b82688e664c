use crate::config::DrillConfig;
use crate::model::{Book, HistoryEntry, ShortLink};

pub mod calc;
pub mod catalog;
pub mod config;
pub mod history;
pub mod links;
pub mod lis;
pub mod text;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Structured outcome of one API call, rendered by whichever UI made it.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub books: Vec<Book>,
    pub links: Vec<ShortLink>,
    pub history: Vec<HistoryEntry>,
    pub words: Vec<(String, usize)>,
    pub value: Option<f64>,
    pub length: Option<usize>,
    pub config: Option<DrillConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_books(mut self, books: Vec<Book>) -> Self {
        self.books = books;
        self
    }

    pub fn with_links(mut self, links: Vec<ShortLink>) -> Self {
        self.links = links;
        self
    }

    pub fn with_history(mut self, history: Vec<HistoryEntry>) -> Self {
        self.history = history;
        self
    }

    pub fn with_words(mut self, words: Vec<(String, usize)>) -> Self {
        self.words = words;
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_config(mut self, config: DrillConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// False when any message reports a warning or an error.
    pub fn is_success(&self) -> bool {
        !self
            .messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }
}
