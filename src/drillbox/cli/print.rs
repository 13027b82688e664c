use colored::Colorize;
use drillbox::api::{CmdMessage, MessageLevel};
use drillbox::commands::calc::format_number;
use drillbox::config::DrillConfig;
use drillbox::model::{Book, HistoryEntry, ShortLink};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TITLE_WIDTH: usize = 32;
const AUTHOR_WIDTH: usize = 24;

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(crate) fn print_books(books: &[Book]) {
    if books.is_empty() {
        return;
    }

    println!(
        "{}  {}  {}  {}",
        "ID      ".bold(),
        pad_to_width("Title", TITLE_WIDTH).bold(),
        pad_to_width("Author", AUTHOR_WIDTH).bold(),
        "Borrowed".bold()
    );
    for book in books {
        let loans = format!("{}/{}", book.borrowed, book.copies);
        let loans = if book.available() == 0 {
            loans.red()
        } else {
            loans.normal()
        };
        println!(
            "{}  {}  {}  {}",
            book.id.yellow(),
            pad_to_width(&truncate_to_width(&book.title, TITLE_WIDTH), TITLE_WIDTH),
            pad_to_width(&truncate_to_width(&book.author, AUTHOR_WIDTH), AUTHOR_WIDTH),
            loans
        );
    }
}

pub(crate) fn print_links(links: &[ShortLink]) {
    for link in links {
        println!("{}  {}", link.code.yellow(), link.url);
    }
}

pub(crate) fn print_history(entries: &[HistoryEntry]) {
    for entry in entries {
        println!("{} = {}", entry.expr, format_number(entry.result).bold());
    }
}

pub(crate) fn print_words(words: &[(String, usize)]) {
    for (word, count) in words {
        println!("{} - {}", word, count);
    }
}

pub(crate) fn print_config(config: &DrillConfig) {
    for key in drillbox::config::KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
