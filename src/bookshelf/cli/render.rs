//! # Rendering
//!
//! Layout (width, truncation, padding) is computed on display width with
//! `unicode-width` so Cyrillic and CJK titles line up. Color is applied after
//! padding so escape codes never count toward column widths.

use bookshelf::api::{CmdMessage, MessageLevel};
use bookshelf::model::{Book, Status};
use colored::Colorize;
use std::io::IsTerminal;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const ID_WIDTH: usize = 36;
pub const TITLE_WIDTH: usize = 30;
pub const AUTHOR_WIDTH: usize = 20;
pub const YEAR_WIDTH: usize = 4;
pub const STATUS_WIDTH: usize = 11;
const SEPARATOR: &str = " | ";
pub const EMPTY_MESSAGE: &str = "Catalog is empty.";

/// Renders books as a table, colored when stdout is a terminal.
pub fn render_book_table(books: &[Book]) -> String {
    render_book_table_internal(books, std::io::stdout().is_terminal())
}

fn render_book_table_internal(books: &[Book], use_color: bool) -> String {
    if books.is_empty() {
        return format!("{}\n", EMPTY_MESSAGE);
    }

    let mut out = String::new();
    let header = [
        pad_to_width("ID", ID_WIDTH),
        pad_to_width("Title", TITLE_WIDTH),
        pad_to_width("Author", AUTHOR_WIDTH),
        pad_to_width("Year", YEAR_WIDTH),
        pad_to_width("Status", STATUS_WIDTH),
    ]
    .join(SEPARATOR);
    let rule = "-".repeat(header.width());
    if use_color {
        out.push_str(&header.bold().to_string());
    } else {
        out.push_str(&header);
    }
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for book in books {
        let status = pad_to_width(book.status.label(), STATUS_WIDTH);
        let status = if use_color {
            paint_status(&status, book.status)
        } else {
            status
        };
        let row = [
            pad_to_width(&book.id, ID_WIDTH),
            pad_to_width(&truncate_to_width(&book.title, TITLE_WIDTH), TITLE_WIDTH),
            pad_to_width(&truncate_to_width(&book.author, AUTHOR_WIDTH), AUTHOR_WIDTH),
            format!("{:>width$}", book.year, width = YEAR_WIDTH),
            status,
        ]
        .join(SEPARATOR);
        out.push_str(row.trim_end());
        out.push('\n');
    }

    out
}

fn paint_status(text: &str, status: Status) -> String {
    match status {
        Status::Available => text.green().to_string(),
        Status::CheckedOut => text.yellow().to_string(),
    }
}

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub fn render_text_list(lines: &[String], empty_message: &str) -> String {
    if lines.is_empty() {
        return format!("{}\n", empty_message);
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

/// Cuts `s` to at most `max_width` columns, marking the cut with an ellipsis.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
