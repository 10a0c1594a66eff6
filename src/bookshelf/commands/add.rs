use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::catalog::Catalog;

pub fn run<B: StorageBackend>(
    catalog: &mut Catalog<B>,
    title: String,
    author: String,
    year: i64,
) -> Result<CmdResult> {
    let book = catalog.add(title, author, year)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Book '{}' added with id {}",
        book.title, book.id
    )));
    result.affected_books.push(book);
    Ok(result)
}
