use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::catalog::{Catalog, DeleteOutcome};

pub fn run<B: StorageBackend>(catalog: &mut Catalog<B>, id: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match catalog.delete(id)? {
        DeleteOutcome::Deleted(book) => {
            result.add_message(CmdMessage::success(format!("Book {} deleted.", book.id)));
            result.affected_books.push(book);
        }
        DeleteOutcome::NotFound => {
            result.add_message(CmdMessage::error(format!("Book {} not found.", id)));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn deletes_existing_book() {
        let mut catalog = Catalog::open(MemBackend::new()).unwrap();
        let added = add::run(&mut catalog, "T".into(), "A".into(), 2020).unwrap();
        let id = added.affected_books[0].id.clone();

        let result = run(&mut catalog, &id).unwrap();
        assert!(!result.has_errors());
        assert_eq!(result.affected_books[0].id, id);
        assert_eq!(result.messages[0].content, format!("Book {} deleted.", id));
        assert!(catalog.is_empty());
    }

    #[test]
    fn missing_book_is_an_error_message() {
        let mut catalog = Catalog::open(MemBackend::new()).unwrap();
        let result = run(&mut catalog, "nonexistent-id").unwrap();

        assert!(result.has_errors());
        assert!(result.affected_books.is_empty());
        assert_eq!(result.messages[0].content, "Book nonexistent-id not found.");
    }
}
