use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Status;
use crate::store::backend::StorageBackend;
use crate::store::catalog::{Catalog, StatusOutcome};

pub fn run<B: StorageBackend>(
    catalog: &mut Catalog<B>,
    id: &str,
    new_status: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match catalog.change_status(id, new_status)? {
        StatusOutcome::Changed(book) => {
            result.add_message(CmdMessage::success(format!(
                "Status of book {} changed to '{}'.",
                book.id,
                book.status.label()
            )));
            result.affected_books.push(book);
        }
        StatusOutcome::InvalidStatus(raw) => {
            let allowed: Vec<_> = Status::ALL.iter().map(Status::as_str).collect();
            result.add_message(CmdMessage::error(format!(
                "Invalid status '{}'. Allowed values: {}.",
                raw,
                allowed.join(", ")
            )));
        }
        StatusOutcome::NotFound => {
            result.add_message(CmdMessage::error(format!("Book {} not found.", id)));
        }
    }

    Ok(result)
}
