use crate::commands::{CmdMessage, CmdResult};
use crate::store::backend::StorageBackend;
use crate::store::catalog::Catalog;

pub fn run<B: StorageBackend>(catalog: &Catalog<B>) -> CmdResult {
    let mut result = CmdResult::default();
    if catalog.is_empty() {
        result.add_message(CmdMessage::info("Catalog is empty."));
    }
    result.with_listed_books(catalog.list_all().to_vec())
}
