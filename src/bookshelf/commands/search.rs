use crate::commands::{CmdMessage, CmdResult};
use crate::store::backend::StorageBackend;
use crate::store::catalog::{Catalog, SearchFilter};

pub fn run<B: StorageBackend>(catalog: &Catalog<B>, filter: &SearchFilter) -> CmdResult {
    let matches = catalog.search(filter);
    let mut result = CmdResult::default();
    if matches.is_empty() {
        result.add_message(CmdMessage::info("No books matched."));
    }
    result.with_listed_books(matches)
}
