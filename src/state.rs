//! The catalog loaded at the wasm boundary.
//!
//! `thread_local!` + `RefCell` is enough for single-threaded wasm. Only
//! the exported entry points read it; everything below them receives the
//! catalog explicitly.

use crate::catalog::Catalog;
use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    static CATALOG: RefCell<Option<Rc<Catalog>>> = const { RefCell::new(None) };
}

/// The loaded catalog, if `load_catalog` has run.
pub fn current_catalog() -> Option<Rc<Catalog>> {
    CATALOG.with(|c| c.borrow().clone())
}

/// Replace the loaded catalog.
pub fn replace_catalog(catalog: Catalog) -> Rc<Catalog> {
    let catalog = Rc::new(catalog);
    CATALOG.with(|c| *c.borrow_mut() = Some(Rc::clone(&catalog)));
    catalog
}

pub fn clear_catalog() {
    CATALOG.with(|c| *c.borrow_mut() = None);
}
