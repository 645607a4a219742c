pub mod index;
pub mod source;

pub use index::CatalogIndex;
pub use source::{CatalogSource, FileCatalogSource, HttpCatalogSource};
