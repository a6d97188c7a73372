//! Data model for tabular data representation

mod key;
mod schema;
mod selector;
mod table;

pub use key::GroupKeyBuilder;
pub use schema::{CellType, Column};
pub use selector::ColumnSelector;
pub use table::{CellValue, Row, Table};
