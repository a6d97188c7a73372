//! datareshape - Reshape tabular data
//!
//! A library for converting in-memory tables between wide and long
//! representations (pivot_longer, pivot_wider), splitting and merging
//! composite columns (separate, unite), and normalizing column names
//! (clean_names). Every operation is a pure function producing a new
//! table.

pub mod config;
pub mod error;
pub mod model;
pub mod reader;
pub mod reshape;
pub mod writer;

pub use config::{ArityPolicy, Config, DuplicatePolicy, OutputFormat};
pub use error::ReshapeError;
pub use model::{CellValue, ColumnSelector, Table};
pub use reshape::{
    clean_names, drop_missing, pivot_longer, pivot_wider, separate, unite, SplitPolicy,
};
