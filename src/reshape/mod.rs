//! Reshaping engine: pure transforms from one table to another
//!
//! Each operation borrows the input table and returns a new one, so a
//! pipeline of reshapes composes without any shared mutable state.

mod clean_names;
pub(crate) mod longer;
pub(crate) mod separate;
mod unite;
mod wider;

pub use clean_names::clean_names;
pub use longer::{drop_missing, pivot_longer};
pub use separate::{separate, SplitPolicy};
pub use unite::unite;
pub use wider::pivot_wider;
