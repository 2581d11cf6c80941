//! CSV input and output for the static tables and computed results.

pub mod export;
pub mod load;
