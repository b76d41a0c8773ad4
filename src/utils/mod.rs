//! Utility functions

mod pls;
mod sanitize;

pub use pls::generate_pls;
pub use sanitize::sanitize_file_stem;
