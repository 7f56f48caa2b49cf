pub mod glob_pattern;
pub mod sheet_selector;

pub use glob_pattern::GlobPattern;
pub use sheet_selector::{select_sheets, PatternSet};
