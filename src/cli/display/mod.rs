//! Display module for formatted CLI output

pub mod colors;
pub mod icons;
pub mod table;

pub use colors::ColorTheme;
pub use icons::{ApplyStatus, StatusIcon};
pub use table::{ObjectRow, TableRenderer};
