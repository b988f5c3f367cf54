// File I/O operations

pub mod catalog;
pub mod table;
pub mod xlsx;

pub use table::{load_source, load_table};

/// Raw cell text of one worksheet, before the header row is applied.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    /// 0-based physical row of `rows[0]`.
    pub first_row: u32,
    pub rows: Vec<Vec<String>>,
}
