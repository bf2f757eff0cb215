pub mod loader;
pub mod session;
pub mod view;
pub mod window;

pub use crate::domain::model::{CellValue, Column, DomainRecord, SortDirection, SortState};
pub use crate::domain::ports::{CsvSource, Notifier};
pub use crate::utils::error::Result;
