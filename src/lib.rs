pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::{App, Dashboard, MemoryNotifier, OutputFormat, TracingNotifier};
pub use crate::config::source::{AssetSource, FileSource, HttpSource, SourceLocation};
pub use crate::config::Settings;
pub use crate::core::loader::{parse_csv, CsvLoader};
pub use crate::core::session::{Route, Session};
pub use crate::domain::model::{Column, DomainRecord, SortDirection, SortState};
pub use crate::utils::error::{DashError, Result};
