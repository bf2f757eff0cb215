pub mod command;
pub mod dashboard;
pub mod notify;
pub mod render;
pub mod shell;

pub use dashboard::{Dashboard, LoadState, Snapshot, VisibleRow};
pub use notify::{MemoryNotifier, TracingNotifier};
pub use shell::{App, OutputFormat, Step};
