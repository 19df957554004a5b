pub mod command;
pub mod format;
pub mod view;

pub use command::{ApplyResult, Command, Response};
pub use format::{OutputFormat, Selector};
pub use view::{ModeInfo, OutputView};
