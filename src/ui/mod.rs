pub mod app;
pub mod board;
pub mod dialogs;

pub use app::{App, Command, CommandError, run};
