// TUI widget modules for each screen zone.

pub mod header;
pub mod help_bar;
pub mod history;
pub mod matches;
pub mod quit_confirm;
pub mod status_bar;
pub mod summary;
