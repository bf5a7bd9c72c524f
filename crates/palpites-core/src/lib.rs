// Library root: prediction markets, the selection store, payload encoding,
// fixture data and configuration shared by the app loop and the TUI.

pub mod config;
pub mod fixture;
pub mod history;
pub mod market;
pub mod selection;
pub mod submission;
