// Library root: the session event loop, its message protocol and the form
// transport. Re-exported for the TUI binary and integration tests.

pub mod app;
pub mod protocol;
pub mod transport;
