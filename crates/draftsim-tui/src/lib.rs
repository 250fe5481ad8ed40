// Library root for the draft simulator front end.
//
// Re-exports all modules so integration tests can access them.

pub mod app;
pub mod loader;
pub mod protocol;
pub mod tui;
