// TUI widget modules for each panel.

pub mod catalogue;
pub mod draft_log;
pub mod quit_confirm;
pub mod side_panel;
pub mod status_bar;
