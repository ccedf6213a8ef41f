pub mod panel;
pub mod shortcuts;

pub use panel::ui_panel;
pub use shortcuts::handle_shortcuts;
