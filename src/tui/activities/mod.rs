//! Activity modules for the TUI.

pub mod editor;
pub mod source;

pub use editor::EditorActivity;
pub use editor::Msg;
pub use source::SourceActivity;
