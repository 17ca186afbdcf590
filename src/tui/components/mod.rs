//! TUI components using tui-realm.

pub mod details;
pub mod help;
pub(crate) mod line_edit;
pub mod params;
pub mod path_prompt;
pub mod preview;

pub use details::Details;
pub use help::{
    MAIN_FOOTER_ACTIONS, SOURCE_FOOTER_ACTIONS, format_footer, popup_area, render_help,
};
pub use path_prompt::{PathPrompt, PathPromptKind};
pub use preview::Preview;
