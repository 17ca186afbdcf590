//! Parameter editing components.

mod boolean;
mod color;
mod image;
mod number;
mod picker;
mod prompt;
mod select;
mod text;

pub use boolean::BoolControl;
pub use color::{ColorControl, ColorField};
pub use image::ImageControl;
pub use number::{NumberControl, NumberField};
pub use picker::ColorPicker;
pub use prompt::PromptControl;
pub use select::{SelectControl, SelectField};
pub use text::TextControl;
