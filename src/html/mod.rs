//! HTML assembly: the action translator's rendering target.

pub mod builder;
pub mod escape;

pub use builder::HtmlBuilder;
pub use escape::{append_escaped_text, normalize_class_name};
