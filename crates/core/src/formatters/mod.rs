pub mod frame;
pub mod text;

pub use frame::{DEFAULT_PADDING, create_frame};
pub use text::{DEFAULT_LINE_WIDTH, TextConfig, centered_margin, indent, wrap_lines};
