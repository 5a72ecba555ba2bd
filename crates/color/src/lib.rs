//! QssKit Color
//!
//! Color literal decoding, notation-preserving formatting and contrast.

pub mod color;
pub mod contrast;
pub mod named;

pub use color::{format, parse_color, try_parse_color, Color, ColorError, Notation};
pub use contrast::{contrast_ratio, contrast_text_color, relative_luminance, TextColor};
pub use named::{color_names, is_named_color, named_color};
