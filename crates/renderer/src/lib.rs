//! Map rendering for forecast products.
//!
//! Implements the drawing layers the products need:
//! - Projected polygons, lines and hatching on a clipped map canvas
//! - Frontal iconography and wind barbs
//! - Station sky cover symbols
//! - Legends, annotations and text labels
//! - PNG encoding

pub mod barbs;
pub mod canvas;
pub mod color;
pub mod error;
pub mod fronts;
pub mod legend;
pub mod png;
pub mod sky;
pub mod text;

pub use canvas::{LineStyle, MapCanvas};
pub use color::Rgba;
pub use error::{RenderError, Result};
pub use legend::{LegendEntry, Swatch};
pub use text::FontBook;
