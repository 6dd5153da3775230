//! In-memory raster abstraction
//!
//! Element typing, stride-aware views, owned buffers and the rectangular
//! regions that partition them.

mod element;
mod region;
mod view;
mod buffer;

pub use element::{Element, ElementType};
pub use region::Region;
pub use view::RasterView;
pub use buffer::RasterBuffer;
