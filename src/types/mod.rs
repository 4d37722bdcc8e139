pub mod colour;
pub mod format;
pub mod geometry;
pub mod token;

pub use colour::*;
pub use format::*;
pub use geometry::*;
pub use token::*;
