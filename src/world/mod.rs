//! World module - wall layout data model
//!
//! Everything here is pure data and arithmetic:
//! - Grid geometry (pillar/section pixel placement, hit testing)
//! - Panels (wall sections) and their state cycle
//! - Layout records exchanged with the layout API

mod geometry;
mod layout;
mod panel;

pub use geometry::*;
pub use layout::*;
pub use panel::*;
