//! Chart aggregate: the persistent line chart, its overlay and crosshair
//! geometry, and the portfolio sparkline.

pub mod entities;
pub mod services;
pub mod sparkline;
pub mod value_objects;

pub use entities::*;
pub use services::{Crosshair, TooltipContent, TooltipOverlay, crosshair, overlay_position};
pub use value_objects::*;
