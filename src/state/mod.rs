//! Page state: domains, areas and the render-time registry

mod area;
mod domain;
mod registry;

pub use area::*;
pub use domain::*;
pub use registry::*;
