//! Geometry reconciliation and crop planning against a rendered SVG page

mod config;
mod export;
mod svg;

pub use config::{ConfigError, CropConfig};
pub use export::{plan_crops, RasterRequest};
pub use svg::{parse_viewbox, physical_unit, resolve_scale, SvgError, SvgImage};
