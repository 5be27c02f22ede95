//! Schematic-level semantics: labeled regions and construct elision

mod elide;
mod regions;

pub use elide::elide;
pub use regions::{extract_regions, Region, DOCUMENT_KIND, REGION_CONSTRUCT};
