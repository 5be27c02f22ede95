//! sch-clip - Export labeled schematic regions as cropped images
//!
//! This library provides the parsing and geometry core for clipping labeled
//! `text_box` regions out of a KiCad-style S-expression schematic: a generic
//! S-expression parser, region extraction with justification-aware anchor
//! resolution, string-aware elision of the region constructs from raw
//! source, and the viewport math that turns each region into one
//! rasterization request against a rendered SVG page. Invoking the external
//! renderer and rasterizer is the caller's job (the `sch-clip` binary does
//! exactly that); the library takes and returns in-memory values only.
//!
//! # Example
//!
//! ```rust
//! use sch_clip::analyze;
//!
//! let doc = analyze(r#"(kicad_sch (text_box "note" (at 10 10) (size 4 2)))"#).unwrap();
//! assert_eq!(doc.regions[0].label, "note");
//! assert_eq!((doc.regions[0].x, doc.regions[0].y), (8.0, 9.0));
//! assert!(!doc.cleaned.contains("text_box"));
//! ```

pub mod crop;
pub mod error;
pub mod parser;
pub mod schematic;

pub use crop::{plan_crops, resolve_scale, ConfigError, CropConfig, RasterRequest, SvgError, SvgImage};
pub use error::ParseError;
pub use parser::{parse, Node};
pub use schematic::{elide, extract_regions, Region, REGION_CONSTRUCT};

use thiserror::Error;

/// Errors that can occur in the clipping pipeline
#[derive(Debug, Error)]
pub enum ClipError {
    /// The schematic grammar is structurally unusable
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The rendered page could not be understood
    #[error("svg error: {0}")]
    Svg(#[from] SvgError),

    /// The export configuration could not be loaded
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// An external renderer or rasterizer invocation failed
    #[error("external tool failed: {0}")]
    Tool(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The in-memory result of analyzing a schematic source
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Labeled regions in document order, anchors resolved to top-left corners
    pub regions: Vec<Region>,
    /// The source with every region construct elided, ready for rendering
    pub cleaned: String,
}

/// Parse a schematic and pull out everything the crop pipeline needs.
///
/// Zero regions is a valid outcome ("nothing to do"), not an error; only a
/// structurally broken document fails.
pub fn analyze(source: &str) -> Result<Analysis, ClipError> {
    let root = parse(source)?;
    let regions = extract_regions(&root);
    let cleaned = elide(source, REGION_CONSTRUCT);
    Ok(Analysis { regions, cleaned })
}
