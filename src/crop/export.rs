//! Per-region crop planning
//!
//! Each extracted region becomes one rasterization request: a clone of the
//! rendered page whose viewport is narrowed to exactly that region's
//! rectangle in viewport units, with the physical size rewritten to the
//! region's document-unit size. The shared source image is never mutated.

use crate::crop::config::CropConfig;
use crate::crop::svg::{physical_unit, SvgImage};
use crate::schematic::Region;

/// One pending rasterizer invocation
#[derive(Debug, Clone)]
pub struct RasterRequest {
    /// Output file stem, taken from the region's label
    pub label: String,
    /// Serialized SVG whose viewport covers exactly the region
    pub svg: String,
    /// Supersampling factor for the rasterizer
    pub zoom: f64,
}

/// Plan one rasterization request per region.
///
/// `scale` converts document units to viewport units (see
/// [`crate::crop::resolve_scale`]). Requests come back in region order and
/// share no state; duplicate labels yield duplicate request stems.
pub fn plan_crops(
    image: &SvgImage,
    regions: &[Region],
    scale: f64,
    config: &CropConfig,
) -> Vec<RasterRequest> {
    // The renderer declares its page size in mm; keep whatever unit it
    // actually used when rewriting the physical size.
    let unit = image.attr("width").and_then(physical_unit).unwrap_or("mm");

    regions
        .iter()
        .map(|region| {
            let mut page = image.clone();
            page.set_attr(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    region.x * scale,
                    region.y * scale,
                    region.width * scale,
                    region.height * scale
                ),
            );
            page.set_attr("width", format!("{}{}", region.width, unit));
            page.set_attr("height", format!("{}{}", region.height, unit));

            RasterRequest {
                label: region.label.clone(),
                svg: page.to_string(),
                zoom: config.supersample,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str =
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100mm\" height=\"75mm\" viewBox=\"0 0 4000 3000\"><g/></svg>";

    fn region(label: &str, x: f64, y: f64, width: f64, height: f64) -> Region {
        Region {
            label: label.to_string(),
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn test_viewport_is_scaled_region_rectangle() {
        let image = SvgImage::parse(PAGE).unwrap();
        let requests = plan_crops(
            &image,
            &[region("note", 8.0, 9.0, 4.0, 2.0)],
            40.0,
            &CropConfig::default(),
        );
        assert_eq!(requests.len(), 1);
        insta::assert_snapshot!(
            requests[0].svg,
            @r#"<svg xmlns="http://www.w3.org/2000/svg" width="4mm" height="2mm" viewBox="320 360 160 80"><g/></svg>"#
        );
    }

    #[test]
    fn test_requests_carry_label_and_zoom() {
        let image = SvgImage::parse(PAGE).unwrap();
        let config = CropConfig::default().with_supersample(2.0);
        let requests = plan_crops(&image, &[region("a", 0.0, 0.0, 1.0, 1.0)], 1.0, &config);
        assert_eq!(requests[0].label, "a");
        assert_eq!(requests[0].zoom, 2.0);
    }

    #[test]
    fn test_source_image_is_untouched() {
        let image = SvgImage::parse(PAGE).unwrap();
        plan_crops(&image, &[region("a", 1.0, 1.0, 2.0, 2.0)], 40.0, &CropConfig::default());
        assert_eq!(image.to_string(), PAGE);
    }

    #[test]
    fn test_each_region_gets_its_own_clone() {
        let image = SvgImage::parse(PAGE).unwrap();
        let requests = plan_crops(
            &image,
            &[
                region("first", 0.0, 0.0, 10.0, 10.0),
                region("second", 50.0, 50.0, 10.0, 10.0),
            ],
            40.0,
            &CropConfig::default(),
        );
        assert_eq!(requests.len(), 2);
        assert!(requests[0].svg.contains("viewBox=\"0 0 400 400\""));
        assert!(requests[1].svg.contains("viewBox=\"2000 2000 400 400\""));
    }

    #[test]
    fn test_unitless_source_width_falls_back_to_mm() {
        let image = SvgImage::parse("<svg width=\"4000\" viewBox=\"0 0 4000 3000\"/>").unwrap();
        let requests = plan_crops(
            &image,
            &[region("a", 0.0, 0.0, 5.0, 5.0)],
            1.0,
            &CropConfig::default(),
        );
        assert!(requests[0].svg.contains("width=\"5mm\""));
        assert!(requests[0].svg.contains("height=\"5mm\""));
    }
}
