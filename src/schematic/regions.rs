//! Extraction of labeled text-box regions from a parsed schematic
//!
//! Only the subset of the schematic format needed to locate `text_box`
//! constructs is modeled. A region's anchor point is justification-relative:
//! `left`/`top` flags mean the anchor already names the corresponding edge,
//! while a missing flag means the anchor names the rectangle's center on
//! that axis. Resolution converts every anchor to an absolute top-left
//! corner so downstream geometry never has to re-consult justification.

use crate::parser::Node;

/// The atom identifying a schematic document root
pub const DOCUMENT_KIND: &str = "kicad_sch";

/// The construct naming a labeled region
pub const REGION_CONSTRUCT: &str = "text_box";

/// A labeled rectangle in document coordinates. `x`/`y` are the resolved
/// top-left corner, never the raw anchor. `width` and `height` are positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Collect every text-box region among the root's immediate children, in
/// document order.
///
/// Returns an empty vector when the root is not a schematic document or
/// contains no text boxes; neither case is an error. Individual entries
/// missing an `at` or `size` sub-list (or a label string) are skipped so a
/// single malformed entry never aborts the rest. Duplicate labels are legal
/// and produce duplicate regions; the caller owns the resulting
/// same-named-output hazard.
pub fn extract_regions(root: &Node) -> Vec<Region> {
    let Some(items) = root.as_list() else {
        return Vec::new();
    };
    if items.first().and_then(Node::as_atom) != Some(DOCUMENT_KIND) {
        return Vec::new();
    }

    items
        .iter()
        .skip(1)
        .filter(|item| item.head() == Some(REGION_CONSTRUCT))
        .filter_map(region_from)
        .collect()
}

fn region_from(node: &Node) -> Option<Region> {
    let items = node.as_list()?;

    // First string-typed child after the construct name is the label
    let label = items.iter().skip(1).find_map(Node::as_str)?.to_string();

    let at = node.child("at")?;
    let anchor_x = at.get(1)?.as_number()?;
    let anchor_y = at.get(2)?.as_number()?;

    let size = node.child("size")?;
    let width = size.get(1)?.as_number()?;
    let height = size.get(2)?.as_number()?;
    if width <= 0.0 || height <= 0.0 {
        return None;
    }

    let justify = node
        .child("effects")
        .and_then(|effects| child_of(effects, "justify"));
    let has_flag =
        |flag: &str| justify.is_some_and(|j| j.iter().any(|n| n.as_atom() == Some(flag)));

    // Centered anchors name the rectangle's midpoint on that axis
    let x = if has_flag("left") {
        anchor_x
    } else {
        anchor_x - width / 2.0
    };
    let y = if has_flag("top") {
        anchor_y
    } else {
        anchor_y - height / 2.0
    };

    Some(Region {
        label,
        x,
        y,
        width,
        height,
    })
}

/// Find the first list named `name` among `items`, returning its children
fn child_of<'a>(items: &'a [Node], name: &str) -> Option<&'a [Node]> {
    items
        .iter()
        .find(|item| item.head() == Some(name))
        .and_then(Node::as_list)
}
