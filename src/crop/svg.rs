//! Minimal representation of a rendered SVG page
//!
//! Cropping only ever touches the root `<svg>` element's attributes, so the
//! document is split into a prolog, an ordered attribute list for the root
//! start tag, and an opaque remainder that is carried through verbatim.
//! Re-serialization reassembles the three parts; everything outside the
//! start tag round-trips byte-for-byte.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvgError {
    #[error("no <svg> root element found")]
    MissingRoot,
    #[error("malformed <svg> start tag near byte {0}")]
    MalformedRoot(usize),
}

/// A rendered vector page, cheap to clone per region before mutation
#[derive(Debug, Clone)]
pub struct SvgImage {
    prolog: String,
    attrs: Vec<(String, String)>,
    self_closing: bool,
    rest: String,
}

impl SvgImage {
    /// Split an SVG document around its root start tag.
    pub fn parse(text: &str) -> Result<Self, SvgError> {
        let start = find_root(text).ok_or(SvgError::MissingRoot)?;
        let prolog = text[..start].to_string();
        let mut pos = start + "<svg".len();
        let bytes = text.as_bytes();
        let mut attrs = Vec::new();

        loop {
            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            match bytes.get(pos) {
                Some(b'>') => {
                    return Ok(SvgImage {
                        prolog,
                        attrs,
                        self_closing: false,
                        rest: text[pos + 1..].to_string(),
                    });
                }
                Some(b'/') if bytes.get(pos + 1) == Some(&b'>') => {
                    return Ok(SvgImage {
                        prolog,
                        attrs,
                        self_closing: true,
                        rest: text[pos + 2..].to_string(),
                    });
                }
                Some(_) => {
                    let (attr, next) = parse_attr(text, pos)?;
                    attrs.push(attr);
                    pos = next;
                }
                None => return Err(SvgError::MalformedRoot(pos)),
            }
        }
    }

    /// Value of a root attribute, if present
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Overwrite a root attribute in place, appending it if absent
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    /// Viewport units per declared physical unit for this image
    pub fn scale(&self) -> f64 {
        match self.attr("viewBox").and_then(parse_viewbox) {
            Some(viewbox) => resolve_scale(self.attr("width"), viewbox),
            None => 1.0,
        }
    }
}

impl std::fmt::Display for SvgImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.prolog)?;
        f.write_str("<svg")?;
        for (name, value) in &self.attrs {
            write!(f, " {}=\"{}\"", name, value)?;
        }
        f.write_str(if self.self_closing { "/>" } else { ">" })?;
        f.write_str(&self.rest)
    }
}

/// Byte offset of the root `<svg` start tag, skipping the XML declaration,
/// comments, and doctype that typically precede it.
fn find_root(text: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(rel) = text[from..].find("<svg") {
        let at = from + rel;
        match text.as_bytes().get(at + 4) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(at),
            None => return None,
            _ => from = at + 4,
        }
    }
    None
}

/// Parse one `name="value"` pair starting at `pos`, returning it and the
/// offset just past the closing quote.
fn parse_attr(text: &str, pos: usize) -> Result<((String, String), usize), SvgError> {
    let bytes = text.as_bytes();
    let name_end = text[pos..]
        .find(|c: char| c == '=' || c.is_ascii_whitespace())
        .map(|rel| pos + rel)
        .ok_or(SvgError::MalformedRoot(pos))?;
    let name = text[pos..name_end].to_string();
    if name.is_empty() || bytes.get(name_end) != Some(&b'=') {
        return Err(SvgError::MalformedRoot(pos));
    }

    let quote = *bytes.get(name_end + 1).ok_or(SvgError::MalformedRoot(pos))?;
    if quote != b'"' && quote != b'\'' {
        return Err(SvgError::MalformedRoot(pos));
    }
    let value_start = name_end + 2;
    let value_end = text[value_start..]
        .find(quote as char)
        .map(|rel| value_start + rel)
        .ok_or(SvgError::MalformedRoot(pos))?;
    let value = text[value_start..value_end].to_string();
    Ok(((name, value), value_end + 1))
}

/// Parse a `viewBox` attribute into `[min_x, min_y, width, height]`
pub fn parse_viewbox(value: &str) -> Option<[f64; 4]> {
    let mut parts = value.split_whitespace().map(str::parse::<f64>);
    let viewbox = [
        parts.next()?.ok()?,
        parts.next()?.ok()?,
        parts.next()?.ok()?,
        parts.next()?.ok()?,
    ];
    parts.next().is_none().then_some(viewbox)
}

/// Viewport units per physical unit, from a declared physical width and a
/// viewport tuple.
///
/// Only the millimeter suffix the schematic renderer emits is recognized.
/// A missing, unitless, or unparsable width degrades to `1.0` rather than
/// failing: crops are then sized as if document units equal viewport units.
pub fn resolve_scale(width_attr: Option<&str>, viewbox: [f64; 4]) -> f64 {
    let Some(width) = width_attr else {
        return 1.0;
    };
    let Some(mm) = width
        .strip_suffix("mm")
        .and_then(|v| v.trim().parse::<f64>().ok())
    else {
        return 1.0;
    };
    if mm <= 0.0 {
        return 1.0;
    }
    viewbox[2] / mm
}

/// The trailing unit suffix of a physical-size attribute, e.g. `"mm"` from
/// `"297.002mm"`. `None` when the value is bare or not a number-plus-unit.
pub fn physical_unit(value: &str) -> Option<&str> {
    let split = value.trim().trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let unit = &value.trim()[split.len()..];
    (!unit.is_empty() && split.parse::<f64>().is_ok()).then_some(unit)
}
