//! Area list documents: one `<area>` per partition leaf.
//!
//! ```xml
//! <!DOCTYPE arealist SYSTEM "areas.dtd">
//! <arealist dimensions="2">
//!     <area>
//!         <min dimension="0">-1000</min>
//!         <min dimension="1">-1000</min>
//!         <max dimension="0">0</max>
//!         <max dimension="1">0</max>
//!         <prefix>00</prefix>
//!     </area>
//! </arealist>
//! ```
//!
//! Areas are written in leaf traversal order. Bounds are closed, so a point on
//! a shared face matches several areas; lookups return the first one in
//! document order.

use std::io::Write;
use std::path::Path;

use nalgebra::DVector;
use roxmltree::{Document, Node, ParsingOptions};
use tracing::info;

use crate::io::nodelist::{parse_dimensions, parse_number};
use crate::{AreaError, BoundingBox, Partition, Result};

/// A final region of a partition and the prefix assigned to it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    bounds: BoundingBox,
    prefix: String,
}

impl Area {
    pub fn new(bounds: BoundingBox, prefix: String) -> Self {
        Self { bounds, prefix }
    }

    #[inline]
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// An ordered list of areas sharing one dimensionality.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaList {
    dimensions: usize,
    areas: Vec<Area>,
}

impl AreaList {
    pub fn new(dimensions: usize, areas: Vec<Area>) -> Self {
        Self { dimensions, areas }
    }

    #[inline]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    #[inline]
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Returns the prefix of the first area containing `point`.
    ///
    /// Returns `None` if the point's dimensionality differs from the list's,
    /// or if no area contains it.
    pub fn prefix_for(&self, point: &[f64]) -> Option<&str> {
        if point.len() != self.dimensions {
            return None;
        }
        self.areas
            .iter()
            .find(|area| area.bounds.contains(point))
            .map(Area::prefix)
    }

    /// Writes the list as an area list document.
    pub fn write_xml<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "<!DOCTYPE arealist SYSTEM \"areas.dtd\">")?;
        writeln!(out, "<arealist dimensions=\"{}\">", self.dimensions)?;
        for area in &self.areas {
            writeln!(out, "\t<area>")?;
            for (dim, value) in area.bounds.low().iter().enumerate() {
                writeln!(out, "\t\t<min dimension=\"{dim}\">{value}</min>")?;
            }
            for (dim, value) in area.bounds.high().iter().enumerate() {
                writeln!(out, "\t\t<max dimension=\"{dim}\">{value}</max>")?;
            }
            writeln!(out, "\t\t<prefix>{}</prefix>", area.prefix)?;
            writeln!(out, "\t</area>")?;
        }
        writeln!(out, "</arealist>")?;
        Ok(())
    }

    /// Renders the list as an area list document.
    pub fn to_xml(&self) -> String {
        let mut buf = Vec::new();
        self.write_xml(&mut buf)
            .expect("writing to a Vec cannot fail");
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Parses an area list document.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let doc = Document::parse_with_options(xml, options)?;
        let root = doc.root_element();
        let dimensions = parse_dimensions(root)?;

        let areas = root
            .children()
            .filter(|n| n.has_tag_name("area"))
            .enumerate()
            .map(|(index, area)| parse_area(area, index, dimensions))
            .collect::<Result<Vec<Area>>>()?;

        info!(areas = areas.len(), dimensions, "area list loaded");
        Ok(Self { dimensions, areas })
    }

    /// Reads and parses an area list file.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let xml = std::fs::read_to_string(path)?;
        Self::from_xml(&xml)
    }
}

/// Writes the leaves of a partition as an area list document.
pub fn write_area_list<W: Write>(partition: &Partition, out: &mut W) -> Result<()> {
    partition.areas().write_xml(out)
}

fn parse_area(area: Node, index: usize, dimensions: usize) -> Result<Area> {
    let malformed = |reason: String| AreaError::MalformedArea { index, reason };

    let mut low: Vec<Option<f64>> = vec![None; dimensions];
    let mut high: Vec<Option<f64>> = vec![None; dimensions];
    let mut prefix = None;

    for child in area.children().filter(Node::is_element) {
        let tag = child.tag_name().name();
        let bound = match tag {
            "min" => &mut low,
            "max" => &mut high,
            "prefix" => {
                prefix = Some(child.text().unwrap_or("").trim().to_owned());
                continue;
            }
            _ => continue,
        };

        let dim_text = child
            .attribute("dimension")
            .ok_or_else(|| malformed(format!("<{tag}> without dimension attribute")))?;
        let dim: usize = dim_text
            .trim()
            .parse()
            .map_err(|_| malformed(format!("invalid dimension '{dim_text}'")))?;
        if dim >= dimensions {
            return Err(malformed(format!(
                "dimension {dim} out of range for {dimensions} dimensions"
            )));
        }
        bound[dim] = Some(parse_number(child, || format!("<{tag}> of area {index}"))?);
    }

    let collect = |values: Vec<Option<f64>>, tag: &str| {
        values
            .into_iter()
            .enumerate()
            .map(|(dim, v)| v.ok_or_else(|| malformed(format!("missing <{tag}> for dimension {dim}"))))
            .collect::<Result<Vec<f64>>>()
    };
    let low = collect(low, "min")?;
    let high = collect(high, "max")?;
    let prefix = prefix.ok_or_else(|| malformed("missing <prefix>".to_owned()))?;

    Ok(Area::new(
        BoundingBox::new(DVector::from_vec(low), DVector::from_vec(high)),
        prefix,
    ))
}
