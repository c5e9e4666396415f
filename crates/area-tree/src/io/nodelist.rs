//! Loading node coordinates from a node list document.
//!
//! ```xml
//! <nodelist dimensions="2">
//!     <node><coord>12.5</coord><coord>-3</coord></node>
//! </nodelist>
//! ```
//!
//! Every `node` that is a direct child of a `nodelist` element contributes one
//! point; its `coord` children are read in order. Other attributes and child
//! elements are ignored.

use std::path::Path;

use nalgebra::DVector;
use roxmltree::{Document, Node};
use tracing::{debug, info};

use crate::{AreaError, PointSet, Result};

const PROGRESS_INTERVAL: usize = 10_000;

/// Parses a node list document into a [`PointSet`].
///
/// The dimensionality is taken from the root element's `dimensions`
/// attribute. A node with a different number of coordinates is rejected.
pub fn parse_nodes(xml: &str) -> Result<PointSet> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    let dimensions = parse_dimensions(root)?;

    let nodes: Vec<Node> = doc
        .descendants()
        .filter(|n| n.has_tag_name("node"))
        .filter(|n| n.parent_element().is_some_and(|p| p.has_tag_name("nodelist")))
        .collect();

    let mut points = PointSet::new(dimensions)?;
    for (index, node) in nodes.iter().enumerate() {
        let coords = node
            .children()
            .filter(|c| c.has_tag_name("coord"))
            .map(|c| parse_number(c, || format!("coordinate of node {index}")))
            .collect::<Result<Vec<f64>>>()?;

        if coords.len() != dimensions {
            return Err(AreaError::DimensionMismatch {
                index,
                expected: dimensions,
                found: coords.len(),
            });
        }
        points.push(DVector::from_vec(coords))?;

        if (index + 1) % PROGRESS_INTERVAL == 0 {
            debug!(done = index + 1, total = nodes.len(), "nodes processed");
        }
    }

    info!(nodes = points.len(), dimensions, "node list loaded");
    Ok(points)
}

/// Reads and parses a node list file.
pub fn read_nodes<P: AsRef<Path>>(path: P) -> Result<PointSet> {
    let xml = std::fs::read_to_string(path)?;
    parse_nodes(&xml)
}

/// Reads the positive `dimensions` attribute of a root element.
pub(crate) fn parse_dimensions(root: Node) -> Result<usize> {
    let text = root
        .attribute("dimensions")
        .ok_or_else(|| AreaError::MissingDimensions {
            element: root.tag_name().name().to_owned(),
        })?;
    let dimensions: usize = text
        .trim()
        .parse()
        .map_err(|_| AreaError::InvalidNumber {
            context: "dimensions attribute".to_owned(),
            text: text.to_owned(),
        })?;
    if dimensions == 0 {
        return Err(AreaError::ZeroDimensions);
    }
    Ok(dimensions)
}

/// Parses the text content of an element as a finite number.
pub(crate) fn parse_number<F>(element: Node, context: F) -> Result<f64>
where
    F: FnOnce() -> String,
{
    let text = element.text().unwrap_or("").trim();
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AreaError::InvalidNumber {
            context: context(),
            text: text.to_owned(),
        }),
    }
}
