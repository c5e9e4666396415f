//! Gnuplot-compatible dumps of area outlines and input points (2D and 3D).

use std::io::Write;

use crate::{AreaError, BoundingBox, Partition, Result};

const L: bool = false;
const H: bool = true;

/// Corner walk tracing every edge of a box, `H` picking the upper bound.
///
/// The lower x/y, x/z and y/z faces are drawn first, then the upper ones, with
/// a connecting vertex between faces so the walk is one polyline.
const CUBE_WALK: [[bool; 3]; 32] = [
    // x/y low
    [L, L, L],
    [L, H, L],
    [H, H, L],
    [H, L, L],
    [L, L, L],
    // x/z low
    [L, L, L],
    [L, L, H],
    [H, L, H],
    [H, L, L],
    [L, L, L],
    // y/z low
    [L, L, L],
    [L, L, H],
    [L, H, H],
    [L, H, L],
    [L, L, L],
    // x/y high
    [L, L, H],
    [L, H, H],
    [H, H, H],
    [H, L, H],
    [L, L, H],
    [L, H, H],
    // x/z high
    [L, H, L],
    [L, H, H],
    [H, H, H],
    [H, H, L],
    [L, H, L],
    [H, H, L],
    // y/z high
    [H, L, L],
    [H, L, H],
    [H, H, H],
    [H, H, L],
    [H, L, L],
];

const SQUARE_WALK: [[bool; 2]; 5] = [[L, L], [L, H], [H, H], [H, L], [L, L]];

fn ensure_plottable(dimensions: usize) -> Result<()> {
    match dimensions {
        2 | 3 => Ok(()),
        d => Err(AreaError::UnsupportedPlotDimensions(d)),
    }
}

fn corner(bounds: &BoundingBox, dim: usize, upper: bool) -> f64 {
    if upper {
        bounds.high()[dim]
    } else {
        bounds.low()[dim]
    }
}

/// Writes the outline of every leaf box.
///
/// 2D boxes are closed 5-vertex loops followed by a blank line; 3D boxes are
/// a single edge walk followed by two blank lines.
pub fn write_plot_areas<W: Write>(partition: &Partition, out: &mut W) -> Result<()> {
    ensure_plottable(partition.dimensions())?;

    for leaf in partition.leaves() {
        let b = leaf.bounds();
        if partition.dimensions() == 2 {
            for [x, y] in SQUARE_WALK {
                writeln!(out, "{} {}", corner(b, 0, x), corner(b, 1, y))?;
            }
            writeln!(out)?;
        } else {
            for [x, y, z] in CUBE_WALK {
                writeln!(
                    out,
                    "{} {} {}",
                    corner(b, 0, x),
                    corner(b, 1, y),
                    corner(b, 2, z)
                )?;
            }
            write!(out, "\n\n")?;
        }
    }
    Ok(())
}

/// Writes the input points, one per line, coordinates separated by spaces.
pub fn write_plot_points<W: Write>(partition: &Partition, out: &mut W) -> Result<()> {
    ensure_plottable(partition.dimensions())?;

    for point in partition.input() {
        let line: Vec<String> = point.iter().map(f64::to_string).collect();
        writeln!(out, "{}", line.join(" "))?;
    }
    Ok(())
}
