//! Plain-text leaf listing for debugging.

use std::io::Write;

use crate::{Partition, Result};

/// Writes one line per leaf: id, bounds, prefix and retained point count.
///
/// ```text
/// id: 3, bottom[0]: -10, bottom[1]: -10, top[0]: 0, top[1]: 0, prefix: 00, nodes left: 0
/// ```
pub fn write_dump<W: Write>(partition: &Partition, out: &mut W) -> Result<()> {
    for leaf in partition.leaves() {
        write!(out, "id: {}, ", leaf.id())?;
        for (dim, value) in leaf.bounds().low().iter().enumerate() {
            write!(out, "bottom[{dim}]: {value}, ")?;
        }
        for (dim, value) in leaf.bounds().high().iter().enumerate() {
            write!(out, "top[{dim}]: {value}, ")?;
        }
        writeln!(
            out,
            "prefix: {}, nodes left: {}",
            leaf.prefix(),
            leaf.point_count()
        )?;
    }
    Ok(())
}
