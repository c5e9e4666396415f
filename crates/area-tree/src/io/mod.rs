//! Reading node lists and writing or reading partition output.
//!
//! - [`nodelist`]: node coordinate input
//! - [`arealist`]: area list output, and reading it back for prefix lookups
//! - [`plot`]: Gnuplot outlines and point dumps (2D/3D)
//! - [`dump`]: debug text listing

pub mod arealist;
pub mod dump;
pub mod nodelist;
pub mod plot;

pub use arealist::{write_area_list, Area, AreaList};
pub use dump::write_dump;
pub use nodelist::{parse_nodes, read_nodes};
pub use plot::{write_plot_areas, write_plot_points};
