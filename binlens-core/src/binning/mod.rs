pub mod binner;
pub mod count;
pub mod edges;
pub mod interval;

pub use binner::{bin_series, BinnedSeries};
pub use count::{CountRow, CountTable};
pub use edges::{ascending, make_bin_edges, RangeSpec, MAX_EDGES};
pub use interval::Interval;
