pub mod binning;
pub mod export;
pub mod label;
pub mod source;

pub use binlens_common::{BinlensError, Result};
pub use binning::{
    ascending, bin_series, make_bin_edges, BinnedSeries, CountRow, CountTable, Interval, RangeSpec,
    MAX_EDGES,
};
pub use export::{export_csv, export_json, render_table, to_json, write_csv};
pub use label::{
    apply_labelling, format_to_base_10, label_interval, FormatOptions, FormatResult,
    NumberFormatter,
};
pub use source::{load_values, read_parquet_column, read_text_values, resolve_paths};
