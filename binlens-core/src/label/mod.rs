pub mod labeller;
pub mod magnitude;
pub mod options;

pub use labeller::{apply_labelling, label_interval};
pub use magnitude::format_to_base_10;
pub use options::{FormatOptions, FormatResult, NumberFormatter};
