use serde::{Deserialize, Serialize};

/// Options understood by every [`NumberFormatter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    pub trim_0_decimals: bool,
    pub precision: usize,
    pub prefix: String,
    pub postfix: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            trim_0_decimals: false,
            precision: 1,
            prefix: String::new(),
            postfix: String::new(),
        }
    }
}

impl FormatOptions {
    pub fn trim_0_decimals(mut self, trim: bool) -> Self {
        self.trim_0_decimals = trim;
        self
    }
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
    pub fn postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = postfix.into();
        self
    }
}

pub type FormatResult = std::result::Result<String, Box<dyn std::error::Error + Send + Sync>>;

/// Renders a finite bin boundary, e.g. `1000.0` as `"1k"`.
pub trait NumberFormatter {
    fn format_number(&self, value: f64, options: &FormatOptions) -> FormatResult;
}

impl<F> NumberFormatter for F
where
    F: Fn(f64, &FormatOptions) -> FormatResult,
{
    fn format_number(&self, value: f64, options: &FormatOptions) -> FormatResult {
        self(value, options)
    }
}
