use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open interval `[left, right)`.
///
/// Either bound may be infinite. Right-closed intervals cannot be expressed
/// by this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub left: f64,
    pub right: f64,
}

impl Interval {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    pub fn contains(&self, v: f64) -> bool {
        self.left <= v && v < self.right
    }

    pub fn is_left_open_ended(&self) -> bool {
        self.left == f64::NEG_INFINITY
    }

    pub fn is_right_open_ended(&self) -> bool {
        self.right == f64::INFINITY
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_closed_right_open() {
        let iv = Interval::new(0.0, 1.0);
        assert!(iv.contains(0.0));
        assert!(iv.contains(0.999));
        assert!(!iv.contains(1.0));
        assert!(!iv.contains(f64::NAN));
    }

    #[test]
    fn open_ended_flags() {
        let low = Interval::new(f64::NEG_INFINITY, 0.0);
        let high = Interval::new(5.0, f64::INFINITY);
        assert!(low.is_left_open_ended() && !low.is_right_open_ended());
        assert!(high.is_right_open_ended() && !high.is_left_open_ended());
        assert!(low.contains(-1e300));
        assert!(!high.contains(f64::INFINITY));
    }

    #[test]
    fn display_raw_form() {
        assert_eq!(Interval::new(-1.5, 2.0).to_string(), "[-1.5, 2)");
        assert_eq!(Interval::new(f64::NEG_INFINITY, 0.0).to_string(), "[-inf, 0)");
    }
}
