use alloc::string::{String, ToString};
use core::fmt;

const KI: u64 = 1 << 10;
const MI: u64 = 1 << 20;
const GI: u64 = 1 << 30;

/// A count rendered with the largest binary prefix that divides it exactly.
///
/// The rendering never rounds. When a prefix is used the literal count
/// follows in parentheses, e.g. `1GiB (1073741824B)`, otherwise the literal
/// count is printed on its own (`1536B`). Zero is never abbreviated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryPrefix<'a> {
    count: u64,
    unit: &'a str,
}

impl<'a> BinaryPrefix<'a> {
    pub const fn new(count: u64, unit: &'a str) -> Self {
        Self { count, unit }
    }

    /// Returns the scaled value and its prefix, or `None` when the count
    /// can only be written literally.
    pub const fn scaled(&self) -> Option<(u64, &'static str)> {
        let n = self.count;

        if n == 0 {
            None
        } else if n % GI == 0 {
            Some((n / GI, "Gi"))
        } else if n % MI == 0 {
            Some((n / MI, "Mi"))
        } else if n % KI == 0 {
            Some((n / KI, "Ki"))
        } else {
            None
        }
    }
}

impl fmt::Display for BinaryPrefix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scaled() {
            Some((value, prefix)) => write!(
                f,
                "{value}{prefix}{unit} ({count}{unit})",
                unit = self.unit,
                count = self.count
            ),
            None => write!(f, "{}{}", self.count, self.unit),
        }
    }
}

/// Formats `count` with an exact binary prefix. See [`BinaryPrefix`].
pub fn binary_prefix(count: u64, unit: &str) -> String {
    BinaryPrefix::new(count, unit).to_string()
}
