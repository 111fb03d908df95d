//! Student roster entries.

use serde::{Deserialize, Serialize};

/// A student known to the scanner. Roll numbers are unique within a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub roll_number: String,
    pub name: String,
    pub class: String,
    pub section: String,
    pub email: String,
}

impl Student {
    /// Case-insensitive match against name, roll number, or class.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.roll_number.to_lowercase().contains(needle)
            || self.class.to_lowercase().contains(needle)
    }
}
