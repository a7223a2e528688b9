use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;

/// Report-variable identifier as written in the first field of a log line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableKey(String);

impl VariableKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VariableKey {
    fn from(key: &str) -> Self {
        Self::new(key.trim())
    }
}

impl fmt::Display for VariableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One reportable variable from the dictionary section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDescriptor {
    pub key: VariableKey,
    pub name: String,
    /// Fourth dictionary field (typically `"<variable> [unit] !<frequency>"`),
    /// empty for three-field lines.
    pub unit_or_extra: String,
}

impl VariableDescriptor {
    /// Name shown to the caller and used for the output file name.
    pub fn display_name(&self) -> String {
        if self.unit_or_extra.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.unit_or_extra)
        }
    }

    /// Reporting frequency annotation following `!`, if any.
    ///
    /// ```
    /// use eso_hourly::eso::{VariableDescriptor, VariableKey};
    ///
    /// let d = VariableDescriptor {
    ///     key: VariableKey::new("7"),
    ///     name: "ZONE ONE".into(),
    ///     unit_or_extra: "Zone Mean Air Temperature [C] !TimeStep".into(),
    /// };
    /// assert_eq!(d.reporting_frequency(), Some("TimeStep"));
    /// ```
    pub fn reporting_frequency(&self) -> Option<&str> {
        self.unit_or_extra
            .split_once('!')
            .map(|(_, freq)| freq.trim())
            .filter(|freq| !freq.is_empty())
    }
}

impl fmt::Display for VariableDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key: {}, Variable: {}", self.key, self.display_name())
    }
}

/// Variable dictionary keyed by [`VariableKey`], in first-seen order.
///
/// A repeated key replaces the earlier descriptor but keeps its original
/// position in iteration order.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: IndexMap<VariableKey, VariableDescriptor>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a descriptor, returning the one it replaced.
    pub fn insert(&mut self, descriptor: VariableDescriptor) -> Option<VariableDescriptor> {
        match self.entries.entry(descriptor.key.clone()) {
            Entry::Occupied(mut slot) => Some(slot.insert(descriptor)),
            Entry::Vacant(slot) => {
                slot.insert(descriptor);
                None
            }
        }
    }

    pub fn get(&self, key: &VariableKey) -> Option<&VariableDescriptor> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &VariableKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableDescriptor> {
        self.entries.values()
    }

    /// Case-insensitive substring search over display names.
    pub fn find_by_name(&self, needle: &str) -> Vec<&VariableDescriptor> {
        let needle = needle.to_lowercase();
        self.entries
            .values()
            .filter(|d| d.display_name().to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(key: &str, name: &str, extra: &str) -> VariableDescriptor {
        VariableDescriptor {
            key: VariableKey::new(key),
            name: name.to_string(),
            unit_or_extra: extra.to_string(),
        }
    }

    #[test]
    fn display_name_joins_extra_field() {
        assert_eq!(
            descriptor("7", "ZONE ONE", "Zone Mean Air Temperature [C] !Hourly").display_name(),
            "ZONE ONE, Zone Mean Air Temperature [C] !Hourly"
        );
        assert_eq!(descriptor("1", "Site", "").display_name(), "Site");
    }

    #[test]
    fn reporting_frequency_absent_without_bang() {
        assert_eq!(descriptor("7", "Zone", "Temp [C]").reporting_frequency(), None);
        assert_eq!(descriptor("7", "Zone", "").reporting_frequency(), None);
    }

    #[test]
    fn duplicate_key_last_write_wins_and_keeps_position() {
        let mut dict = Dictionary::new();
        assert!(dict.insert(descriptor("1", "first", "")).is_none());
        dict.insert(descriptor("2", "second", ""));
        let replaced = dict.insert(descriptor("1", "replacement", ""));

        assert_eq!(replaced.map(|d| d.name), Some("first".to_string()));
        assert_eq!(dict.len(), 2);
        let names: Vec<&str> = dict.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["replacement", "second"]);
    }

    #[test]
    fn find_by_name_is_case_insensitive() {
        let mut dict = Dictionary::new();
        dict.insert(descriptor("7", "ZONE ONE", "Zone Mean Air Temperature [C]"));
        dict.insert(descriptor("8", "CHILLER", "Chiller Electricity Energy [J]"));

        let hits = dict.find_by_name("mean air");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key.as_str(), "7");
        assert!(dict.find_by_name("boiler").is_empty());
    }
}
