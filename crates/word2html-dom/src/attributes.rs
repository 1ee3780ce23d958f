//! Ordered attribute storage.
//!
//! [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
//! "An element has an associated ordered attribute list."
//!
//! Unlike a hash map, insertion order is kept so that re-serializing a tree
//! always yields byte-identical output.

/// Ordered mapping of attribute names to values.
///
/// Setting an existing name replaces its value in place, keeping its original
/// position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributesMap {
    entries: Vec<(String, String)>,
}

impl AttributesMap {
    /// Create an empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Value of `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether `name` is present.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Set `name` to `value`, overwriting in place or appending.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Remove `name`, returning its former value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributesMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_position() {
        let mut attrs: AttributesMap = [("src", "a.png"), ("alt", "x"), ("style", "s")]
            .into_iter()
            .collect();
        attrs.set("alt", "y");
        let order: Vec<_> = attrs.iter().collect();
        assert_eq!(order, vec![("src", "a.png"), ("alt", "y"), ("style", "s")]);
    }

    #[test]
    fn test_remove() {
        let mut attrs: AttributesMap = [("class", "a")].into_iter().collect();
        assert_eq!(attrs.remove("class"), Some("a".to_string()));
        assert_eq!(attrs.remove("class"), None);
        assert!(attrs.is_empty());
    }
}
