//! Form value sets for request bodies.
//!
//! Twilio accepts `application/x-www-form-urlencoded` parameters. A key may
//! carry several values (for example repeated `MediaUrl` entries), so values
//! are kept as an ordered multimap.

use std::collections::BTreeMap;
use std::fmt::Display;

/// Content type used for encoded form bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Multimap of form parameters.
///
/// Keys are encoded in sorted order; values keep their insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<String, Vec<String>>,
}

impl FormValues {
    /// Create a new, empty value set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to the key, keeping any existing values.
    pub fn add(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.values
            .entry(key.into())
            .or_default()
            .push(value.to_string());
        self
    }

    /// Replace all values of the key with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.values.insert(key.into(), vec![value.to_string()]);
        self
    }

    /// Append a value when it is present.
    pub fn add_opt<T>(&mut self, key: impl Into<String>, value: Option<T>) -> &mut Self
    where
        T: Display,
    {
        if let Some(value) = value {
            self.add(key, value);
        }
        self
    }

    /// First value of the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of the key.
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map_or(&[][..], Vec::as_slice)
    }

    /// Remove the key and all of its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.values.remove(key)
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Encode as `application/x-www-form-urlencoded` text.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.values {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

impl<K, V> FromIterator<(K, V)> for FormValues
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (key, value) in iter {
            values.add(key, value);
        }
        values
    }
}
