//! Ordered settings maps rendered as child elements of a node

use std::fmt;

/// A value in a settings map
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Text(String),
    Integer(i64),
    Number(f64),
    /// Rendered as `0` or `1`, never `true`/`false`
    Flag(bool),
    /// Rendered as a nested element
    Map(Settings),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Text(s) => write!(f, "{}", s),
            SettingValue::Integer(i) => write!(f, "{}", i),
            SettingValue::Number(n) => write!(f, "{}", n),
            SettingValue::Flag(b) => write!(f, "{}", u8::from(*b)),
            SettingValue::Map(_) => Ok(()),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Integer(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Number(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Flag(value)
    }
}

impl From<Settings> for SettingValue {
    fn from(value: Settings) -> Self {
        SettingValue::Map(value)
    }
}

/// Insertion-ordered map from element name to optional value
///
/// A `None` value keeps the key's position but is skipped when rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    entries: Vec<(String, Option<SettingValue>)>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing an existing value in place
    pub fn set(&mut self, key: impl Into<String>, value: Option<SettingValue>) -> &mut Self {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Builder form of [`Settings::set`] for a present value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.set(key, Some(value.into()));
        self
    }

    /// Builder form of [`Settings::set`] for an optional value
    pub fn with_opt<V: Into<SettingValue>>(
        mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        self.set(key, value.map(Into::into));
        self
    }

    /// Get the value of `key`; `None` for missing and omitted keys alike
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Iterate all entries, including omitted ones, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&SettingValue>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_renders_as_digit() {
        assert_eq!(SettingValue::Flag(true).to_string(), "1");
        assert_eq!(SettingValue::Flag(false).to_string(), "0");
    }

    #[test]
    fn test_number_keeps_precision() {
        assert_eq!(SettingValue::Number(0.1 + 0.2).to_string(), "0.30000000000000004");
        assert_eq!(SettingValue::Number(1000.0).to_string(), "1000");
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut settings = Settings::new().with("name", "a").with("open", false);
        settings.set("name", Some("b".into()));
        let keys: Vec<_> = settings.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "open"]);
        assert_eq!(settings.get("name"), Some(&SettingValue::Text("b".into())));
    }

    #[test]
    fn test_omitted_values() {
        let settings = Settings::new().with_opt::<&str>("description", None);
        assert_eq!(settings.len(), 1);
        assert_eq!(settings.get("description"), None);
    }
}
