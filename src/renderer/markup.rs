//! In-memory markup tree and its text writer

use std::collections::BTreeSet;

use super::KmlConfig;

/// An XML element with attributes, optional text and child elements
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set an attribute, replacing an existing one with the same name
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Set the text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a new empty child and return it
    pub fn child(&mut self, tag: impl Into<String>) -> &mut Element {
        self.children.push(Element::new(tag));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Append an existing element as the last child
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Get an attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given tag
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Follow a `/`-separated path of tags through first matches
    pub fn find_path(&self, path: &str) -> Option<&Element> {
        path.split('/')
            .try_fold(self, |element, tag| element.find(tag))
    }

    /// Collect namespace prefixes used by tags in this subtree
    pub fn collect_prefixes(&self, prefixes: &mut BTreeSet<String>) {
        if let Some((prefix, _)) = self.tag.split_once(':') {
            prefixes.insert(prefix.to_string());
        }
        for child in &self.children {
            child.collect_prefixes(prefixes);
        }
    }

    /// Write this element as text
    pub fn to_text(&self, config: &KmlConfig) -> String {
        let mut out = String::new();
        write_element(&mut out, self, 0, config);
        out
    }
}

/// Write `element` and its subtree to `out`
pub fn write_element(out: &mut String, element: &Element, depth: usize, config: &KmlConfig) {
    let indent = if config.pretty_print {
        " ".repeat(depth * config.indent_width)
    } else {
        String::new()
    };
    let nl = if config.pretty_print { "\n" } else { "" };

    out.push_str(&indent);
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attributes {
        out.push_str(&format!(r#" {}="{}""#, name, escape_xml(value)));
    }

    if element.children.is_empty() {
        match &element.text {
            Some(text) => {
                out.push('>');
                out.push_str(&escape_xml(text));
                out.push_str(&format!("</{}>", element.tag));
            }
            None => out.push_str("/>"),
        }
        return;
    }

    out.push('>');
    if let Some(text) = &element.text {
        out.push_str(&escape_xml(text));
    }
    for child in &element.children {
        out.push_str(nl);
        write_element(out, child, depth + 1, config);
    }
    out.push_str(nl);
    out.push_str(&indent);
    out.push_str(&format!("</{}>", element.tag));
}

/// Escape special XML characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Element {
        let mut root = Element::new("Folder").with_attribute("id", "f1");
        root.child("name").text = Some("A & B".to_string());
        root.child("Placemark").child("open").text = Some("0".to_string());
        root.push(Element::new("empty"));
        root
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn test_pretty_output() {
        let text = sample().to_text(&KmlConfig::default());
        let expected = [
            r#"<Folder id="f1">"#,
            "  <name>A &amp; B</name>",
            "  <Placemark>",
            "    <open>0</open>",
            "  </Placemark>",
            "  <empty/>",
            "</Folder>",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_compact_output() {
        let text = sample().to_text(&KmlConfig::compact());
        assert_eq!(
            text,
            r#"<Folder id="f1"><name>A &amp; B</name><Placemark><open>0</open></Placemark><empty/></Folder>"#
        );
    }

    #[test]
    fn test_find_path() {
        let root = sample();
        assert_eq!(
            root.find_path("Placemark/open").and_then(|e| e.text.as_deref()),
            Some("0")
        );
        assert!(root.find_path("Placemark/name").is_none());
        assert_eq!(root.attribute("id"), Some("f1"));
    }

    #[test]
    fn test_collect_prefixes() {
        let mut root = Element::new("LineStyle");
        root.child("gx:outerColor");
        root.child("color");
        let mut prefixes = BTreeSet::new();
        root.collect_prefixes(&mut prefixes);
        assert_eq!(prefixes.into_iter().collect::<Vec<_>>(), vec!["gx".to_string()]);
    }
}
