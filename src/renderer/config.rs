//! Configuration for KML output

/// Configuration options for KML text output
#[derive(Debug, Clone)]
pub struct KmlConfig {
    /// Whether to emit the `<?xml ...?>` declaration line
    pub xml_declaration: bool,

    /// Whether to format output with newlines and indentation
    pub pretty_print: bool,

    /// Spaces per nesting level when pretty-printing
    pub indent_width: usize,
}

impl Default for KmlConfig {
    fn default() -> Self {
        Self {
            xml_declaration: true,
            pretty_print: true,
            indent_width: 2,
        }
    }
}

impl KmlConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the XML declaration is emitted
    pub fn with_xml_declaration(mut self, declaration: bool) -> Self {
        self.xml_declaration = declaration;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the indentation width used when pretty-printing
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Shorthand for single-line output
    pub fn compact() -> Self {
        Self::default().with_pretty_print(false)
    }
}
