//! Blueprint parsing from strings.

use std::str::FromStr;

use crate::{Blueprint, Format, Result, error::SourceContext};

impl FromStr for Blueprint {
    type Err = Box<crate::Error>;

    /// Parse the editor's JSON export.
    fn from_str(s: &str) -> Result<Self> {
        parse_blueprint(s, "blueprint.json", Format::Json)
    }
}

impl Blueprint {
    /// Parse a blueprint with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str, format: Format) -> Result<Self> {
        parse_blueprint(content, filename, format)
    }

    /// Serialize to the editor's JSON format.
    pub fn to_json(&self) -> String {
        // Every field is a string map, sequence or scalar; serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Parse a blueprint from content with the given filename for error reporting.
pub fn parse_blueprint(content: &str, filename: &str, format: Format) -> Result<Blueprint> {
    let source_ctx = SourceContext::new(content, filename);
    match format {
        Format::Json => serde_json::from_str(content).map_err(|e| source_ctx.json_error(e)),
        Format::Toml => toml::from_str(content).map_err(|e| source_ctx.toml_error(e)),
    }
}
