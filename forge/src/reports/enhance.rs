//! Enhance command report data structures.

use std::path::PathBuf;

use stackforge_codegen::Suggestion;

use super::{
    check::render_suggestions,
    output::{Output, Report},
};

/// Defaults the enhancer filled in for one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilledDefaults {
    pub service: String,
    /// Config keys that were absent, e.g. `restart`.
    pub keys: Vec<&'static str>,
}

/// Report data from blueprint enhancement.
#[derive(Debug)]
pub struct EnhanceReport {
    /// Where the enhanced blueprint was written, if not to stdout.
    pub written_to: Option<PathBuf>,
    /// The enhanced blueprint, as editor JSON.
    pub json: String,
    pub filled: Vec<FilledDefaults>,
    pub suggestions: Vec<Suggestion>,
}

impl Report for EnhanceReport {
    fn render(&self, out: &mut dyn Output) {
        let Some(path) = &self.written_to else {
            // stdout carries only the JSON so it can be piped
            out.preformatted(&self.json);
            for suggestion in &self.suggestions {
                out.note(&format!("[{}] {}", suggestion.priority, suggestion.description));
            }
            return;
        };

        out.key_value("Enhanced blueprint written to", &path.display().to_string());

        if !self.filled.is_empty() {
            out.newline();
            out.section("Filled defaults");
            for filled in &self.filled {
                out.list_item(&format!("{}: {}", filled.service, filled.keys.join(", ")));
            }
        }

        render_suggestions(out, &self.suggestions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordingOutput;

    #[test]
    fn test_written_report() {
        let report = EnhanceReport {
            written_to: Some(PathBuf::from("out.json")),
            json: "{}".to_string(),
            filled: vec![FilledDefaults {
                service: "API".to_string(),
                keys: vec!["restart", "healthCheck"],
            }],
            suggestions: Vec::new(),
        };
        let mut out = RecordingOutput::default();

        report.render(&mut out);

        assert_eq!(
            out.lines,
            [
                "Enhanced blueprint written to: out.json",
                "",
                "Filled defaults:",
                "  - API: restart, healthCheck",
            ]
        );
    }

    #[test]
    fn test_stdout_report_prints_only_json() {
        let report = EnhanceReport {
            written_to: None,
            json: "{\"services\": []}".to_string(),
            filled: Vec::new(),
            suggestions: Vec::new(),
        };
        let mut out = RecordingOutput::default();

        report.render(&mut out);

        assert_eq!(out.lines, ["{\"services\": []}"]);
    }
}
