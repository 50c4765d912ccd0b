//! Check command report data structures.

use std::path::PathBuf;

use stackforge_codegen::{Diagnostic, Suggestion, ValidationReport};

use super::output::{Output, Report};

/// Report data from blueprint validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the blueprint file.
    pub path: PathBuf,
    pub project: String,
    pub service_count: usize,
    pub validation: ValidationReport,
    pub suggestions: Vec<Suggestion>,
}

impl CheckReport {
    /// Whether the check passed (no blocking issues).
    pub fn is_valid(&self) -> bool {
        self.validation.valid()
    }
}

pub(crate) fn located(diagnostic: &Diagnostic) -> String {
    match &diagnostic.location {
        Some(loc) => format!("{}\n  --> {}", diagnostic.message, loc),
        None => diagnostic.message.clone(),
    }
}

pub(crate) fn render_suggestions(out: &mut dyn Output, suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        return;
    }
    out.newline();
    out.section("Suggestions");
    for (i, suggestion) in suggestions.iter().enumerate() {
        out.numbered_item(
            i + 1,
            &format!(
                "[{}] {} ({})",
                suggestion.priority, suggestion.description, suggestion.impact
            ),
        );
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for issue in &self.validation.blocking {
            out.error(&located(issue));
        }
        for warning in &self.validation.warnings {
            out.warning(&located(warning));
        }
        if self.validation.issue_count() > 0 {
            out.newline();
        }

        let path = self.path.display();
        if self.is_valid() {
            out.preformatted(&format!("✓ {} is valid", path));
        } else {
            out.preformatted(&format!(
                "✗ {} has {} blocking issue(s)",
                path,
                self.validation.blocking.len()
            ));
        }
        out.newline();
        out.key_value("Project", &self.project);
        out.key_value("Services", &self.service_count.to_string());
        out.key_value("Score", &format!("{}/100", self.validation.score));

        render_suggestions(out, &self.suggestions);
    }
}
