//! Generate command report data structures.

use std::path::PathBuf;

use super::{
    check::CheckReport,
    output::{Output, Report},
};

/// Report data from project generation.
#[derive(Debug)]
pub struct GenerateReport {
    pub project: String,
    /// Non-fatal pipeline warnings, including template fallbacks.
    pub warnings: Vec<String>,
    pub result: GenerateResult,
}

/// Outcome of a generation request.
#[derive(Debug)]
pub enum GenerateResult {
    /// The archive was written and delivered.
    Packaged(PackagedResult),
    /// Validation found blocking issues; nothing was written.
    Rejected(CheckReport),
}

#[derive(Debug)]
pub struct PackagedResult {
    /// The delivered archive.
    pub archive: PathBuf,
    /// Archive size in bytes.
    pub size: u64,
    pub services: Vec<ServiceLine>,
    /// Path to pipeline snapshots, if requested.
    pub snapshots: Option<PathBuf>,
}

/// One generated service directory.
#[derive(Debug)]
pub struct ServiceLine {
    pub slug: String,
    pub service_type: String,
    /// Why the service was rendered from registry defaults, if it was.
    pub fallback: Option<String>,
}

impl GenerateReport {
    pub fn is_packaged(&self) -> bool {
        matches!(self.result, GenerateResult::Packaged(_))
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerateResult::Packaged(packaged) => self.render_packaged(out, packaged),
            GenerateResult::Rejected(check) => check.render(out),
        }
    }
}

impl GenerateReport {
    fn render_packaged(&self, out: &mut dyn Output, packaged: &PackagedResult) {
        if let Some(dir) = &packaged.snapshots {
            out.key_value("Pipeline snapshots written to", &dir.display().to_string());
            out.newline();
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        out.section(&format!("Services ({})", packaged.services.len()));
        for service in &packaged.services {
            let line = match &service.fallback {
                Some(reason) => format!(
                    "{}/ ({}, {})",
                    service.slug, service.service_type, reason
                ),
                None => format!("{}/ ({})", service.slug, service.service_type),
            };
            out.list_item(&line);
        }
        out.newline();

        out.preformatted(&format!(
            "✓ {} packaged: {} ({})",
            self.project,
            packaged.archive.display(),
            human_size(packaged.size)
        ));
    }
}

fn human_size(bytes: u64) -> String {
    match bytes {
        0..1024 => format!("{bytes} B"),
        1024..1_048_576 => format!("{:.1} KiB", bytes as f64 / 1024.0),
        _ => format!("{:.1} MiB", bytes as f64 / 1_048_576.0),
    }
}
