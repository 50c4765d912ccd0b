//! Validation report and quality score.

use serde::Serialize;
use stackforge_blueprint::Blueprint;

use crate::pipeline::Diagnostic;

const BLOCKING_PENALTY: i32 = 20;
const WARNING_PENALTY: i32 = 5;
const CONNECTION_BONUS: i32 = 10;
const HEALTH_CHECK_BONUS: i32 = 5;
const RESOURCES_BONUS: i32 = 5;

/// Outcome of validating a blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Issues that prevent generation.
    pub blocking: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    /// Quality score in `0..=100`.
    pub score: u8,
}

impl ValidationReport {
    /// Build a report from lint diagnostics.
    ///
    /// Error diagnostics become blocking issues, warnings stay warnings and
    /// info diagnostics are dropped.
    pub fn from_diagnostics(blueprint: &Blueprint, diagnostics: Vec<Diagnostic>) -> Self {
        let (blocking, rest): (Vec<_>, Vec<_>) = diagnostics
            .into_iter()
            .partition(|d| d.severity.is_error());
        let warnings: Vec<_> = rest.into_iter().filter(|d| d.severity.is_warning()).collect();
        let score = score(blueprint, blocking.len(), warnings.len());

        Self {
            blocking,
            warnings,
            score,
        }
    }

    /// A blueprint is valid when nothing blocks it.
    pub fn valid(&self) -> bool {
        self.blocking.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.blocking.len() + self.warnings.len()
    }
}

/// `100 - 20*blocking - 5*warnings`, plus bonuses for connections, health
/// checks and resource limits the author already set, clamped to `0..=100`.
fn score(blueprint: &Blueprint, blocking: usize, warnings: usize) -> u8 {
    let penalty =
        |count: usize, weight: i32| i32::try_from(count).unwrap_or(i32::MAX).saturating_mul(weight);

    let mut score = 100i32
        .saturating_sub(penalty(blocking, BLOCKING_PENALTY))
        .saturating_sub(penalty(warnings, WARNING_PENALTY));
    if blueprint.resolved_connections().next().is_some() {
        score += CONNECTION_BONUS;
    }
    if blueprint.services.iter().any(|s| s.config.health_check.is_some()) {
        score += HEALTH_CHECK_BONUS;
    }
    if blueprint.services.iter().any(|s| s.config.resources.is_some()) {
        score += RESOURCES_BONUS;
    }

    score.clamp(0, 100) as u8
}
