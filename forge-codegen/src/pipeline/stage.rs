//! Request lifecycle states.

use serde::Serialize;

/// Where a generation request currently is.
///
/// ```text
/// Received -> Validated -> Enhanced -> Rendered -> Synthesized -> Packaged -> Delivered
///                 \-> Rejected                      (any) -> Failed
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Received,
    Validated,
    /// Validation found blocking issues; nothing was generated.
    Rejected,
    Enhanced,
    Rendered,
    Synthesized,
    Packaged,
    Delivered,
    Failed,
}

impl Stage {
    /// Check whether the request can make no further progress.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Rejected | Stage::Delivered | Stage::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Received => "received",
            Stage::Validated => "validated",
            Stage::Rejected => "rejected",
            Stage::Enhanced => "enhanced",
            Stage::Rendered => "rendered",
            Stage::Synthesized => "synthesized",
            Stage::Packaged => "packaged",
            Stage::Delivered => "delivered",
            Stage::Failed => "failed",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
