//! Report data structures for commands.
//!
//! Commands build reports, then render them to an [`Output`] target.

mod check;
mod enhance;
mod generate;
mod output;

pub use check::CheckReport;
pub(crate) use check::located;
pub use enhance::{EnhanceReport, FilledDefaults};
pub use generate::{GenerateReport, GenerateResult, PackagedResult, ServiceLine};
pub use output::{Output, Report, TerminalOutput};
