use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use stackforge_blueprint::BlueprintFile;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct EnhanceCommand {
    /// Blueprint file (editor JSON export, or .toml)
    pub blueprint: PathBuf,

    /// Write the enhanced blueprint here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl EnhanceCommand {
    pub fn run(&self) -> Result<()> {
        let file = BlueprintFile::open(&self.blueprint).unwrap_or_exit();
        let report = ops::enhance(file.blueprint(), self.output.as_deref())?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
