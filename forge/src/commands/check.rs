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
pub struct CheckCommand {
    /// Blueprint file (editor JSON export, or .toml)
    pub blueprint: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let file = BlueprintFile::open(&self.blueprint).unwrap_or_exit();
        let report = ops::check(file.blueprint(), file.path());

        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
