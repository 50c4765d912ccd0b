use std::path::{Path, PathBuf};

use clap::Args;
use eyre::Result;
use stackforge_archive::GeneratorConfig;
use stackforge_blueprint::BlueprintFile;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "forge.toml";

#[derive(Args)]
pub struct GenerateCommand {
    /// Blueprint file (editor JSON export, or .toml)
    pub blueprint: PathBuf,

    /// Directory the archive is delivered to
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Path to forge.toml (defaults to ./forge.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Template directory overriding the built-in templates
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Write pipeline snapshots (JSON per phase) to this directory
    #[arg(long)]
    pub snapshots: Option<PathBuf>,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let config = self.config();
        let file = BlueprintFile::open(&self.blueprint).unwrap_or_exit();

        let report = ops::generate(
            file.into_blueprint(),
            GenerateOptions {
                blueprint_path: &self.blueprint,
                output_dir: &self.output,
                config: &config,
                snapshots: self.snapshots.as_deref(),
            },
        )?;

        report.render(&mut TerminalOutput::new());

        if !report.is_packaged() {
            std::process::exit(1);
        }
        Ok(())
    }

    /// Load the config file, then apply flag overrides.
    fn config(&self) -> GeneratorConfig {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path).unwrap_or_exit(),
            None if Path::new(DEFAULT_CONFIG).is_file() => {
                GeneratorConfig::load(DEFAULT_CONFIG).unwrap_or_exit()
            }
            None => GeneratorConfig::default(),
        };

        if let Some(dir) = &self.templates {
            config.templates.dir = Some(dir.clone());
        }
        config
    }
}
