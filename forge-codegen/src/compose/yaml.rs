//! YAML rendering of the compose descriptor.

use std::path::{Path, PathBuf};

use stackforge_core::GeneratedFile;

use super::{ComposeFile, ComposeService};
use crate::builder::{
    CodeBuilder,
    yaml::{flow_list, pair, quote},
};

/// File name of the descriptor inside the project root.
pub const COMPOSE_FILE_NAME: &str = "docker-compose.yml";

impl GeneratedFile for ComposeFile {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(COMPOSE_FILE_NAME)
    }

    fn render(&self) -> String {
        CodeBuilder::yaml()
            .line(&pair("version", &self.version))
            .blank()
            .block("services:", |b| {
                b.each(&self.services, |b, (name, service)| {
                    b.block(&format!("{}:", name), |b| render_service(b, service))
                })
            })
            .blank()
            .block("networks:", |b| {
                b.block(&format!("{}:", quote(&self.network)), |b| {
                    b.line(&pair("driver", "bridge"))
                })
            })
            .when(!self.volumes.is_empty(), |b| {
                b.blank().block("volumes:", |b| {
                    b.each(&self.volumes, |b, volume| {
                        b.line(&format!("{}: {{}}", quote(volume)))
                    })
                })
            })
            .build()
    }
}

fn render_service(b: CodeBuilder, service: &ComposeService) -> CodeBuilder {
    let health = &service.healthcheck;

    b.line(&pair("build", &service.build))
        .block("ports:", |b| list(b, &service.ports))
        .when(!service.environment.is_empty(), |b| {
            b.block("environment:", |b| {
                b.each(&service.environment, |b, (key, value)| {
                    b.line(&format!("{}: {}", quote(key), quote(value)))
                })
            })
        })
        .when(!service.volumes.is_empty(), |b| {
            b.block("volumes:", |b| list(b, &service.volumes))
        })
        .line(&pair("restart", &service.restart))
        .block("healthcheck:", |b| {
            b.line(&format!("test: {}", flow_list(&health.test)))
                .line(&pair("interval", &health.interval))
                .line(&pair("timeout", &health.timeout))
                .line(&format!("retries: {}", health.retries))
        })
        .block("deploy:", |b| {
            b.block("resources:", |b| {
                b.block("limits:", |b| {
                    b.line(&pair("cpus", &service.resources.cpus))
                        .line(&pair("memory", &service.resources.memory))
                })
            })
        })
        .block("networks:", |b| list(b, &service.networks))
        .when(!service.depends_on.is_empty(), |b| {
            b.block("depends_on:", |b| list(b, &service.depends_on))
        })
}

fn list(b: CodeBuilder, items: &[String]) -> CodeBuilder {
    b.each(items, |b, item| b.line(&format!("- {}", quote(item))))
}
