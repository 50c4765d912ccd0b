//! Backend renderer with data-store client bootstraps.

use serde_json::{Map, Value};
use stackforge_blueprint::ServiceNode;
use stackforge_core::ServiceType;

use crate::{
    builder::CodeBuilder,
    generation::{FileEntry, FileRegistry},
    render::{RenderError, RenderRequest, RenderedService, ServiceRenderer},
};

const PACKAGE_MANIFEST: &str = "package.json";

/// npm package and version added for each bootstrap.
const PG: (&str, &str) = ("pg", "^8.11.3");
const MONGOOSE: (&str, &str) = ("mongoose", "^8.0.3");
const REDIS: (&str, &str) = ("redis", "^4.6.12");

/// Renders backend services.
///
/// Relational, document and cache dependencies each get a client bootstrap
/// file, a connection variable and the client package in `package.json`.
pub struct BackendRenderer;

impl ServiceRenderer for BackendRenderer {
    fn service_type(&self) -> ServiceType {
        ServiceType::BackendRuntime
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<RenderedService, RenderError> {
        let mut rendered = request.base()?;
        rendered
            .environment
            .insert("PORT".to_string(), request.port().to_string());

        let mut packages = Vec::new();

        let relational = request.dependency(|ty| *ty == ServiceType::RelationalDatabase);
        if let Some(db) = relational {
            rendered
                .files
                .register(FileEntry::source("src/db.js", postgres_bootstrap()));
            rendered
                .environment
                .insert("DATABASE_URL".to_string(), postgres_url(request, db));
            packages.push(PG);
        }

        if let Some(db) = request.dependency(|ty| *ty == ServiceType::DocumentDatabase) {
            // src/db.js already belongs to the relational client
            let path = if relational.is_some() {
                "src/mongo.js"
            } else {
                "src/db.js"
            };
            rendered
                .files
                .register(FileEntry::source(path, mongoose_bootstrap()));
            rendered.environment.insert(
                "MONGODB_URI".to_string(),
                format!("mongodb://{}/{}", request.endpoint(db), request.project),
            );
            packages.push(MONGOOSE);
        }

        if let Some(cache) = request.dependency(ServiceType::is_cache) {
            rendered
                .files
                .register(FileEntry::source("src/cache.js", redis_bootstrap()));
            rendered.environment.insert(
                "REDIS_URL".to_string(),
                format!("redis://{}", request.endpoint(cache)),
            );
            packages.push(REDIS);
        }

        add_packages(&mut rendered.files, &packages)?;
        Ok(rendered)
    }
}

/// Connection URL built from the database's own credentials when it sets
/// them.
fn postgres_url(request: &RenderRequest<'_>, db: &ServiceNode) -> String {
    let env = &db.config.environment;
    let setting = |key: &str| env.get(key).map(String::as_str).unwrap_or("postgres");

    format!(
        "postgresql://{}:{}@{}/{}",
        setting("POSTGRES_USER"),
        setting("POSTGRES_PASSWORD"),
        request.endpoint(db),
        setting("POSTGRES_DB"),
    )
}

fn postgres_bootstrap() -> String {
    CodeBuilder::javascript()
        .line("const { Pool } = require('pg');")
        .blank()
        .block_with_close("const pool = new Pool({", "});", |b| {
            b.line("connectionString: process.env.DATABASE_URL,")
        })
        .blank()
        .block_with_close("module.exports = {", "};", |b| {
            b.line("query: (text, params) => pool.query(text, params),")
                .line("pool,")
        })
        .build()
}

fn mongoose_bootstrap() -> String {
    CodeBuilder::javascript()
        .line("const mongoose = require('mongoose');")
        .blank()
        .block_with_close("async function connect() {", "}", |b| {
            b.line("await mongoose.connect(process.env.MONGODB_URI);")
                .line("console.log('connected to MongoDB');")
        })
        .blank()
        .line("module.exports = { connect, mongoose };")
        .build()
}

fn redis_bootstrap() -> String {
    CodeBuilder::javascript()
        .line("const { createClient } = require('redis');")
        .blank()
        .line("const client = createClient({ url: process.env.REDIS_URL });")
        .blank()
        .line("client.on('error', (err) => console.error('redis error', err));")
        .blank()
        .line("module.exports = client;")
        .build()
}

/// Add missing packages to every `package.json` in `files`.
///
/// Packages already listed keep their version.
fn add_packages(files: &mut FileRegistry, packages: &[(&str, &str)]) -> Result<(), RenderError> {
    if packages.is_empty() {
        return Ok(());
    }

    let manifests = files.entries_mut().filter(|e| {
        e.path == PACKAGE_MANIFEST || e.path.ends_with(&format!("/{PACKAGE_MANIFEST}"))
    });

    for entry in manifests {
        let invalid = |source: serde_json::Error| RenderError::Manifest {
            path: entry.path.clone(),
            source,
        };
        let mut manifest: Map<String, Value> =
            serde_json::from_str(&entry.content).map_err(invalid)?;

        let dependencies = manifest
            .entry("dependencies")
            .or_insert_with(|| Value::Object(Map::new()));
        if !dependencies.is_object() {
            *dependencies = Value::Object(Map::new());
        }
        if let Value::Object(dependencies) = dependencies {
            for (name, version) in packages {
                if !dependencies.contains_key(*name) {
                    dependencies.insert(name.to_string(), Value::from(*version));
                }
            }
        }

        let mut content = serde_json::to_string_pretty(&manifest).map_err(invalid)?;
        content.push('\n');
        entry.content = content;
    }
    Ok(())
}
