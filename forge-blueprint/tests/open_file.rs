use std::fs;

use stackforge_blueprint::{BlueprintFile, Error, Format};
use tempfile::TempDir;

#[test]
fn test_open_json_blueprint() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("shop.json");
    fs::write(
        &path,
        r#"{"services": [{"id": "web", "type": "frontend-framework", "name": "Web"}],
            "metadata": {"name": "Shop"}}"#,
    )
    .unwrap();

    let file = BlueprintFile::open(&path).unwrap();

    assert_eq!(file.path(), path);
    assert!(file.content().contains("frontend-framework"));
    assert_eq!(file.blueprint().metadata.name, "Shop");
    assert_eq!(file.into_blueprint().services.len(), 1);
}

#[test]
fn test_open_toml_blueprint() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("shop.toml");
    fs::write(
        &path,
        r#"
        [[services]]
        id = "db"
        type = "document-database"
        name = "Mongo"

        [[connections]]
        source = "api"
        target = "db"
        "#,
    )
    .unwrap();

    let file = BlueprintFile::open(&path).unwrap();
    assert_eq!(file.blueprint().connections.len(), 1);
}

#[test]
fn test_open_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = BlueprintFile::open(temp.path().join("nope.json")).unwrap_err();
    assert!(matches!(*err, Error::Io { .. }));
}

#[test]
fn test_open_reports_filename_in_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(&path, "{ \"services\": 42 }").unwrap();

    let err = BlueprintFile::open(&path).unwrap_err();
    assert!(matches!(*err, Error::Json { .. }));
    assert_eq!(err.to_string(), "failed to parse blueprint");
}

#[test]
fn test_format_from_path() {
    assert_eq!(Format::from_path("a.toml".as_ref()), Format::Toml);
    assert_eq!(Format::from_path("a.TOML".as_ref()), Format::Toml);
    assert_eq!(Format::from_path("a.json".as_ref()), Format::Json);
    assert_eq!(Format::from_path("blueprint".as_ref()), Format::Json);
}
