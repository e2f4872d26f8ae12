mod common;

use std::fs;
use std::sync::Arc;

use common::matcher;
use tempfile::TempDir;
use valuelens::cli::{Cli, execute};
use valuelens::config::{ViewerConfig, read_document};
use valuelens::rendering::{
    MatcherRenderer, PersistenceCodec, RendererRegistry, ValueRenderer, load_registry,
    save_registry,
};

fn run(dir: &TempDir, args: &[&str]) -> anyhow::Result<String> {
    use clap::Parser;

    let renderers = dir.path().join("debugger.renderers.yaml");
    let config = dir.path().join("config.yaml");
    let mut argv = vec![
        "valuelens".to_string(),
        "--renderers".to_string(),
        renderers.display().to_string(),
        "--config".to_string(),
        config.display().to_string(),
    ];
    argv.extend(args.iter().map(|a| a.to_string()));
    let cli = Cli::try_parse_from(argv)?;
    let mut out = Vec::new();
    execute(&cli, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_registry_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("renderers.yaml");
    let codec = PersistenceCodec::default();

    let source = RendererRegistry::default();
    source.add_renderer(matcher("Point", "com.example.Point"));
    source.add_renderer(Arc::new(
        MatcherRenderer::exact("Name", "com.example.Name", "{field:first} {field:last}").unwrap(),
    ));
    save_registry(&path, &codec, &source).unwrap();

    let document = read_document(&path).unwrap().unwrap();
    assert_eq!(document.attribute("VERSION"), Some("3"));
    assert_eq!(document.children.len(), 2);

    let target = RendererRegistry::default();
    load_registry(&path, &codec, &target).unwrap();
    assert_eq!(target, source);
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("renderers.yaml");
    fs::write(&path, "name: [unclosed").unwrap();
    let registry = RendererRegistry::default();
    assert!(load_registry(&path, &PersistenceCodec::default(), &registry).is_err());
}

#[test]
fn test_cli_add_list_remove() {
    let dir = TempDir::new().unwrap();

    let listed = run(&dir, &["list"]).unwrap();
    assert_eq!(listed.lines().count(), 3);
    assert!(listed.contains("Array"));
    assert!(listed.contains("(default)"));

    run(
        &dir,
        &[
            "add",
            "--name",
            "Lists",
            "--pattern",
            "java.util.*List",
            "--kind",
            "glob",
            "--template",
            "size={length}",
        ],
    )
    .unwrap();
    assert!(run(&dir, &["add", "--name", "Lists", "--pattern", "X", "--template", "x"]).is_err());

    let listed = run(&dir, &["list"]).unwrap();
    let first = listed.lines().next().unwrap();
    assert!(first.contains("Lists"));
    assert!(first.contains("[user]"));
    assert!(!first.contains("(default)"));

    run(&dir, &["remove", "--name", "Lists"]).unwrap();
    assert_eq!(run(&dir, &["list"]).unwrap().lines().count(), 3);
    assert!(run(&dir, &["remove", "--name", "Lists"]).is_err());
}

#[test]
fn test_cli_render_uses_user_renderer() {
    let dir = TempDir::new().unwrap();
    run(
        &dir,
        &[
            "add",
            "--name",
            "Wrapped",
            "--pattern",
            "java.lang.String",
            "--template",
            "<{value}>",
            "--max-length",
            "3",
        ],
    )
    .unwrap();

    let out = run(
        &dir,
        &["render", "--type", "java.lang.String", "--value", "hello", "--plain"],
    )
    .unwrap();
    assert_eq!(out.trim_end(), "<\"hel...\">");

    // Patterns see the type name as typed, so the signature form falls back.
    let out = run(
        &dir,
        &["render", "--type", "Ljava/lang/String;", "--value", "hello", "--plain"],
    )
    .unwrap();
    assert_eq!(out.trim_end(), "\"hello\"");

    let out = run(&dir, &["render", "--type", "int", "--value", "-3", "--plain"]).unwrap();
    assert_eq!(out.trim_end(), "-3");
}

#[test]
fn test_cli_signature_pattern_matches_signature_type() {
    let dir = TempDir::new().unwrap();
    run(
        &dir,
        &[
            "add",
            "--name",
            "IntArrays",
            "--pattern",
            "[I",
            "--template",
            "ints x{length}",
        ],
    )
    .unwrap();

    let out = run(&dir, &["render", "--type", "[I", "--value", "4,5", "--plain"]).unwrap();
    assert_eq!(out.trim_end(), "ints x2");
    let out = run(&dir, &["render", "--type", "int[]", "--value", "4,5", "--plain"]).unwrap();
    assert_eq!(out.trim_end(), "int[2] {4, 5}");
}

#[test]
fn test_viewer_settings_shape_builtin_output() {
    let dir = TempDir::new().unwrap();
    let config = ViewerConfig {
        array_preview_limit: 2,
        show_hex_for_integers: true,
        ..ViewerConfig::default()
    };
    config.save_to(&dir.path().join("config.yaml")).unwrap();

    let out = run(&dir, &["render", "--type", "[I", "--value", "1,2,3", "--plain"]).unwrap();
    assert_eq!(out.trim_end(), "int[3] {1, 2, ...}");
    let out = run(&dir, &["render", "--type", "int", "--value", "255", "--plain"]).unwrap();
    assert_eq!(out.trim_end(), "255 (0xff)");
}

#[test]
fn test_version_mismatch_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("debugger.renderers.yaml");
    let registry = RendererRegistry::default();
    registry.add_renderer(matcher("Old", "Old"));
    let mut document = registry.save().unwrap();
    document.set_attribute("VERSION", "1");
    valuelens::config::write_document(&path, &document).unwrap();

    let listed = run(&dir, &["list"]).unwrap();
    assert!(!listed.contains("Old"));
    let names: Vec<String> = registry
        .all_renderers()
        .iter()
        .map(|r: &Arc<dyn ValueRenderer>| r.name().to_string())
        .collect();
    assert_eq!(names[0], "Old");
}
