//! Loading fragment dumps from disk.

use std::fs;

use pdfstory::model::{Node, SemanticStyle};
use pdfstory::{
    load_fragments, BuildOptions, CalibrationConfig, ConfigFile, Error, JsonFormat, Pdfstory,
    RenderOptions,
};
use tempfile::TempDir;

const PAGE_DUMP: &str = r#"[
    { "blocks": [ { "lines": [ { "spans": [
        { "text": "The Tempter", "font": "Title-Bold", "size": 40.0, "flags": 20, "color": 0, "origin": [100.0, 200.0] }
    ] } ] } ] },
    { "blocks": [
        { "lines": [ { "spans": [
            { "text": "Introduction", "font": "MrEaves", "size": 23.0, "flags": 4, "color": 5773325, "origin": [54.0, 80.0] }
        ] } ] },
        { "lines": [
            { "spans": [
                { "text": "Welcome to the ", "font": "Bookinsanity", "size": 9.5, "flags": 4, "color": 2301728, "origin": [54.0, 110.0] },
                { "text": "Tempter", "font": "Bookinsanity-Bold", "size": 9.5, "flags": 20, "color": 2301728, "origin": [120.0, 110.0] }
            ] },
            { "spans": [
                { "text": ", a short adventure.", "font": "Bookinsanity", "size": 9.5, "flags": 4, "color": 2301728, "origin": [150.0, 110.0] }
            ] }
        ] },
        { "type": 1 }
    ] }
]"#;

const CONFIG: &str = r#"{
    "skip_strings": ["Not for resale"],
    "stop_processing": ["Appendix"],
    "character_override": { "•": "bullet" },
    "seasons": {
        "DDEX1": {
            "styles": {
                "heading1": "Introduction",
                "body": "Welcome",
                "body_bold": "MUST_OVERRIDE"
            },
            "styles_override": {
                "DDEX1-01": { "body_bold": "Tempter" }
            }
        }
    }
}"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_page_dump() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "DDEX1-01.json", PAGE_DUMP);

    let fragments = load_fragments(&path).unwrap();
    assert_eq!(fragments.len(), 5);
    assert_eq!(fragments[3].location.block, 1);
    assert_eq!(fragments[4].location.line, 1);
}

#[test]
fn test_run_file_with_config_file() {
    let dir = TempDir::new().unwrap();
    let dump = write(&dir, "DDEX1-01.json", PAGE_DUMP);
    let config = write(&dir, "config.json", CONFIG);

    let file = ConfigFile::from_path(&config).unwrap();
    let mut converter = Pdfstory::for_document(&file, "DDEX1-01").unwrap();
    let conversion = converter.run_file(&dump).unwrap();
    let doc = &conversion.document;

    assert_eq!(doc.story_names(), vec!["00 (DDEX1-01)", "01 Introduction"]);
    assert_eq!(doc.metadata.source.as_deref(), Some(dump.display().to_string().as_str()));
    assert_eq!(doc.metadata.page_count, 2);

    let Node::Paragraph(p) = &doc.stories[1].body[0] else {
        panic!("expected paragraph");
    };
    assert_eq!(p.run.plain_text(), "Welcome to the Tempter, a short adventure.");
    assert!(p.run.segments[1].bold);
    assert_eq!(p.run.segments[1].text, "Tempter, ");

    let text = conversion.to_text(&RenderOptions::default()).unwrap();
    assert!(text.starts_with("00 (DDEX1-01)"));
    let json = conversion.to_json(JsonFormat::Compact).unwrap();
    assert!(json.contains("\"name\":\"01 Introduction\""));
}

#[test]
fn test_must_override_left_unresolved() {
    let file = ConfigFile::from_json_str(CONFIG).unwrap();
    let config = file.resolve("DDEX1-02").unwrap();

    assert!(!config.styles.contains_key(&SemanticStyle::BodyBold));
    assert_eq!(config.styles.get(&SemanticStyle::Body).map(String::as_str), Some("Welcome"));
    assert!(config.is_never_allowed("Not for resale. Permitted to photocopy"));
}

#[test]
fn test_trace_export() {
    let dir = TempDir::new().unwrap();
    let dump = write(&dir, "dump.json", PAGE_DUMP);

    let config = CalibrationConfig::new()
        .with_style_anchor(SemanticStyle::Heading1, "Introduction")
        .with_style_anchor(SemanticStyle::Body, "Welcome");
    let mut converter = Pdfstory::new(config).with_options(BuildOptions::new().with_title_story(false));
    let conversion = converter.run_file(&dump).unwrap();

    let ndjson = conversion.report.trace_ndjson().unwrap();
    let out = write(&dir, "dump.ndjson", &ndjson);
    let lines = fs::read_to_string(out).unwrap();
    let heading = lines
        .lines()
        .find(|line| line.contains("\"text\":\"Introduction\""))
        .unwrap();
    assert!(heading.contains("\"semantic\":\"heading1\""));
    assert_eq!(lines.lines().count(), conversion.report.trace.len());
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = load_fragments(dir.path().join("absent.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}
