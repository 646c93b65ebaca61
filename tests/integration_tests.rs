//! Integration tests for the CV importer

use cv_importer::config::{Config, OutputFormat};
use cv_importer::input::InputManager;
use cv_importer::output::{render, ReportGenerator, TemplateId};
use cv_importer::processing::document::SectionKey;
use cv_importer::store::{FileProfileStore, ProfileStore};
use cv_importer::{CvImportError, CvParser};
use std::path::Path;
use tempfile::TempDir;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_cv.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Acme Ltd"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_cv.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("Jane Doe"));
    assert!(text.contains("- Led a team of four engineers"));
    assert!(!text.contains('#'));
    assert!(!text.contains("**"));
}

#[tokio::test]
async fn test_extraction_cache() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_cv.txt");

    let first = manager.extract_text(path).await.unwrap();
    let second = manager.extract_text(path).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);

    let mut uncached = InputManager::new().with_cache(false);
    uncached.extract_text(path).await.unwrap();
    assert_eq!(uncached.cache_size(), 0);
}

#[tokio::test]
async fn test_missing_and_unsupported_files() {
    let mut manager = InputManager::new();

    let missing = manager.extract_text(Path::new("tests/fixtures/nope.txt")).await;
    assert!(matches!(missing, Err(CvImportError::InvalidInput(_))));

    let dir = TempDir::new().unwrap();
    let odd = dir.path().join("cv.xyz");
    std::fs::write(&odd, "Jane Doe").unwrap();
    let unsupported = manager.extract_text(&odd).await;
    assert!(matches!(unsupported, Err(CvImportError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_import_plain_text_cv() {
    let mut manager = InputManager::new();
    let parser = CvParser::default();
    let outcome = manager
        .import_cv(Path::new("tests/fixtures/sample_cv.txt"), &parser)
        .await
        .unwrap();

    let cv = &outcome.data;
    assert!(outcome.success);
    assert_eq!(cv.personal_details.name, "Jane Doe");
    assert_eq!(cv.personal_details.email, "jane.doe@example.co.uk");
    assert_eq!(cv.work_experience.len(), 1);
    assert_eq!(cv.work_experience[0].company, "Acme Ltd");
    assert_eq!(cv.work_experience[0].responsibilities.len(), 3);
    assert_eq!(cv.education.dates, "2011 - 2014");
    assert!(outcome.debug.sections_missing.contains(&SectionKey::Projects));
}

#[tokio::test]
async fn test_import_markdown_cv() {
    let mut manager = InputManager::new();
    let parser = CvParser::default();
    let outcome = manager
        .import_cv(Path::new("tests/fixtures/sample_cv.md"), &parser)
        .await
        .unwrap();

    let cv = &outcome.data;
    assert_eq!(cv.personal_details.name, "Jane Doe");
    assert_eq!(cv.work_experience.len(), 1);
    assert_eq!(cv.work_experience[0].title, "Senior Software Engineer");
    assert_eq!(cv.work_experience[0].responsibilities.len(), 3);
    assert!(cv.profile.starts_with("Backend engineer"));
}

#[tokio::test]
async fn test_import_store_and_render() {
    let dir = TempDir::new().unwrap();
    let mut manager = InputManager::new();
    let outcome = manager
        .import_cv(Path::new("tests/fixtures/sample_cv.txt"), &CvParser::default())
        .await
        .unwrap();

    let mut store = FileProfileStore::open(dir.path().join("profiles")).unwrap();
    let meta = store.save("Jane Doe", &outcome.data).unwrap();
    let loaded = store.load(&meta.id).unwrap();
    assert_eq!(loaded, outcome.data);

    let html = render(&loaded, TemplateId::Modern, &[SectionKey::Education, SectionKey::Experience]).unwrap();
    let education = html.find("<h2>Education</h2>").unwrap();
    let experience = html.find("<h2>Work Experience</h2>").unwrap();
    assert!(education < experience);
    assert!(!html.contains("<h2>Profile</h2>"));
}

#[tokio::test]
async fn test_reports_for_every_format() {
    let mut manager = InputManager::new();
    let outcome = manager
        .import_cv(Path::new("tests/fixtures/sample_cv.txt"), &CvParser::default())
        .await
        .unwrap();

    let generator = ReportGenerator::with_options(false, true, true, TemplateId::Classic, SectionKey::ALL.to_vec());
    for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Html] {
        let report = generator.generate_report(&outcome, format).unwrap();
        assert!(report.contains("Jane Doe"), "{:?} report lost the name", format);
    }
}

#[test]
fn test_config_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cv-importer").join("config.toml");

    let created = Config::load_from(&path).unwrap();
    assert!(path.exists());
    assert_eq!(created, Config::default());

    let mut config = created;
    config.set("output.format", "json").unwrap();
    config.set("parser.profile_max_chars", "200").unwrap();
    config.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.output.format, OutputFormat::Json);
    assert_eq!(reloaded.parser.profile_max_chars, 200);
}
