use std::fs;
use std::path::{Path, PathBuf};

use docweave_core::{Document, KnownDocumentRegistry, convert};

#[test]
fn golden_fixtures() -> Result<(), Box<dyn std::error::Error>> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let fixtures_dir = root.join("tests/fixtures");
    let expect_dir = root.join("tests/expect");

    let known = KnownDocumentRegistry::from_json(&fs::read_to_string(
        fixtures_dir.join("known_documents.json"),
    )?)?;

    let mut fixtures = collect_fixtures(&fixtures_dir)?;
    fixtures.sort_by(|a, b| file_name(a).cmp(&file_name(b)));

    for fixture in fixtures {
        let name = file_stem(&fixture)?;
        if name == "known_documents" {
            continue;
        }
        let document = Document::from_json(&fs::read_to_string(&fixture)?)?;
        let html = convert(&document, &known);
        let expected = fs::read_to_string(expect_dir.join(format!("{}.html", name)))?;
        assert_eq!(
            html.trim_end(),
            expected.trim_end(),
            "HTML mismatch for fixture {}",
            name
        );
    }

    Ok(())
}

fn collect_fixtures(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut fixtures = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            fixtures.push(path);
        }
    }
    Ok(fixtures)
}

fn file_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("")
}

fn file_stem(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|value| value.to_string())
        .ok_or_else(|| "fixture name is not valid UTF-8".into())
}
