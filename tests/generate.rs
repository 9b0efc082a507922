use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use postpage_rs::commands::generate::output_path;
use postpage_rs::config::SiteConfig;
use postpage_rs::store::FileStore;
use postpage_rs::Site;

fn site_in(dir: &Path) -> Site {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let store = FileStore::open(fixtures.join("dataset.json")).unwrap();
    Site::with_store(dir, SiteConfig::default(), Arc::new(store))
}

#[tokio::test]
async fn generate_writes_every_post_and_404() {
    let dir = tempfile::tempdir().unwrap();
    let site = site_in(dir.path());

    site.generate().await.unwrap();

    let engine = output_path(&site, "analytical-engine");
    assert_eq!(engine, dir.path().join("public/post/analytical-engine/index.html"));
    let html = fs::read_to_string(&engine).unwrap();
    assert!(html.contains("Notes on the Analytical Engine"));
    // static output starts with the panel closed
    assert!(html.contains(r#"aria-hidden="true""#));

    assert!(output_path(&site, "quiet").exists());
    assert!(dir.path().join("public/404.html").exists());
}

#[tokio::test]
async fn generate_stays_inside_public_dir() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("site");
    let post = |id: &str, slug: &str| {
        json!({ "_id": id, "_type": "post", "_createdAt": "2022-01-01T00:00:00Z",
                "title": id, "slug": { "current": slug } })
    };
    let store = FileStore::from_documents(vec![
        post("escape", "../../../escaped"),
        post("nested", "a/b"),
        post("kept", "kept"),
    ]);
    let site = Site::with_store(&base, SiteConfig::default(), Arc::new(store));

    site.generate().await.unwrap();

    assert!(output_path(&site, "kept").exists());
    assert!(!dir.path().join("escaped").exists());
    assert!(!base.join("escaped").exists());
    assert!(!site.public_dir.join("post/a").exists());

    // everything written lives under public_dir
    site.clean().unwrap();
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec!["site"]);
}

#[tokio::test]
async fn clean_after_generate() {
    let dir = tempfile::tempdir().unwrap();
    let site = site_in(dir.path());

    site.generate().await.unwrap();
    assert!(site.public_dir.exists());
    site.clean().unwrap();
    assert!(!site.public_dir.exists());
}

#[test]
fn site_new_reads_config_and_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    fs::copy(fixtures.join("dataset.json"), dir.path().join("posts.json")).unwrap();
    fs::write(
        dir.path().join("_config.yml"),
        "title: Engines\nstore:\n  backend: file\n  file: posts.json\n",
    )
    .unwrap();

    let site = Site::new(dir.path()).unwrap();
    assert_eq!(site.config.title, "Engines");
    assert_eq!(site.public_dir, dir.path().join("public"));
}
