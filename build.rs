use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let dist_path = Path::new(&manifest_dir).join("frontend/dist");

    if !dist_path.join("index.html").exists() {
        eprintln!("Warning: frontend/dist/index.html not found, embedding a fallback page");
        create_fallback_files(&dist_path);
    }
}

fn create_fallback_files(dist_path: &Path) {
    fs::create_dir_all(dist_path).expect("Failed to create dist directory");

    let fallback_html = r#"<!DOCTYPE html>
<html lang="km">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>%SYSTEM_NAME%</title>
    <style>
        body { font-family: 'Khmer OS Battambang', sans-serif; max-width: 600px; margin: 100px auto; text-align: center; }
        .warning { background: #fff3cd; border: 1px solid #ffeaa7; padding: 20px; border-radius: 8px; }
    </style>
</head>
<body>
    <h1>%SYSTEM_NAME%</h1>
    <div class="warning">
        <p>The dashboard frontend is missing. The JSON API is available under <code>/api/v1</code>.</p>
    </div>
</body>
</html>"#;

    fs::write(dist_path.join("index.html"), fallback_html)
        .expect("Failed to write fallback index.html");
}
