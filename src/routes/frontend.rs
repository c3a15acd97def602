//! Embedded dashboard frontend
//!
//! Serves `frontend/dist/` through rust-embed with a single-page fallback to
//! `index.html`. Files under `./frontend-custom/` override embedded ones.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::path::Path;

use crate::config::AppConfig;

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

fn extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
}

fn get_mime_type(path: &str) -> &'static str {
    match extension(path) {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

fn should_cache(path: &str) -> bool {
    matches!(
        extension(path),
        "js" | "css" | "woff" | "woff2" | "ttf" | "png" | "jpg" | "jpeg" | "svg"
    )
}

/// Fills the `%SYSTEM_NAME%` placeholder of HTML pages
fn process_html(content: &[u8], config: &AppConfig) -> Vec<u8> {
    String::from_utf8_lossy(content)
        .replace("%SYSTEM_NAME%", &config.app.system_name)
        .into_bytes()
}

fn get_file(path: &str) -> Option<Vec<u8>> {
    std::fs::read(format!("./frontend-custom/{path}"))
        .ok()
        .or_else(|| FrontendAssets::get(path).map(|f| f.data.to_vec()))
}

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    let (content, file_path) = match (path.is_empty(), get_file(path)) {
        (false, Some(content)) => (Some(content), path),
        _ => (get_file("index.html"), "index.html"),
    };

    let Some(mut data) = content else {
        return Ok(HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(
                r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>TVETMIS Dashboard</title></head>
<body>
    <h1>Frontend Not Found</h1>
    <p>The dashboard assets have not been embedded.</p>
</body>
</html>"#,
            ));
    };

    let mime = get_mime_type(file_path);
    if mime.starts_with("text/html") {
        data = process_html(&data, AppConfig::get());
    }

    let mut response = HttpResponse::Ok();
    response.content_type(mime);
    if should_cache(file_path) {
        response.insert_header(("Cache-Control", "public, max-age=31536000, immutable"));
    } else {
        response.insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"));
    }
    Ok(response.body(data))
}

/// Registered last: every path not taken by the API falls through to the frontend
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}
