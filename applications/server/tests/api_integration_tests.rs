/// API integration tests
/// Tests complete HTTP request/response cycles against a temp media tree
mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new();

    let (status, body) = app.get_json("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn empty_images_tree_serves_placeholder() {
    let app = TestApp::new();

    let (status, body) = app.get_json("/api/slides").await;

    assert_eq!(status, StatusCode::OK);
    let slides = body.as_array().unwrap();
    assert_eq!(slides.len(), 1);
    assert_eq!(
        slides[0]["caption"],
        "Add folders with images to static/images."
    );
    assert_eq!(slides[0]["title"], "No Photos Found");
    assert_ne!(slides[0]["is_transition"], json!(true));
}

#[tokio::test]
async fn slides_follow_the_folder_tree() {
    let app = TestApp::new();
    app.write("static/images/b Summer/beach.jpg", "jpeg");
    app.write("static/images/a Spring/Blossom.PNG", "png");
    app.write("static/images/a Spring/apple.jpg", "jpeg");
    app.write("static/images/a Spring/apple.txt", "  First apple  \n");
    app.write("static/images/a Spring/description.txt", "Early days");

    let (status, body) = app.get_json("/api/slides").await;
    assert_eq!(status, StatusCode::OK);

    let slides = body.as_array().unwrap();
    assert_eq!(slides.len(), 5);

    assert_eq!(slides[0]["is_transition"], true);
    assert_eq!(slides[0]["source_folder"], "a Spring");
    assert_eq!(slides[0]["folder_description"], "Early days");

    assert_eq!(slides[1]["image"], "images/a Spring/apple.jpg");
    assert_eq!(slides[1]["caption"], "First apple");
    assert_eq!(slides[2]["image"], "images/a Spring/Blossom.PNG");

    assert_eq!(slides[3]["source_folder"], "b Summer");
    assert_eq!(slides[4]["image"], "images/b Summer/beach.jpg");
}

#[tokio::test]
async fn slides_are_rebuilt_per_request() {
    let app = TestApp::new();

    let (_, before) = app.get_json("/api/slides").await;
    assert_eq!(before.as_array().unwrap().len(), 1);

    app.write("static/images/trip/one.webp", "webp");

    let (_, after) = app.get_json("/api/slides").await;
    let slides = after.as_array().unwrap();
    assert_eq!(slides.len(), 2);
    assert_eq!(slides[1]["image"], "images/trip/one.webp");
}

#[tokio::test]
async fn audio_track_resolves_first_file() {
    let app = TestApp::new();

    let (status, body) = app.get_json("/api/audio").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "track": null }));

    app.write("static/audio/notes.txt", "not audio");
    app.write("static/audio/Theme.ogg", "ogg");
    app.write("static/audio/ambient.mp3", "mp3");

    let (_, body) = app.get_json("/api/audio").await;
    assert_eq!(body, json!({ "track": "audio/ambient.mp3" }));
}

#[tokio::test]
async fn static_media_is_served() {
    let app = TestApp::new();
    app.write("static/images/trip/one.jpg", "jpeg-bytes");

    let (status, body) = app.get("/static/images/trip/one.jpg").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"jpeg-bytes");

    let (status, _) = app.get("/static/images/trip/missing.jpg").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_paths_fall_back_to_index() {
    let app = TestApp::new();
    app.write("web/index.html", "<html>keepsake</html>");
    app.write("web/app.js", "console.log('hi')");

    let (status, body) = app.get("/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"console.log('hi')");

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<html>keepsake</html>");

    let (status, body) = app.get("/letter").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<html>keepsake</html>");
}

#[tokio::test]
async fn missing_web_dir_is_not_found() {
    let app = TestApp::new();

    let (status, _) = app.get("/anything").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
