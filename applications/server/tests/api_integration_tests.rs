/// API integration tests
/// Tests complete HTTP request/response cycles with a real database
mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{body_bytes, body_json, Part, TestApp};

// ===== Health =====

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.get("/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

// ===== Playlist =====

#[tokio::test]
async fn test_empty_playlist() {
    let app = TestApp::new().await;

    let response = app.get("/api/songs").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_playlist_ordered_by_title() {
    let app = TestApp::new().await;
    let response = app
        .upload(&[
            Part::file("Zebra.mp3", "audio/mpeg", b"z"),
            Part::file("Alpha.ogg", "audio/ogg", b"a"),
            Part::file("Middle.flac", "audio/flac", b"m"),
        ])
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let songs = body_json(app.get("/api/songs").await).await;
    let titles: Vec<&str> = songs
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Alpha", "Middle", "Zebra"]);
}

// ===== Upload =====

#[tokio::test]
async fn test_upload_keeps_audio_and_skips_other_files() {
    let app = TestApp::new().await;

    let response = app
        .upload(&[
            Part::file("track1.mp3", "audio/mpeg", b"ID3 fake audio"),
            Part::file("notes.txt", "text/plain", b"liner notes"),
        ])
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Files uploaded and processed successfully.");
    assert_eq!(json["inserted"], 1);
    assert_eq!(json["skipped"], 1);
    assert_eq!(json["failed"], 0);

    let songs = body_json(app.get("/api/songs").await).await;
    let songs = songs.as_array().unwrap();
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0]["title"], "track1");
    assert_eq!(songs[0]["artist"], "Unknown Artist");
    assert_eq!(
        songs[0]["albumArtUrl"],
        "https://picsum.photos/seed/default-art/500/500"
    );
    assert_eq!(songs[0]["audioUrl"], "/uploads/track1.mp3");

    assert!(app.uploads_dir.join("track1.mp3").is_file());
    assert!(!app.uploads_dir.join("notes.txt").exists());
}

#[tokio::test]
async fn test_duplicate_upload_is_ignored() {
    let app = TestApp::new().await;
    let parts = [Part::file("track1.mp3", "audio/mpeg", b"ID3 fake audio")];

    let first = app.upload(&parts).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(body_json(first).await["inserted"], 1);

    let second = app.upload(&parts).await;
    assert_eq!(second.status(), StatusCode::CREATED);
    let json = body_json(second).await;
    assert_eq!(json["inserted"], 0);
    assert_eq!(json["duplicates"], 1);

    assert_eq!(app.store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_upload_without_files_is_rejected() {
    let app = TestApp::new().await;

    let response = app.upload(&[Part::text("comment", "nothing here")]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "No files were uploaded." })
    );
}

#[tokio::test]
async fn test_non_multipart_upload_is_rejected() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No files were uploaded.");
}

#[tokio::test]
async fn test_upload_guesses_type_from_extension() {
    let app = TestApp::new().await;

    let response = app
        .upload(&[
            Part::file("song.m4a", "application/octet-stream", b"m4a"),
            Part::untyped_file("other.wav", b"RIFF"),
            Part::untyped_file("cover.jpg", b"JFIF"),
        ])
        .await;

    let json = body_json(response).await;
    assert_eq!(json["inserted"], 2);
    assert_eq!(json["skipped"], 1);
}

#[tokio::test]
async fn test_upload_strips_directories_from_file_name() {
    let app = TestApp::new().await;

    let response = app
        .upload(&[Part::file("../../escape.mp3", "audio/mpeg", b"x")])
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    assert!(app.uploads_dir.join("escape.mp3").is_file());
    let songs = body_json(app.get("/api/songs").await).await;
    assert_eq!(songs[0]["audioUrl"], "/uploads/escape.mp3");
    assert_eq!(songs[0]["title"], "escape");
}

#[tokio::test]
async fn test_failed_file_does_not_fail_the_batch() {
    let app = TestApp::new().await;

    // ".." has no usable file name, so storing it fails
    let response = app
        .upload(&[
            Part::file("..", "audio/mpeg", b"bad"),
            Part::file("good.mp3", "audio/mpeg", b"ID3 good"),
        ])
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Files uploaded and processed successfully.");
    assert_eq!(json["inserted"], 1);
    assert_eq!(json["failed"], 1);
    assert_eq!(json["skipped"], 0);

    let songs = body_json(app.get("/api/songs").await).await;
    assert_eq!(songs.as_array().unwrap().len(), 1);
    assert_eq!(songs[0]["title"], "good");
}

#[tokio::test]
async fn test_upload_over_limit_is_rejected() {
    let app = TestApp::with_config(|config| config.storage.max_upload_bytes = 256).await;

    let response = app
        .upload(&[Part::file("big.mp3", "audio/mpeg", &[0u8; 1024])])
        .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.store.count().await.unwrap(), 0);
}

// ===== Static files =====

#[tokio::test]
async fn test_uploaded_file_is_served() {
    let app = TestApp::new().await;
    let uploaded = app
        .upload(&[Part::file("track1.mp3", "audio/mpeg", b"ID3 fake audio")])
        .await;
    assert_eq!(uploaded.status(), StatusCode::CREATED);

    let response = app.get("/uploads/track1.mp3").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    assert_eq!(body_bytes(response).await, b"ID3 fake audio");
}

#[tokio::test]
async fn test_file_name_with_url_delimiters_is_served_at_its_audio_url() {
    let app = TestApp::new().await;
    let uploaded = app
        .upload(&[
            Part::file("Track #1.mp3", "audio/mpeg", b"hash"),
            Part::file("What?.mp3", "audio/mpeg", b"question"),
            Part::file("100% Pure.mp3", "audio/mpeg", b"percent"),
        ])
        .await;
    assert_eq!(body_json(uploaded).await["inserted"], 3);

    let songs = body_json(app.get("/api/songs").await).await;
    let songs = songs.as_array().unwrap();
    let urls: Vec<&str> = songs
        .iter()
        .map(|s| s["audioUrl"].as_str().unwrap())
        .collect();
    assert_eq!(
        urls,
        vec![
            "/uploads/100%25%20Pure.mp3",
            "/uploads/Track%20%231.mp3",
            "/uploads/What%3F.mp3",
        ]
    );
    assert_eq!(songs[1]["title"], "Track #1");

    for (url, expected) in urls.iter().zip([&b"percent"[..], b"hash", b"question"]) {
        let response = app.get(url).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", url);
        assert_eq!(body_bytes(response).await, expected);
    }
}

#[tokio::test]
async fn test_missing_upload_is_not_found() {
    let app = TestApp::new().await;

    let response = app.get("/uploads/missing.mp3").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
