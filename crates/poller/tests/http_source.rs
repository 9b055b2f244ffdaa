use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{TimeZone, Utc};
use domain::{Cursor, WorkId};
use poller::{FetchError, HttpSource, UpdateSource};
use serde_json::json;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn forwards_work_id_and_cursor_then_decodes_batch() {
    let seen: Arc<Mutex<Option<(i64, String)>>> = Arc::default();
    let seen_in_handler = seen.clone();

    let app = Router::new().route(
        "/forum/api/updates/:id/",
        get(
            move |Path(id): Path<i64>, Query(params): Query<HashMap<String, String>>| {
                let seen = seen_in_handler.clone();
                async move {
                    let since = params.get("since").cloned().unwrap_or_default();
                    *seen.lock().unwrap() = Some((id, since));
                    Json(json!({
                        "now": "2025-03-01T10:00:05+00:00",
                        "contributions": [{
                            "id": 5,
                            "auteur": "Alice",
                            "texte": "hi",
                            "fichier_url": null,
                            "date_post": "2025-03-01T10:00:04+00:00"
                        }],
                        "commentaires": [],
                        "reactions": []
                    }))
                }
            },
        ),
    );
    let base = serve(app).await;

    let cursor = Cursor::at(Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap());
    let source = HttpSource::new(&base, WorkId::new(5).unwrap());
    let batch = source.fetch_since(&cursor).await.unwrap();

    assert_eq!(batch.now, Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 5).unwrap());
    assert_eq!(batch.contributions.len(), 1);
    assert_eq!(batch.contributions[0].author, "Alice");

    let (id, since) = seen.lock().unwrap().clone().expect("handler not hit");
    assert_eq!(id, 5);
    assert_eq!(since, cursor.to_query_value());
}

#[tokio::test]
async fn non_2xx_is_a_status_error() {
    let app = Router::new().route(
        "/forum/api/updates/:id/",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
    );
    let base = serve(app).await;

    let source = HttpSource::new(&base, WorkId::new(1).unwrap());
    let err = source.fetch_since(&Cursor::now()).await.unwrap_err();
    assert!(matches!(err, FetchError::Status(503)));
}

#[tokio::test]
async fn garbage_body_is_a_decode_error() {
    let app = Router::new().route(
        "/forum/api/updates/:id/",
        get(|| async { "definitely not json" }),
    );
    let base = serve(app).await;

    let source = HttpSource::new(&base, WorkId::new(1).unwrap());
    let err = source.fetch_since(&Cursor::now()).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}
