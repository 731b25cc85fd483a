//! End-to-end resolution over an in-memory frame tree and transport

use super::test_utils::{map, API_URL, CLIENT_ORIGIN, LMS_ORIGIN, VIA_ORIGIN};
use frameconf::frame::FrameTree;
use frameconf::{
    ConfigMap, ConfigResolver, FixedApiUrl, MemoryTransport, ResolveError, RpcError,
    StaticFrame, StaticHostConfig,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// lms (level 0) -> reader (level 1) -> sidebar (level 2)
fn lms_tree() -> Arc<FrameTree> {
    FrameTree::nested(&[
        ("lms", LMS_ORIGIN),
        ("reader", VIA_ORIGIN),
        ("sidebar", CLIENT_ORIGIN),
    ])
}

fn resolver(
    client: StaticFrame,
    host: Value,
    transport: Arc<MemoryTransport>,
) -> ConfigResolver<StaticFrame, StaticHostConfig, FixedApiUrl, Arc<MemoryTransport>> {
    ConfigResolver::new(
        client,
        StaticHostConfig(map(host)),
        FixedApiUrl(API_URL.to_string()),
        transport,
    )
}

fn frame(tree: &Arc<FrameTree>, name: &str) -> StaticFrame {
    tree.find(name).unwrap()
}

#[tokio::test]
async fn test_explicit_level_fetches_from_lms() {
    let tree = lms_tree();
    let transport = Arc::new(MemoryTransport::new());
    transport.serve_config(
        &frame(&tree, "lms"),
        map(json!({ "services": [{ "grantToken": "secret" }], "openSidebar": true })),
        Duration::ZERO,
    );

    let resolver = resolver(
        tree.innermost(),
        json!({
            "openSidebar": false,
            "requestConfigFromFrame": { "origin": LMS_ORIGIN, "ancestorLevel": 0 }
        }),
        transport,
    );

    let merged = resolver
        .resolve(&map(json!({ "appType": "via" })))
        .await
        .unwrap();
    assert_eq!(merged["appType"], json!("via"));
    assert_eq!(merged["openSidebar"], json!(true));
    assert_eq!(merged["services"], json!([{ "grantToken": "secret" }]));
    assert_eq!(merged["apiUrl"], json!(API_URL));
}

#[tokio::test(start_paused = true)]
async fn test_explicit_level_with_wrong_origin_times_out() {
    let tree = lms_tree();
    let transport = Arc::new(MemoryTransport::new());
    transport.serve_config(&frame(&tree, "reader"), ConfigMap::new(), Duration::ZERO);

    // Level 1 is the reader, which is not served from the LMS origin
    let resolver = resolver(
        tree.innermost(),
        json!({ "requestConfigFromFrame": { "origin": LMS_ORIGIN, "ancestorLevel": 1 } }),
        transport,
    );

    let err = resolver.resolve(&ConfigMap::new()).await.unwrap_err();
    assert_eq!(
        err,
        ResolveError::Remote(RpcError::Timeout {
            method: "requestConfig".to_string(),
            timeout_ms: 3000,
        })
    );
    assert_eq!(err.to_string(), "Request `requestConfig` timed out after 3000ms");
}

#[tokio::test]
async fn test_remote_error_reaches_caller_verbatim() {
    let tree = lms_tree();
    let transport = Arc::new(MemoryTransport::new());
    transport.serve(&frame(&tree, "lms"), |_method, _params| {
        Err(RpcError::Remote("Nope".to_string()))
    });

    let resolver = resolver(
        tree.innermost(),
        json!({ "requestConfigFromFrame": { "origin": LMS_ORIGIN, "ancestorLevel": 0 } }),
        transport,
    );

    let err = resolver.resolve(&ConfigMap::new()).await.unwrap_err();
    assert_eq!(err.to_string(), "Nope");
}

#[tokio::test]
async fn test_legacy_origin_finds_matching_ancestor() {
    let tree = lms_tree();
    let transport = Arc::new(MemoryTransport::new());
    // Both ancestors listen, but only the LMS is served from the trusted origin.
    transport.serve_config(
        &frame(&tree, "reader"),
        map(json!({ "from": "reader" })),
        Duration::ZERO,
    );
    transport.serve_config(
        &frame(&tree, "lms"),
        map(json!({ "from": "lms" })),
        Duration::from_millis(20),
    );

    let resolver = resolver(
        tree.innermost(),
        json!({ "requestConfigFromFrame": LMS_ORIGIN }),
        transport,
    );

    let merged = resolver.resolve(&ConfigMap::new()).await.unwrap();
    assert_eq!(merged["from"], json!("lms"));
}

#[tokio::test(start_paused = true)]
async fn test_legacy_origin_first_response_wins_among_same_origin_frames() {
    let tree = FrameTree::nested(&[
        ("outer", LMS_ORIGIN),
        ("inner", LMS_ORIGIN),
        ("sidebar", CLIENT_ORIGIN),
    ]);
    let transport = Arc::new(MemoryTransport::new());
    transport.serve_config(
        &frame(&tree, "outer"),
        map(json!({ "from": "outer" })),
        Duration::from_millis(10),
    );
    transport.serve_config(
        &frame(&tree, "inner"),
        map(json!({ "from": "inner" })),
        Duration::from_millis(500),
    );

    let resolver = resolver(
        tree.innermost(),
        json!({ "requestConfigFromFrame": LMS_ORIGIN }),
        transport,
    );

    let merged = resolver.resolve(&ConfigMap::new()).await.unwrap();
    assert_eq!(merged["from"], json!("outer"));
}

#[tokio::test]
async fn test_legacy_origin_reaches_every_ancestor_when_nearest_answers_at_once() {
    let tree = FrameTree::nested(&[
        ("outer", LMS_ORIGIN),
        ("inner", LMS_ORIGIN),
        ("sidebar", CLIENT_ORIGIN),
    ]);
    let transport = Arc::new(MemoryTransport::new());
    let asked: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    for name in ["outer", "inner"] {
        let asked = Arc::clone(&asked);
        transport.serve(&frame(&tree, name), move |_method, _params| {
            asked.lock().push(name.to_string());
            Ok(json!({ "from": name }))
        });
    }

    let resolver = resolver(
        tree.innermost(),
        json!({ "requestConfigFromFrame": LMS_ORIGIN }),
        transport,
    );

    let merged = resolver.resolve(&ConfigMap::new()).await.unwrap();
    assert_eq!(merged["from"], json!("inner"));
    assert_eq!(*asked.lock(), vec!["inner", "outer"]);
}

#[tokio::test(start_paused = true)]
async fn test_legacy_origin_without_match_times_out() {
    let tree = lms_tree();
    let transport = Arc::new(MemoryTransport::new());
    transport.serve_config(&frame(&tree, "reader"), ConfigMap::new(), Duration::ZERO);

    let resolver = resolver(
        tree.innermost(),
        json!({ "requestConfigFromFrame": "https://unknown.example" }),
        transport,
    );

    let err = resolver.resolve(&ConfigMap::new()).await.unwrap_err();
    assert!(matches!(err, ResolveError::Remote(RpcError::Timeout { .. })));
}

#[tokio::test]
async fn test_legacy_origin_in_top_frame() {
    let tree = lms_tree();
    let transport = Arc::new(MemoryTransport::new());
    let resolver = resolver(
        tree.innermost(),
        json!({ "requestConfigFromFrame": LMS_ORIGIN }),
        transport,
    );

    let err = resolver
        .resolve_from(&ConfigMap::new(), &frame(&tree, "lms"))
        .await
        .unwrap_err();
    assert_eq!(err, ResolveError::TopFrame);
}

#[tokio::test]
async fn test_concurrent_resolutions_are_independent() {
    let tree = lms_tree();
    let transport = Arc::new(MemoryTransport::new());
    transport.serve_config(
        &frame(&tree, "lms"),
        map(json!({ "from": "lms" })),
        Duration::from_millis(5),
    );
    transport.serve_config(
        &frame(&tree, "reader"),
        map(json!({ "from": "reader" })),
        Duration::ZERO,
    );

    let to_lms = resolver(
        tree.innermost(),
        json!({ "requestConfigFromFrame": { "origin": LMS_ORIGIN, "ancestorLevel": 0 } }),
        Arc::clone(&transport),
    );
    let to_reader = resolver(
        tree.innermost(),
        json!({ "requestConfigFromFrame": { "origin": VIA_ORIGIN, "ancestorLevel": 1 } }),
        Arc::clone(&transport),
    );

    let app = ConfigMap::new();
    let (a, b) = tokio::join!(to_lms.resolve(&app), to_reader.resolve(&app));
    assert_eq!(a.unwrap()["from"], json!("lms"));
    assert_eq!(b.unwrap()["from"], json!("reader"));
}
