use jsonrpc::{JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, WireCall};
use serde_json::json;

#[test]
fn batch_serializes_as_array_in_order() {
    let batch = vec![
        WireCall::Request(JsonRpcRequest::new("/test", Some(json!([])), 1)),
        WireCall::Notification(JsonRpcNotification::new("/test", None)),
        WireCall::Request(JsonRpcRequest::new("/test", Some(json!({"asdasd": "test"})), 3)),
    ];

    let value = serde_json::to_value(&batch).expect("serialize batch");

    assert_eq!(
        value,
        json!([
            {"jsonrpc": "2.0", "method": "/test", "params": [], "id": 1},
            {"jsonrpc": "2.0", "method": "/test"},
            {"jsonrpc": "2.0", "method": "/test", "params": {"asdasd": "test"}, "id": 3}
        ])
    );
}

#[test]
fn responses_parse_from_server_body() {
    let body = r#"[
        {"jsonrpc": "2.0", "id": 1, "result": null},
        {"jsonrpc": "2.0", "id": 3, "error": {"code": -32602, "message": "Invalid data received"}}
    ]"#;
    let raw: Vec<serde_json::Value> = serde_json::from_str(body).expect("json body");

    let parsed: Vec<JsonRpcResponse> = raw
        .iter()
        .map(JsonRpcResponse::from_value)
        .collect::<Result<_, _>>()
        .expect("valid responses");

    assert!(parsed[0].is_successful());
    assert!(!parsed[1].is_successful());
}
