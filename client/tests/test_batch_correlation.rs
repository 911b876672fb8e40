use std::sync::Arc;

use client::{ClientError, FailureCause, JsonRpcClient, ResponseCollection};
use jsonrpc::{
    GenericCall, JsonRpcError, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, RequestId,
    ResponseParseError, RpcCall, SequentialIdGenerator,
};
use serde_json::json;
use transport::mock::MockHttpClient;
use transport::HttpResponse;

fn combo_responses() -> String {
    serde_json::to_string_pretty(&json!([
        {"jsonrpc": "2.0", "id": 1, "result": null},
        // noop for 2
        {
            "jsonrpc": "2.0",
            "id": 3,
            "error": {
                "code": JsonRpcError::INVALID_PARAMS,
                "message": "Invalid data received",
                "data": {"asdasd": "test"}
            }
        }
    ]))
    .expect("encode responses")
}

fn combo_calls() -> Vec<RpcCall> {
    vec![
        JsonRpcRequest::new("/test", Some(json!([])), 1).into(),
        JsonRpcNotification::new("/test", None).into(),
        JsonRpcRequest::new("/test", Some(json!({"asdasd": "test"})), 3).into(),
    ]
}

async fn invoke_with(response: HttpResponse, calls: Vec<RpcCall>) -> client::Result<ResponseCollection> {
    let mut http = MockHttpClient::new();
    http.push(response);
    let mut client = JsonRpcClient::new(http, "/");
    client.invoke(calls).await
}

#[tokio::test]
async fn batch_responses_are_correlated_with_calls() {
    let collection = invoke_with(HttpResponse::ok(combo_responses()), combo_calls())
        .await
        .expect("invoke succeeds");
    let tickets = collection.tickets();

    let response1 = collection.get_response(tickets[0]).expect("response 1");
    let response2 = collection.get_response(tickets[1]).expect("response 2");
    let response3 = collection.get_response(tickets[2]).expect("response 3");

    assert!(response1.is_successful());
    assert!(response2.is_successful());
    assert!(!response3.is_successful());
    assert_eq!(response3.error().map(|e| e.code), Some(JsonRpcError::INVALID_PARAMS));

    // notifications are not iterated
    assert_eq!(collection.len(), 2);
    let ids: Vec<_> = collection.iter().filter_map(|r| r.id().cloned()).collect();
    assert_eq!(ids, vec![RequestId::Number(1), RequestId::Number(3)]);
}

#[tokio::test]
async fn repeated_lookup_returns_same_response() {
    let collection = invoke_with(HttpResponse::ok(combo_responses()), combo_calls())
        .await
        .expect("invoke succeeds");
    let ticket = collection.ticket(0).expect("ticket");

    let first = collection.get_response(ticket).expect("first");
    let second = collection.get_response(ticket).expect("second");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*first, JsonRpcResponse::Success { id: RequestId::Number(1), result: json!(null) });
}

#[tokio::test]
async fn single_call_without_matching_response_is_not_responded() {
    let body = r#"{"jsonrpc": "2.0", "id": 99, "result": 1}"#;
    let calls = vec![JsonRpcRequest::new("lonely", None, 1).into()];
    let collection = invoke_with(HttpResponse::ok(body), calls).await.expect("invoke succeeds");

    let err = collection.get_response(collection.tickets()[0]).expect_err("no response for id 1");
    assert!(matches!(err, ClientError::NotResponded { ref method, .. } if method == "lonely"));
}

#[tokio::test]
async fn notifications_resolve_regardless_of_server_output() {
    let body = r#"[{"jsonrpc": "2.0", "id": 5, "result": "unrelated"}]"#;
    let calls = vec![JsonRpcNotification::new("fire", Some(json!(["and", "forget"]))).into()];
    let collection = invoke_with(HttpResponse::ok(body), calls).await.expect("invoke succeeds");

    let response = collection.get_response(collection.tickets()[0]).expect("notification");
    assert_eq!(*response, JsonRpcResponse::Notification);
    assert_eq!(collection.len(), 1);
}

#[tokio::test]
async fn only_notifications_with_empty_body() {
    let calls = vec![
        JsonRpcNotification::new("a", None).into(),
        JsonRpcNotification::new("b", None).into(),
    ];
    let collection = invoke_with(HttpResponse::ok(""), calls).await.expect("invoke succeeds");

    assert!(collection.is_empty());
    assert_eq!(collection.iter().count(), 0);
    for ticket in collection.tickets() {
        assert!(collection.get_response(ticket).expect("resolves").is_successful());
    }
}

#[tokio::test]
async fn ticket_from_other_invocation_is_out_of_bounds() {
    let first = invoke_with(HttpResponse::ok(combo_responses()), combo_calls())
        .await
        .expect("first invoke");
    let second = invoke_with(HttpResponse::ok(combo_responses()), combo_calls())
        .await
        .expect("second invoke");

    let err = second.get_response(first.tickets()[0]).expect_err("foreign ticket");
    assert!(matches!(err, ClientError::OutOfBounds(_)));
}

#[tokio::test]
async fn non_200_status_fails_the_invocation() {
    for status in [201, 404, 500] {
        let err = invoke_with(HttpResponse::new(status, combo_responses()), combo_calls())
            .await
            .expect_err("non-200 status");

        match err {
            ClientError::RemoteCallFailed(FailureCause::Status(s)) => assert_eq!(s, status),
            other => panic!("expected status failure, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn status_is_checked_before_the_body_is_parsed() {
    let page = "<html><body><h1>500 Internal Server Error</h1></body></html>";
    let err = invoke_with(HttpResponse::new(500, page), combo_calls())
        .await
        .expect_err("error page");

    match err {
        ClientError::RemoteCallFailed(FailureCause::Status(500)) => {}
        other => panic!("expected status failure, got {:?}", other),
    }
}

#[tokio::test]
async fn garbage_body_fails_the_invocation() {
    let err = invoke_with(HttpResponse::ok("not json at all"), combo_calls())
        .await
        .expect_err("garbage body");

    assert!(matches!(
        err,
        ClientError::RemoteCallFailed(FailureCause::Parse(ResponseParseError::NotAJsonResponse(_)))
    ));
}

#[tokio::test]
async fn exactly_one_request_per_invoke() {
    let mut http = MockHttpClient::new();
    http.push(HttpResponse::ok(r#"{"jsonrpc":"2.0","id":1,"result":1}"#))
        .push(HttpResponse::new(503, ""));
    let ids = Arc::new(SequentialIdGenerator::default());
    let mut client = JsonRpcClient::with_id_generator(http, "/", ids);

    client.invoke(GenericCall::new("first", None)).await.expect("first invoke");
    assert_eq!(client.http_client().requests().len(), 1);

    client.invoke(GenericCall::new("second", None)).await.expect_err("503 is not retried");
    assert_eq!(client.http_client().requests().len(), 2);
}
