use mockito::Server;
use reqwest::Client;
use rest_retry::{
    Exhaustion, HttpRestClient, Logger, RestClient, RestError, RetryPolicy, RetryingClient,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct RecordingLogger {
    messages: Mutex<Vec<String>>,
}

impl RecordingLogger {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Logger for RecordingLogger {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
struct Todo {
    id: i64,
    title: String,
}

fn retrying(
    base_url: &str,
    policy: RetryPolicy,
) -> (RetryingClient<HttpRestClient, Arc<RecordingLogger>>, Arc<RecordingLogger>) {
    let logger = Arc::new(RecordingLogger::default());
    let client = RetryingClient::with_policy(
        HttpRestClient::new(Client::new(), base_url),
        logger.clone(),
        policy,
    );
    (client, logger)
}

fn fast_policy() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(10)).unwrap()
}

#[test_log::test(tokio::test)]
async fn test_success_makes_single_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/todos/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 1, "title": "write tests"}"#)
        .expect(1)
        .create_async()
        .await;

    let (client, logger) = retrying(&server.url(), fast_policy());
    let todo: Todo = client.get("todos/1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(todo.title, "write tests");
    assert!(logger.messages().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_server_errors_exhaust_to_default() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/todos/1")
        .with_status(503)
        .expect(3)
        .create_async()
        .await;

    let (client, logger) = retrying(&server.url(), fast_policy());
    let todo: Todo = client.get("todos/1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(todo, Todo::default());
    assert_eq!(logger.messages().len(), 3);
    assert!(logger.messages()[0].contains("503"));
}

#[test_log::test(tokio::test)]
async fn test_client_error_aborts_without_retry() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/todos")
        .with_status(400)
        .expect(1)
        .create_async()
        .await;

    let (client, logger) = retrying(&server.url(), fast_policy());
    let todo = Todo {
        id: 0,
        title: "invalid".to_string(),
    };
    let err = client.post("todos", &todo).await.unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.to_string(), "Failed to insert data after 3 attempts");
    assert!(logger.messages().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_delete_by_id() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/123")
        .with_status(200)
        .with_body(r#"{"id": 123, "title": "gone"}"#)
        .expect(1)
        .create_async()
        .await;

    let (client, logger) = retrying(&server.url(), fast_policy());
    let todo: Todo = client.delete(123).await.unwrap();

    mock.assert_async().await;
    assert_eq!(todo.id, 123);
    assert!(logger.messages().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_unreachable_host_fails_when_configured() {
    // Nothing listens on port 1.
    let policy = fast_policy().with_exhaustion(Exhaustion::Fail);
    let (client, logger) = retrying("http://127.0.0.1:1", policy);

    let err = client.get::<Todo>("todos/1").await.unwrap_err();

    assert!(matches!(err, RestError::Exhausted { attempts: 3, .. }));
    assert_eq!(logger.messages().len(), 3);
}
