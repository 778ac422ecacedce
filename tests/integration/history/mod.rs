//! Conversation history persistence integration tests

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use chatbridge_conversations::{
    ConversationStore, HistoryRepository, InMemoryHistoryRepository, Message, MessageRole,
};

use crate::common::{message_request, plain_request, TestApp};

#[tokio::test]
async fn test_history_survives_restart() {
    let repository: Arc<dyn HistoryRepository> = Arc::new(InMemoryHistoryRepository::new());

    let first = TestApp::with_repository(repository.clone());
    let cookie = first.login("user-1").await;
    first
        .send(message_request("/chat", Some(&cookie), "hello there"))
        .await;
    first
        .send(message_request("/chat", Some(&cookie), "draw a cat"))
        .await;
    let before = first.state.store.history("user-1").await;
    assert_eq!(before.len(), 4);

    // A new process has no sessions and no in-memory history
    let second = TestApp::with_repository(repository);
    let stale = second
        .send(plain_request(Method::GET, "/chat", Some(&cookie)))
        .await;
    assert_eq!(stale.status(), StatusCode::SEE_OTHER);
    assert!(second.state.store.history("user-1").await.is_empty());

    second.login("user-1").await;
    assert_eq!(second.state.store.history("user-1").await, before);
}

#[tokio::test]
async fn test_restored_history_is_replayed_to_the_model() {
    let repository: Arc<dyn HistoryRepository> = Arc::new(InMemoryHistoryRepository::new());
    repository
        .save(
            "user-1",
            &[Message::user("my name is Ada"), Message::assistant("Hi Ada")],
        )
        .await
        .unwrap();

    let app = TestApp::with_repository(repository);
    let cookie = app.login("user-1").await;
    app.send(message_request("/chat", Some(&cookie), "what is my name?"))
        .await;

    let requests = app.llm.requests();
    assert_eq!(requests.len(), 1);
    let contents: Vec<&str> = requests[0]
        .messages
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(contents, vec!["my name is Ada", "Hi Ada", "what is my name?"]);
}

#[tokio::test]
async fn test_restore_unknown_user_is_empty() {
    let store = ConversationStore::new(Arc::new(InMemoryHistoryRepository::new()));
    assert!(store.restore("never-seen").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_append_persist_restore_preserves_order() {
    let repository = Arc::new(InMemoryHistoryRepository::new());
    let store = ConversationStore::new(repository.clone());

    let turns = [
        (MessageRole::User, "one"),
        (MessageRole::Assistant, "two"),
        (MessageRole::User, "three"),
        (MessageRole::Assistant, "four"),
    ];
    for (role, content) in turns {
        store.append("user-1", role, content).await;
    }
    store.persist("user-1").await.unwrap();

    let restored = ConversationStore::new(repository)
        .restore("user-1")
        .await
        .unwrap();
    let expected: Vec<Message> = turns
        .iter()
        .map(|(role, content)| Message::new(*role, *content))
        .collect();
    assert_eq!(restored, expected);
}

/// Requires a PostgreSQL instance at `TEST_DATABASE_URL`
#[tokio::test]
#[ignore]
async fn test_postgres_history_round_trip() {
    let config = crate::common::TestConfig::from_env();
    let database_url = config
        .database_url
        .expect("TEST_DATABASE_URL must be set for this test");

    let repository = chatbridge_app::history_repository(Some(&database_url))
        .await
        .unwrap();

    let user_id = format!("pg-test-{}", chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0));
    assert!(repository.load(&user_id).await.unwrap().is_none());

    repository
        .save(&user_id, &[Message::user("그림 그려줘")])
        .await
        .unwrap();
    repository
        .save(
            &user_id,
            &[
                Message::user("그림 그려줘"),
                Message::assistant("이미지를 생성했습니다."),
            ],
        )
        .await
        .unwrap();

    let loaded = repository.load(&user_id).await.unwrap().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[1].role, MessageRole::Assistant);

    let pool = sqlx::PgPool::connect(&database_url).await.unwrap();
    sqlx::query("DELETE FROM conversation_histories WHERE user_id = $1")
        .bind(&user_id)
        .execute(&pool)
        .await
        .unwrap();
}
