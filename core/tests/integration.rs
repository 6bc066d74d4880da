//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port on a background thread, then
//! drives `TodoApp` over real HTTP through `HttpRemote`.

use std::net::SocketAddr;

use todo_sync_core::{
    ApiError, HttpRemote, RemoteTodos, TodoApp, TodoChanges, TodoDraft, TodoForm, TodoId,
};

/// Start a mock server seeded with `todos` and return its address.
fn start_server(todos: Vec<mock_server::Todo>) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, todos).await
        })
        .unwrap();
    });

    addr
}

fn remote(addr: SocketAddr) -> HttpRemote {
    HttpRemote::new(&format!("http://{addr}/"))
}

fn fixed_date() -> String {
    "2024-06-01".to_string()
}

fn seeded(id: &str, title: &str, tags: serde_json::Value) -> mock_server::Todo {
    mock_server::Todo {
        id: id.to_string(),
        title: title.to_string(),
        completed: false,
        priority: 1,
        date: "2024-01-01".to_string(),
        due_date: "2024-01-02".to_string(),
        tags,
    }
}

#[test]
fn crud_lifecycle() {
    let addr = start_server(Vec::new());
    let mut app = TodoApp::with_clock(remote(addr), fixed_date);

    // Step 1: load an empty collection.
    app.load_all().unwrap();
    assert!(app.todos().is_empty(), "expected empty list");

    // Step 2: create.
    let id = app
        .create(TodoDraft {
            title: "Y".to_string(),
            priority: 2,
            date: "2024-01-01".to_string(),
            due_date: "2024-01-05".to_string(),
            tags: "x, y".to_string(),
        })
        .unwrap();
    assert_eq!(id, TodoId::new("1"));
    let created = app.todos().get(&id).unwrap().clone();
    assert_eq!(created.title, "Y");
    assert!(!created.completed);
    assert_eq!(created.tags, vec!["x", "y"]);

    // Step 3: toggle and reprioritize.
    app.toggle_complete(&id).unwrap();
    app.set_priority(&id, 3).unwrap();
    let updated = app.todos().get(&id).unwrap();
    assert!(updated.completed);
    assert_eq!(updated.priority, 3);
    assert_eq!(updated.title, "Y");

    // Step 4: edit through the form.
    app.start_editing(&id).unwrap();
    assert_eq!(app.form().tags, "x, y");
    app.form_mut().title = "Y renamed".to_string();
    app.submit().unwrap();
    assert!(!app.is_modal_open());
    assert_eq!(app.form(), &TodoForm::blank("2024-06-01"));

    // Step 5: a fresh load sees the same state the app holds.
    let local = app.todos().clone();
    app.load_all().unwrap();
    assert_eq!(app.todos(), &local);
    assert_eq!(app.todos().items()[0].title, "Y renamed");
    assert!(app.todos().items()[0].completed);

    // Step 6: delete.
    app.remove(&id).unwrap();
    assert!(app.todos().is_empty());

    // Step 7: delete again: NotFound, nothing changes.
    let err = app.remove(&id).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 8: reload, still empty.
    app.load_all().unwrap();
    assert!(app.todos().is_empty(), "expected empty list after delete");
}

#[test]
fn load_normalizes_malformed_tags() {
    let addr = start_server(vec![
        seeded("1", "listed", serde_json::json!(["a", "b"])),
        seeded("2", "string", serde_json::json!("a,b")),
        seeded("3", "null", serde_json::Value::Null),
        seeded("4", "number", serde_json::json!(4)),
    ]);
    let mut app = TodoApp::new(remote(addr));

    app.load_all().unwrap();
    assert_eq!(app.todos().len(), 4);
    assert_eq!(app.todos().items()[0].tags, vec!["a", "b"]);
    for item in &app.todos().items()[1..] {
        assert!(item.tags.is_empty(), "{} should have no tags", item.title);
    }
}

#[test]
fn create_with_empty_tags_sends_single_empty_tag() {
    let addr = start_server(Vec::new());
    let mut app = TodoApp::with_clock(remote(addr), fixed_date);

    app.form_mut().title = "no tags".to_string();
    let id = app.submit().unwrap();
    assert_eq!(app.todos().get(&id).unwrap().tags, vec![""]);
    assert_eq!(app.todos().get(&id).unwrap().date, "2024-06-01");
}

#[test]
fn stale_entry_survives_failed_remove_and_update() {
    let addr = start_server(vec![
        seeded("1", "A", serde_json::json!([])),
        seeded("2", "B", serde_json::json!([])),
    ]);
    let mut app = TodoApp::new(remote(addr));
    app.load_all().unwrap();

    // Someone else deletes todo 1 behind the app's back.
    remote(addr).delete(&TodoId::new("1")).unwrap();

    let before = app.todos().clone();
    let err = app.remove(&TodoId::new("1")).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
    assert_eq!(app.todos(), &before);

    let err = app
        .update(&TodoId::new("1"), &TodoChanges::completed(true))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
    assert_eq!(app.todos(), &before);
}

#[test]
fn unreachable_server_leaves_state_alone() {
    // Bind and immediately drop to get a port nobody listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let mut app = TodoApp::new(remote(addr));

    let err = app.load_all().unwrap_err();
    assert!(matches!(err, ApiError::TransportError(_)));
    assert!(app.todos().is_empty());

    let err = app.create(TodoForm::blank("2024-06-01").to_draft()).unwrap_err();
    assert!(matches!(err, ApiError::TransportError(_)));
    assert!(app.todos().is_empty());
}
