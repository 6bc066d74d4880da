//! Stateless HTTP request builder and response parser for the todo
//! collection.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each remote operation is split into
//! a `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the round-trip, so
//! this module stays deterministic and free of I/O.
//!
//! Any 2xx status counts as success; hosted collection services differ on
//! whether create answers 200 or 201 and whether delete has a body.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewTodo, TodoId, TodoItem};

/// Request builder and response parser for `/todos`.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Get, self.collection_url())
    }

    pub fn build_create_todo(&self, input: &NewTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest::json(HttpMethod::Post, self.collection_url(), body))
    }

    /// Full replacement of the record at `item.id`.
    pub fn build_replace_todo(&self, item: &TodoItem) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(item).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest::json(HttpMethod::Put, self.item_url(&item.id), body))
    }

    pub fn build_delete_todo(&self, id: &TodoId) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_replace_todo(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// The body of a delete response is ignored.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn item_url(&self, id: &TodoId) -> String {
        format!("{}/todos/{}", self.base_url, urlencoding::encode(id.as_str()))
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn sample_item() -> TodoItem {
        TodoItem {
            id: TodoId::new("3"),
            title: "Call plumber".to_string(),
            completed: true,
            priority: 3,
            date: "2024-02-01".to_string(),
            due_date: "2024-02-02".to_string(),
            tags: vec!["home".to_string()],
        }
    }

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = client().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_todo_produces_correct_request() {
        let input = NewTodo {
            title: "Buy milk".to_string(),
            completed: false,
            priority: 2,
            date: "2024-01-01".to_string(),
            due_date: "2024-01-03".to_string(),
            tags: vec!["errand".to_string()],
        };
        let req = client().build_create_todo(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["completed"], false);
        assert_eq!(body["priority"], 2);
        assert_eq!(body["dueDate"], "2024-01-03");
        assert_eq!(body["tags"], serde_json::json!(["errand"]));
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_replace_todo_sends_full_record() {
        let item = sample_item();
        let req = client().build_replace_todo(&item).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:3000/todos/3");
        let body: TodoItem = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, item);
    }

    #[test]
    fn build_delete_todo_produces_correct_request() {
        let req = client().build_delete_todo(&TodoId::new("3"));
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:3000/todos/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn item_ids_are_percent_encoded() {
        let req = client().build_delete_todo(&TodoId::new("a/b c"));
        assert_eq!(req.url, "http://localhost:3000/todos/a%2Fb%20c");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/");
        assert_eq!(client.build_list_todos().url, "http://localhost:3000/todos");
    }

    #[test]
    fn parse_list_todos_normalizes_tags() {
        let body = r#"[
            {"id":"1","title":"A","completed":false,"priority":1,"date":"2024-01-01","dueDate":"2024-01-02","tags":["x"]},
            {"id":"2","title":"B","completed":true,"priority":2,"date":"2024-01-01","dueDate":"2024-01-02"},
            {"id":"3","title":"C","completed":false,"priority":3,"date":"2024-01-01","dueDate":"2024-01-02","tags":"oops"}
        ]"#;
        let todos = client().parse_list_todos(response(200, body)).unwrap();
        assert_eq!(todos.len(), 3);
        assert_eq!(todos[0].tags, vec!["x"]);
        assert!(todos[1].tags.is_empty());
        assert!(todos[2].tags.is_empty());
    }

    #[test]
    fn parse_list_todos_keeps_out_of_range_priority() {
        let body = r#"[
            {"id":"1","title":"A","priority":2},
            {"id":"2","title":"B","priority":-1},
            {"id":"3","title":"C","priority":300},
            {"id":"4","title":null,"date":null,"dueDate":null}
        ]"#;
        let todos = client().parse_list_todos(response(200, body)).unwrap();
        let priorities: Vec<_> = todos.iter().map(|t| t.priority).collect();
        assert_eq!(priorities, vec![2, -1, 300, 1]);
        assert_eq!(todos[3].title, "");
        assert_eq!(todos[3].due_date, "");
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client().parse_list_todos(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_list_todos_rejects_non_array() {
        let err = client().parse_list_todos(response(200, r#"{"id":"1"}"#)).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_create_todo_accepts_200_and_201() {
        let body = r#"{"id":"42","title":"New","completed":false,"priority":1,"date":"","dueDate":"","tags":[]}"#;
        for status in [200, 201] {
            let todo = client().parse_create_todo(response(status, body)).unwrap();
            assert_eq!(todo.id, TodoId::new("42"));
        }
    }

    #[test]
    fn parse_create_todo_wrong_status() {
        let err = client()
            .parse_create_todo(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_replace_todo_success() {
        let body = serde_json::to_string(&sample_item()).unwrap();
        let todo = client().parse_replace_todo(response(200, &body)).unwrap();
        assert_eq!(todo, sample_item());
    }

    #[test]
    fn parse_replace_todo_not_found() {
        let err = client().parse_replace_todo(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_delete_todo_ignores_body() {
        assert!(client().parse_delete_todo(response(200, "anything")).is_ok());
        assert!(client().parse_delete_todo(response(204, "")).is_ok());
    }

    #[test]
    fn parse_delete_todo_not_found() {
        let err = client().parse_delete_todo(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }
}
