//! Integration tests for the API client against a mock server.

use blog_browser::api::{ApiClient, ApiError};
use blog_browser::config::Config;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base: &str) -> Config {
    Config {
        api_url: base.parse().expect("mock server URI"),
        ..Config::for_testing()
    }
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&test_config(&server.uri())).expect("Failed to build client")
}

#[tokio::test]
async fn test_list_authors_decodes_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/authors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "1",
                "firstName": "Alice",
                "lastName": "Smith",
                "numPosts": 2,
                "numComments": 5,
                "numLikes": 9
            },
            {
                "id": "2",
                "firstName": "Bob",
                "lastName": "Jones",
                "numPosts": 0,
                "numComments": 1,
                "numLikes": 0,
                "profileImage": "https://example.com/bob.png"
            }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let authors = client.list_authors().await.expect("list_authors failed");

    assert_eq!(authors.len(), 2);
    assert_eq!(authors[0].full_name(), "Alice Smith");
    assert_eq!(
        authors[1].profile_image.as_deref(),
        Some("https://example.com/bob.png")
    );
}

#[tokio::test]
async fn test_get_author_maps_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/authors/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_author("99").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "author 99 not found");
}

#[tokio::test]
async fn test_update_surfaces_server_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/posts/p1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let post = blog_browser::api::Post {
        id: "p1".to_string(),
        title: "T".to_string(),
        description: "D".to_string(),
        author_id: "1".to_string(),
        num_likes: 0,
        num_comments: 0,
        date_published: 0,
    };

    match client.update_post(&post).await.unwrap_err() {
        ApiError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected ApiError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_without_body_falls_back_to_canonical_reason() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/posts/p1"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.delete_post("p1").await.unwrap_err() {
        ApiError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Forbidden");
        }
        other => panic!("expected ApiError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_sends_json_body() {
    let server = MockServer::start().await;
    let stored = json!({
        "id": "p1",
        "title": "Hello",
        "description": "World",
        "authorId": "7",
        "numLikes": 0,
        "numComments": 0,
        "datePublished": 1_700_000_000_000i64
    });

    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({"title": "Hello", "authorId": "7"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(stored))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let post = blog_browser::api::Post {
        id: "p1".to_string(),
        title: "Hello".to_string(),
        description: "World".to_string(),
        author_id: "7".to_string(),
        num_likes: 0,
        num_comments: 0,
        date_published: 1_700_000_000_000,
    };

    let created = client.create_post(&post).await.expect("create failed");
    assert_eq!(created, post);
}

#[tokio::test]
async fn test_likes_filtered_by_post_id_locally() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/likes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"postId": "p1", "authorId": "1", "datePublished": 1},
            {"postId": "p2", "authorId": "2", "datePublished": 2},
            {"postId": "p1", "authorId": "3", "datePublished": 3}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let likes = client.likes_for_post("p1").await.expect("likes failed");

    assert_eq!(likes.len(), 2);
    assert!(likes.iter().all(|like| like.post_id == "p1"));
}

#[tokio::test]
async fn test_posts_by_author_filtered_locally() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "title": "One", "description": "", "authorId": "7",
             "numLikes": 0, "numComments": 0, "datePublished": 1},
            {"id": "b", "title": "Two", "description": "", "authorId": "8",
             "numLikes": 0, "numComments": 0, "datePublished": 2},
            {"id": "c", "title": "Three", "description": "", "authorId": "7",
             "numLikes": 0, "numComments": 0, "datePublished": 3}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let posts = client.posts_by_author("7").await.expect("posts failed");

    let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    // Discard port; nothing listens there.
    let client = ApiClient::new(&test_config("http://127.0.0.1:9")).expect("build failed");

    let err = client.list_posts().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
}
