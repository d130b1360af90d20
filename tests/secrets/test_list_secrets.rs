use infisical_secrets::{ListSecretsRequest, SecretsError};
use serde_json::json;
use wiremock::matchers::{bearer_token, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::support::*;

const LIST_PATH: &str = "/api/v3/secrets/raw";

fn values(resolved: &[infisical_secrets::ResolvedSecret]) -> Vec<(String, String)> {
    resolved.iter().map(|s| (s.key.clone(), s.value.expose_secret().to_string())).collect()
}

#[tokio::test]
async fn listing_resolves_imports() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(bearer_token(ACCESS_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secrets": [secret_json("A", Some("1"))],
            "imports": [
                {
                    "secretPath": "/shared",
                    "environment": "dev",
                    "folderId": "f-1",
                    "secrets": [secret_json("A", Some("2")), secret_json("B", Some("2"))]
                },
                {
                    "secretPath": "/team",
                    "environment": "dev",
                    "folderId": "f-2",
                    "secrets": [secret_json("B", Some("3")), secret_json("C", Some("3"))]
                }
            ]
        })))
        .mount(&server)
        .await;

    let resolved = session
        .get_secrets(ListSecretsRequest::new(PROJECT_ID, "dev", "/"))
        .await
        .unwrap();

    assert_eq!(
        values(&resolved),
        vec![
            ("A".to_string(), "1".to_string()),
            ("B".to_string(), "3".to_string()),
            ("C".to_string(), "3".to_string()),
        ]
    );
}

#[tokio::test]
async fn tags_and_recursive_are_forwarded_verbatim() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(query_param("workspaceId", PROJECT_ID))
        .and(query_param("environment", "prod"))
        .and(query_param("secretPath", "/backend"))
        .and(query_param("recursive", "true"))
        .and(query_param("include_imports", "true"))
        .and(query_param("expandSecretReferences", "true"))
        .and(query_param("tagSlugs", "db,cache"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "secrets": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ListSecretsRequest::new(PROJECT_ID, "prod", "/backend")
        .with_recursive(true)
        .with_tag_filters(["db", "cache"]);
    let listing = session.list_secrets(request).await.unwrap();
    assert!(listing.secrets.is_empty());
    assert!(listing.imports.is_empty());
}

#[tokio::test]
async fn no_tag_filter_omits_tag_slugs() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(query_param("recursive", "false"))
        .and(query_param_is_missing("tagSlugs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secrets": [secret_json("ONLY", Some("x"))],
            "imports": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resolved = session
        .get_secrets(ListSecretsRequest::new(PROJECT_ID, "dev", "/"))
        .await
        .unwrap();
    assert_eq!(values(&resolved), vec![("ONLY".to_string(), "x".to_string())]);
}

#[tokio::test]
async fn unauthorized_listing_is_permission_denied() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })))
        .mount(&server)
        .await;

    let err = session
        .get_secrets(ListSecretsRequest::new(PROJECT_ID, "dev", "/"))
        .await
        .unwrap_err();
    assert!(matches!(err, SecretsError::PermissionDenied { ref message } if message == "Token expired"));
}

#[tokio::test]
async fn malformed_body_is_serialization_error() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = session
        .list_secrets(ListSecretsRequest::new(PROJECT_ID, "dev", "/"))
        .await
        .unwrap_err();
    assert!(matches!(err, SecretsError::Serialization(_)));
}

#[tokio::test]
async fn tag_with_comma_is_rejected() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    let err = session
        .list_secrets(ListSecretsRequest::new(PROJECT_ID, "dev", "/").with_tag_filters(["a,b"]))
        .await
        .unwrap_err();
    assert!(matches!(err, SecretsError::InvalidParameter { ref field, .. } if field == "tag_filters"));
}
