use infisical_secrets::{GetSecretRequest, SecretsError};
use serde_json::json;
use wiremock::matchers::{bearer_token, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::support::*;

fn request(name: &str) -> GetSecretRequest {
    GetSecretRequest::new(name, PROJECT_ID, "dev", "/")
}

#[tokio::test]
async fn fetch_forwards_parameters_and_wraps_value() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v3/secrets/raw/DATABASE_URL"))
        .and(bearer_token(ACCESS_TOKEN))
        .and(query_param("workspaceId", PROJECT_ID))
        .and(query_param("environment", "dev"))
        .and(query_param("secretPath", "/"))
        .and(query_param("expandSecretReferences", "true"))
        .and(query_param("include_imports", "true"))
        .and(query_param("type", "shared"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secret": secret_json("DATABASE_URL", Some("postgres://db:5432/app"))
        })))
        .expect(1)
        .mount(&server)
        .await;

    let value = session.get_secret_by_name(request("DATABASE_URL")).await.unwrap();
    assert_eq!(value.expose_secret(), "postgres://db:5432/app");
    assert_eq!(format!("{:?}", value), "SecretString([REDACTED])");
}

#[tokio::test]
async fn fetch_forwards_disabled_flags() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v3/secrets/raw/API_KEY"))
        .and(query_param("expandSecretReferences", "false"))
        .and(query_param("include_imports", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secret": secret_json("API_KEY", Some("${OTHER}"))
        })))
        .expect(1)
        .mount(&server)
        .await;

    let req = request("API_KEY").with_expand_secret_references(false).with_include_imports(false);
    let record = session.get_secret_record(req).await.unwrap();
    assert_eq!(record.secret_key, "API_KEY");
    assert_eq!(record.version, Some(1));
    assert_eq!(record.secret_value.unwrap().expose_secret(), "${OTHER}");
}

#[tokio::test]
async fn null_value_is_empty_secret() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v3/secrets/raw/EMPTY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secret": secret_json("EMPTY", None)
        })))
        .mount(&server)
        .await;

    let value = session.get_secret_by_name(request("EMPTY")).await.unwrap();
    assert!(value.is_empty());
}

#[tokio::test]
async fn missing_secret_is_not_found() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v3/secrets/raw/NOPE"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Secret not found" })),
        )
        .mount(&server)
        .await;

    let err = session.get_secret_by_name(request("NOPE")).await.unwrap_err();
    assert!(matches!(err, SecretsError::NotFound { ref key } if key == "NOPE"));
}

#[tokio::test]
async fn forbidden_is_permission_denied() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v3/secrets/raw/PROD_KEY"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": "ForbiddenError",
            "message": "You are not allowed to read secrets in this environment"
        })))
        .mount(&server)
        .await;

    let err = session.get_secret_by_name(request("PROD_KEY")).await.unwrap_err();
    assert!(err.is_access_error());
    assert!(err.to_string().contains("not allowed"));
}

#[tokio::test]
async fn invalid_request_never_reaches_service() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    let err = session
        .get_secret_by_name(GetSecretRequest::new("API_KEY", PROJECT_ID, "dev", "backend"))
        .await
        .unwrap_err();
    assert!(matches!(err, SecretsError::InvalidParameter { ref field, .. } if field == "secret_path"));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() == LOGIN_PATH));
}
