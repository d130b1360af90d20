use infisical_secrets::{Infisical, SecretReference, SecretString, SecretsError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::support::*;

#[tokio::test]
async fn login_posts_credentials_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "clientId": CLIENT_ID, "clientSecret": CLIENT_SECRET })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    let session = Infisical::with_api_url(server.uri())
        .unwrap()
        .with_universal_auth(CLIENT_ID, CLIENT_SECRET)
        .await
        .unwrap();

    let token = session.client().access_token();
    assert_eq!(token.token_type(), "Bearer");
    assert!(!token.is_expired());
}

#[tokio::test]
async fn login_accepts_wrapped_credentials() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let client_id = SecretString::new(CLIENT_ID);
    let client_secret = SecretReference::Literal(SecretString::new(CLIENT_SECRET));

    let result = Infisical::with_api_url(server.uri())
        .unwrap()
        .with_universal_auth(&client_id, &client_secret)
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn rejected_login_is_authentication_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let err = Infisical::with_api_url(server.uri())
        .unwrap()
        .with_universal_auth(CLIENT_ID, "wrong-secret")
        .await
        .unwrap_err();

    match err {
        SecretsError::AuthenticationFailed { message } => {
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected AuthenticationFailed, got {:?}", other),
    }

    // Only the login call reached the service.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn server_error_on_login_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = Infisical::with_api_url(server.uri())
        .unwrap()
        .with_universal_auth(CLIENT_ID, CLIENT_SECRET)
        .await
        .unwrap_err();

    assert!(matches!(err, SecretsError::Api { status: 503, ref message } if message == "upstream unavailable"));
}

#[tokio::test]
async fn self_hosted_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/infisical/api/v1/auth/universal-auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    let result = Infisical::with_api_url(format!("{}/infisical", server.uri()))
        .unwrap()
        .with_universal_auth(CLIENT_ID, CLIENT_SECRET)
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn missing_env_credential_fails_before_login() {
    let server = MockServer::start().await;
    let client_id = SecretReference::Env("INFISICAL_SECRETS_TEST_UNSET_VARIABLE".to_string());

    let err = Infisical::with_api_url(server.uri())
        .unwrap()
        .with_universal_auth(&client_id, CLIENT_SECRET)
        .await
        .unwrap_err();

    assert!(matches!(err, SecretsError::InvalidParameter { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}
