use infisical_secrets::{Infisical, InfisicalSession};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLIENT_ID: &str = "machine-identity-7c1d";
pub const CLIENT_SECRET: &str = "cs_9a8b7c6d5e4f";
pub const ACCESS_TOKEN: &str = "at_3f2e1d0c";
pub const PROJECT_ID: &str = "65f1c0de2b";

pub const LOGIN_PATH: &str = "/api/v1/auth/universal-auth/login";

pub fn token_body() -> Value {
    json!({
        "accessToken": ACCESS_TOKEN,
        "expiresIn": 7200,
        "accessTokenMaxTTL": 43200,
        "tokenType": "Bearer"
    })
}

pub fn secret_json(key: &str, value: Option<&str>) -> Value {
    json!({
        "id": format!("id-{}", key),
        "secretKey": key,
        "secretValue": value,
        "secretPath": "/",
        "workspace": PROJECT_ID,
        "environment": "dev",
        "version": 1,
        "type": "shared",
        "tags": []
    })
}

pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .mount(server)
        .await;
}

pub async fn login(server: &MockServer) -> InfisicalSession {
    mount_login(server).await;
    Infisical::with_api_url(server.uri())
        .expect("valid mock URL")
        .with_universal_auth(CLIENT_ID, CLIENT_SECRET)
        .await
        .expect("login against mock")
}
