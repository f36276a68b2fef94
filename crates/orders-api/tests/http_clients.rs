use orders_api::{
    abstract_trait::{OAuthServiceTrait, SmsServiceTrait},
    config::{OAuthConfig, SmsConfig},
    service::{AfricasTalkingSms, GoogleOAuthService},
};
use serde_json::json;
use shared::errors::ServiceError;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path, query_param},
};

fn oauth_config(server: &MockServer) -> OAuthConfig {
    OAuthConfig {
        client_id: "client-id".into(),
        client_secret: "client-secret".into(),
        redirect_uri: "http://localhost:5000/google-login".into(),
        auth_url: format!("{}/auth", server.uri()),
        token_url: format!("{}/token", server.uri()),
        userinfo_url: format!("{}/userinfo", server.uri()),
        people_url: format!("{}/people/me", server.uri()),
    }
}

fn sms_config(server: &MockServer, sender_id: Option<&str>) -> SmsConfig {
    SmsConfig {
        username: "sandbox".into(),
        api_key: "secret-key".into(),
        sender_id: sender_id.map(str::to_string),
        base_url: server.uri(),
    }
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code"))
        .and(body_string_contains("client_secret=client-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-123",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_userinfo(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .and(header("authorization", "Bearer access-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sub": "1234",
            "email": "ada@example.com",
            "name": "Ada Lovelace"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn profile_includes_first_phone_number() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_userinfo(&server).await;
    Mock::given(method("GET"))
        .and(path("/people/me"))
        .and(query_param("personFields", "phoneNumbers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "phoneNumbers": [
                {"value": "0700 000001", "canonicalForm": "+254700000001"},
                {"value": "0700 000002", "canonicalForm": "+254700000002"}
            ]
        })))
        .mount(&server)
        .await;

    let oauth = GoogleOAuthService::new(oauth_config(&server)).unwrap();
    let user = oauth.fetch_profile("auth-code").await.unwrap();

    assert_eq!(user.name, "Ada Lovelace");
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.contact.as_deref(), Some("+254700000001"));
}

#[tokio::test]
async fn people_api_failure_leaves_contact_empty() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_userinfo(&server).await;
    Mock::given(method("GET"))
        .and(path("/people/me"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let oauth = GoogleOAuthService::new(oauth_config(&server)).unwrap();
    let user = oauth.fetch_profile("auth-code").await.unwrap();

    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.contact, None);
}

#[tokio::test]
async fn rejected_code_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_grant"})))
        .mount(&server)
        .await;

    let oauth = GoogleOAuthService::new(oauth_config(&server)).unwrap();
    let err = oauth.fetch_profile("stale").await.unwrap_err();

    assert!(matches!(err, ServiceError::Upstream(ref msg) if msg.contains("invalid_grant")));
}

#[tokio::test]
async fn sms_posts_form_with_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/version1/messaging"))
        .and(header("apiKey", "secret-key"))
        .and(header("accept", "application/json"))
        .and(body_string_contains("username=sandbox"))
        .and(body_string_contains("to=%2B254700000001"))
        .and(body_string_contains("from=SHOP"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "SMSMessageData": {
                "Message": "Sent to 1/1 Total Cost: KES 0.8000",
                "Recipients": [{
                    "statusCode": 101,
                    "number": "+254700000001",
                    "status": "Success",
                    "cost": "KES 0.8000",
                    "messageId": "ATXid_1"
                }]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sms = AfricasTalkingSms::new(sms_config(&server, Some("SHOP"))).unwrap();
    sms.send("+254700000001", "Hello").await.unwrap();
}

#[tokio::test]
async fn sms_rejection_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/version1/messaging"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "SMSMessageData": {
                "Message": "Sent to 0/1 Total Cost: 0",
                "Recipients": [{
                    "statusCode": 403,
                    "number": "+254700000001",
                    "status": "InvalidPhoneNumber"
                }]
            }
        })))
        .mount(&server)
        .await;

    let sms = AfricasTalkingSms::new(sms_config(&server, None)).unwrap();
    let err = sms.send("+254700000001", "Hello").await.unwrap_err();

    assert!(matches!(err, ServiceError::Upstream(ref msg) if msg.contains("InvalidPhoneNumber")));
}

#[tokio::test]
async fn sms_gateway_error_status_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/version1/messaging"))
        .respond_with(ResponseTemplate::new(401).set_body_string("The supplied authentication is invalid"))
        .mount(&server)
        .await;

    let sms = AfricasTalkingSms::new(sms_config(&server, None)).unwrap();
    let err = sms.send("+254700000001", "Hello").await.unwrap_err();

    assert!(matches!(err, ServiceError::Upstream(_)));
}
