//! Tests for the service module

use super::client::analytics_header_value;
use super::*;
use crate::auth::AuthConfig;
use crate::config::ServiceProperties;
use crate::error::{Error, ErrorKind};
use crate::http::HttpClientConfig;
use crate::models::{AdditionalScope, CollectionStatus, ProfileTemplate};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ConfigurationAggregatorClient {
    ConfigurationAggregatorClient::new(ClientOptions::new().url(server.uri())).unwrap()
}

fn settings_body() -> serde_json::Value {
    json!({
        "resource_collection_enabled": true,
        "trusted_profile_id": "Profile-1260aec2-f2fc-44e2-8697-2cc15a447560",
        "last_updated": "2019-01-01T12:00:00.000Z",
        "regions": ["all"],
        "additional_scope": [{
            "type": "Enterprise",
            "enterprise_id": "testString",
            "profile_template": {
                "id": "ProfileTemplate-adb55769-ae22-4c60-aead-bd1f84f93c57",
                "trusted_profile_id": "Profile-6bb60124-8fc3-4d18-b63d-0b99560865d3"
            }
        }]
    })
}

fn config_json(crn: &str) -> serde_json::Value {
    json!({
        "about": {"resource_crn": crn, "service_name": "is"},
        "config": {"name": crn}
    })
}

// ============================================================================
// Endpoint Tests
// ============================================================================

#[test]
fn test_construct_service_url_defaults() {
    assert_eq!(
        construct_service_url(&HashMap::new()).unwrap(),
        DEFAULT_SERVICE_URL
    );
}

#[test_case("region", "eu-gb", "https://eu-gb.apprapp.cloud.ibm.com/apprapp/config_aggregator/v1/instances/provide-here-your-appconfig-instance-uuid" ; "region")]
#[test_case("instance_id", "abc-123", "https://us-south.apprapp.cloud.ibm.com/apprapp/config_aggregator/v1/instances/abc-123" ; "instance id")]
fn test_construct_service_url_with_variable(name: &str, value: &str, expected: &str) {
    let vars = HashMap::from([(name.to_string(), value.to_string())]);
    assert_eq!(construct_service_url(&vars).unwrap(), expected);
}

#[test]
fn test_construct_service_url_rejects_unknown_variable() {
    let vars = HashMap::from([("invalid_variable_name".to_string(), "value".to_string())]);
    let err = construct_service_url(&vars).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(err.to_string().contains("invalid_variable_name"));
}

#[test]
fn test_service_url_for_region_is_not_available() {
    let err = service_url_for_region("us-south").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_new_uses_default_url() {
    let client = ConfigurationAggregatorClient::new(ClientOptions::new()).unwrap();
    assert_eq!(client.service_url(), DEFAULT_SERVICE_URL);
}

#[test_case("{BAD_URL_STRING" ; "unparseable")]
#[test_case("relative/path" ; "relative")]
#[test_case("ftp://example.com/api" ; "wrong scheme")]
fn test_new_rejects_bad_url(url: &str) {
    let err = ConfigurationAggregatorClient::new(ClientOptions::new().url(url)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn test_new_rejects_invalid_credentials() {
    let err = ConfigurationAggregatorClient::new(
        ClientOptions::new().auth(AuthConfig::basic("{user}", "pass")),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn test_set_service_url() {
    let mut client = ConfigurationAggregatorClient::new(ClientOptions::new()).unwrap();

    tokio_test::assert_ok!(client.set_service_url("https://example.com/api/"));
    assert_eq!(client.service_url(), "https://example.com/api");

    tokio_test::assert_err!(client.set_service_url("{BAD_URL_STRING"));
    assert_eq!(client.service_url(), "https://example.com/api");
}

#[test]
fn test_from_properties() {
    let properties = ServiceProperties::from_map(HashMap::from([
        ("URL".to_string(), "https://props.example.com/api".to_string()),
        ("AUTH_TYPE".to_string(), "bearerToken".to_string()),
        ("BEARER_TOKEN".to_string(), "tok".to_string()),
        ("ENABLE_RETRIES".to_string(), "true".to_string()),
        ("MAX_RETRIES".to_string(), "3".to_string()),
        ("RETRY_INTERVAL".to_string(), "10".to_string()),
    ]));

    let client = ConfigurationAggregatorClient::from_properties(&properties, ClientOptions::new())
        .unwrap();

    assert_eq!(client.service_url(), "https://props.example.com/api");
    assert_eq!(
        client.http_client().authenticator().config(),
        &AuthConfig::bearer("tok")
    );
    assert_eq!(client.http_client().config().max_retries, 3);
    assert_eq!(
        client.http_client().config().max_backoff,
        Duration::from_secs(10)
    );
}

#[test]
fn test_from_properties_explicit_options_win() {
    let properties = ServiceProperties::from_map(HashMap::from([
        ("URL".to_string(), "https://props.example.com/api".to_string()),
        ("AUTH_TYPE".to_string(), "noauth".to_string()),
    ]));
    let options = ClientOptions::new()
        .url("https://explicit.example.com")
        .auth(AuthConfig::basic("u", "p"));

    let client = ConfigurationAggregatorClient::from_properties(&properties, options).unwrap();

    assert_eq!(client.service_url(), "https://explicit.example.com");
    assert_eq!(
        client.http_client().authenticator().config(),
        &AuthConfig::basic("u", "p")
    );
    assert_eq!(client.http_client().config().max_retries, 0);
}

#[test]
fn test_options_builders() {
    let options = ListConfigsOptions::new()
        .config_type("is.vpc")
        .limit(10)
        .header("x-custom-header", "x-custom-value")
        .timeout(Duration::from_secs(5));

    assert_eq!(options.config_type.as_deref(), Some("is.vpc"));
    assert_eq!(options.limit, Some(10));
    assert_eq!(
        options.headers.get("x-custom-header").map(String::as_str),
        Some("x-custom-value")
    );
    assert_eq!(options.timeout, Some(Duration::from_secs(5)));

    let settings = ReplaceSettingsOptions::new()
        .resource_collection_enabled(true)
        .regions(["all"]);
    assert_eq!(
        serde_json::to_value(&settings).unwrap(),
        json!({"resource_collection_enabled": true, "regions": ["all"]})
    );
}

// ============================================================================
// Operation Tests
// ============================================================================

#[tokio::test]
async fn test_list_configs_sends_all_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/configs"))
        .and(query_param("config_type", "testString"))
        .and(query_param("service_name", "testString"))
        .and(query_param("resource_group_id", "testString"))
        .and(query_param("location", "testString"))
        .and(query_param("resource_crn", "testString"))
        .and(query_param("limit", "10"))
        .and(query_param("start", "testString"))
        .and(query_param("sub_account", "testString"))
        .and(query_param("access_tags", "role:admin"))
        .and(query_param("user_tags", "test"))
        .and(query_param("service_tags", "test:tag"))
        .and(header("Accept", "application/json"))
        .and(header("x-custom-header", "x-custom-value"))
        .and(header(
            ANALYTICS_HEADER,
            analytics_header_value("ListConfigs").as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "limit": 10,
            "total_count": 1,
            "first": {"href": "first"},
            "configs": [config_json("crn:1")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = ListConfigsOptions::new()
        .config_type("testString")
        .service_name("testString")
        .resource_group_id("testString")
        .location("testString")
        .resource_crn("testString")
        .limit(10)
        .start("testString")
        .sub_account("testString")
        .access_tags("role:admin")
        .user_tags("test")
        .service_tags("test:tag")
        .header("x-custom-header", "x-custom-value");

    let page = client_for(&server).list_configs(&options).await.unwrap();

    assert_eq!(page.limit, 10);
    assert_eq!(page.total_count, Some(1));
    assert_eq!(page.configs.len(), 1);
    assert_eq!(page.configs[0].about.resource_crn.as_deref(), Some("crn:1"));
    assert_eq!(page.next_start(), None);
}

#[tokio::test]
async fn test_list_configs_omits_unset_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/configs"))
        .and(query_param("service_name", "is"))
        .and(query_param_is_missing("start"))
        .and(query_param_is_missing("limit"))
        .and(query_param_is_missing("config_type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"limit": 100, "configs": []})))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .list_configs(&ListConfigsOptions::new().service_name("is"))
        .await
        .unwrap();
    assert!(page.configs.is_empty());
}

#[tokio::test]
async fn test_list_configs_rejects_non_positive_limit_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_configs(&ListConfigsOptions::new().limit(-1))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "limit"));
}

#[tokio::test]
async fn test_replace_settings() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/settings"))
        .and(header(
            ANALYTICS_HEADER,
            analytics_header_value("ReplaceSettings").as_str(),
        ))
        .and(body_json(json!({
            "resource_collection_enabled": true,
            "trusted_profile_id": "Profile-1260aec2-f2fc-44e2-8697-2cc15a447560",
            "regions": ["all"],
            "additional_scope": [{
                "type": "Enterprise",
                "enterprise_id": "testString",
                "profile_template": {
                    "id": "ProfileTemplate-adb55769-ae22-4c60-aead-bd1f84f93c57",
                    "trusted_profile_id": "Profile-6bb60124-8fc3-4d18-b63d-0b99560865d3"
                }
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(settings_body()))
        .expect(1)
        .mount(&server)
        .await;

    let options = ReplaceSettingsOptions::new()
        .resource_collection_enabled(true)
        .trusted_profile_id("Profile-1260aec2-f2fc-44e2-8697-2cc15a447560")
        .regions(["all"])
        .additional_scope(AdditionalScope::enterprise("testString").with_profile_template(
            ProfileTemplate::new(
                "ProfileTemplate-adb55769-ae22-4c60-aead-bd1f84f93c57",
                "Profile-6bb60124-8fc3-4d18-b63d-0b99560865d3",
            ),
        ));

    let settings = client_for(&server).replace_settings(&options).await.unwrap();

    assert_eq!(settings.resource_collection_enabled, Some(true));
    assert_eq!(settings.regions, vec!["all".to_string()]);
    assert_eq!(settings.additional_scope.len(), 1);
    assert!(settings.last_updated.is_some());
}

#[tokio::test]
async fn test_get_settings() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/settings"))
        .and(header(
            ANALYTICS_HEADER,
            analytics_header_value("GetSettings").as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(settings_body()))
        .expect(1)
        .mount(&server)
        .await;

    let settings = client_for(&server)
        .get_settings(&GetSettingsOptions::new())
        .await
        .unwrap();

    assert_eq!(
        settings.trusted_profile_id.as_deref(),
        Some("Profile-1260aec2-f2fc-44e2-8697-2cc15a447560")
    );
}

#[tokio::test]
async fn test_get_resource_collection_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resource_collection_status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "last_config_refresh_time": "2019-01-01T12:00:00.000Z",
            "status": "initiated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client_for(&server)
        .get_resource_collection_status(&GetResourceCollectionStatusOptions::new())
        .await
        .unwrap();

    assert_eq!(status.status, Some(CollectionStatus::Initiated));
    assert!(status.last_config_refresh_time.is_some());
}

#[tokio::test]
async fn test_manual_reconcile_accepts_202() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/reconcile"))
        .and(header(
            ANALYTICS_HEADER,
            analytics_header_value("ManualReconcile").as_str(),
        ))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(json!({"message": "This is a message"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .manual_reconcile(&ManualReconcileOptions::new())
        .await
        .unwrap();

    assert_eq!(response.message.as_deref(), Some("This is a message"));
}

#[tokio::test]
async fn test_error_status_is_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errors": [{"code": "forbidden", "message": "Not authorized to read settings"}],
            "trace": "abc"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_settings(&GetSettingsOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Service);
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "HTTP 403: Not authorized to read settings");
}

#[tokio::test]
async fn test_invalid_json_is_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resource_collection_status"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string("this is not valid json"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_resource_collection_status(&GetResourceCollectionStatusOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Service);
}

#[tokio::test]
async fn test_per_call_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/settings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(settings_body())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_settings(&GetSettingsOptions::new().timeout(Duration::from_millis(50)))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_clones_share_configuration() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(settings_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = ConfigurationAggregatorClient::new(
        ClientOptions::new()
            .url(server.uri())
            .http(HttpClientConfig::builder().timeout(Duration::from_secs(5)).build()),
    )
    .unwrap();
    let cloned = client.clone();

    assert_eq!(client.service_url(), cloned.service_url());
    client.get_settings(&GetSettingsOptions::new()).await.unwrap();
    cloned.get_settings(&GetSettingsOptions::new()).await.unwrap();
}

#[tokio::test]
async fn test_configs_pager_follows_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/configs"))
        .and(query_param_is_missing("start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "limit": 1,
            "next": {"href": "next", "start": "page-2"},
            "configs": [config_json("crn:a")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/configs"))
        .and(query_param("start", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "limit": 1,
            "configs": [config_json("crn:b")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let all = client
        .configs_pager(&ListConfigsOptions::new().limit(1))
        .unwrap()
        .get_all()
        .await
        .unwrap();

    let crns: Vec<_> = all
        .iter()
        .filter_map(|c| c.about.resource_crn.as_deref())
        .collect();
    assert_eq!(crns, vec!["crn:a", "crn:b"]);
}
