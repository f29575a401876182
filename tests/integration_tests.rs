//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: settings → session → endpoint group →
//! retries and pagination → JSON result

use meraki_dashboard::api::{
    CellularGateway, DashboardApi, DhcpOptions, UpdateMonitoredMediaServer, UplinkStatusesOptions,
};
use meraki_dashboard::config::load_settings_from_str;
use meraki_dashboard::http::RateLimitPolicy;
use meraki_dashboard::{
    cancellable, AuthConfig, BackoffType, CallOptions, Direction, Endpoint, ErrorKind, Method,
    Session, SessionConfig, TotalPages,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn quick_session(uri: &str) -> Session {
    let config = SessionConfig::builder()
        .base_url(uri)
        .no_throttle()
        .max_retries(2)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(1),
            Duration::from_millis(5),
        )
        .rate_limit(RateLimitPolicy {
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(20),
            jitter: Duration::from_millis(2),
            ..RateLimitPolicy::default()
        })
        .build();
    Session::new(config, AuthConfig::bearer("integration-key")).unwrap()
}

// ============================================================================
// Settings → Session
// ============================================================================

#[tokio::test]
async fn test_settings_file_drives_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/cellularGateway/dhcp"))
        .and(header("X-Cisco-Meraki-API-Key", "legacy-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dhcpLeaseTime": "1 hour",
            "dnsNameservers": "upstream_dns"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let yaml = format!(
        "api_key: legacy-key\nauth_header: legacy\nbase_url: {}\nrate_limit:\n  requests_per_second: 0\n",
        mock_server.uri()
    );
    let api = DashboardApi::from_settings(load_settings_from_str(&yaml).unwrap()).unwrap();

    let dhcp = api
        .cellular_gateway()
        .get_network_cellular_gateway_dhcp("N_1")
        .await
        .unwrap();

    assert_eq!(dhcp["dnsNameservers"], "upstream_dns");
}

#[tokio::test]
async fn test_throttled_session_still_completes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "1"}])))
        .expect(5)
        .mount(&mock_server)
        .await;

    let config = SessionConfig::builder()
        .base_url(mock_server.uri())
        .throttle(meraki_dashboard::http::ThrottleConfig::new(100, 5))
        .build();
    let session = Session::new(config, AuthConfig::None).unwrap();

    for _ in 0..5 {
        session
            .get("/organizations", Default::default())
            .await
            .unwrap();
    }
}

// ============================================================================
// Retries across a paginated call
// ============================================================================

#[tokio::test]
async fn test_paginated_call_survives_429_and_5xx() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    let statuses = "/organizations/549236/cellularGateway/uplink/statuses";

    // page 2: one 503, then success
    Mock::given(method("GET"))
        .and(path(statuses))
        .and(query_param("startingAfter", "Q2B"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(statuses))
        .and(query_param("startingAfter", "Q2B"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"serial": "Q2C"}])))
        .mount(&mock_server)
        .await;

    // page 1: two 429s, then success
    Mock::given(method("GET"))
        .and(path(statuses))
        .and(query_param_is_missing("startingAfter"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(statuses))
        .and(query_param_is_missing("startingAfter"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    format!(
                        "<{uri}{statuses}?perPage=2>; rel=first, <{uri}{statuses}?perPage=2&startingAfter=Q2B>; rel=next"
                    )
                    .as_str(),
                )
                .set_body_json(json!([{"serial": "Q2A"}, {"serial": "Q2B"}])),
        )
        .mount(&mock_server)
        .await;

    let session = quick_session(&uri);
    let items = CellularGateway::new(&session)
        .get_organization_cellular_gateway_uplink_statuses(
            "549236",
            &UplinkStatusesOptions {
                per_page: Some(2),
                ..Default::default()
            },
            TotalPages::All,
            Direction::Next,
        )
        .await
        .unwrap();

    let serials: Vec<&str> = items.iter().filter_map(|i| i["serial"].as_str()).collect();
    assert_eq!(serials, vec!["Q2A", "Q2B", "Q2C"]);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 5);
    assert_eq!(session.rate_limit_state().await.consecutive_429s(), 0);
}

// ============================================================================
// Error taxonomy
// ============================================================================

#[tokio::test]
async fn test_error_kinds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"errors": ["Not found"]})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let session = quick_session(&mock_server.uri());

    let err = session.get("/missing", Default::default()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Client);
    assert_eq!(err.status(), Some(404));
    assert!(!err.is_retryable());
    assert_eq!(err.to_string(), "HTTP 404: Not found");

    let err = session.get("/broken", Default::default()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transient);
    assert_eq!(err.status(), Some(502));
}

#[test]
fn test_undefined_path_argument_is_config_error() {
    const RULES: Endpoint = Endpoint {
        operation: "getDeviceCellularGatewayPortForwardingRules",
        tags: &["cellularGateway", "configure", "portForwardingRules"],
        method: Method::GET,
        path: "/devices/{serial}/cellularGateway/portForwardingRules",
        query_params: &[],
        body_params: &[],
        array_params: &[],
    };

    let err = RULES.request(&[], &()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
async fn test_update_drops_unknown_and_unset_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/networks/N_1/cellularGateway/dhcp"))
        .and(body_json(json!({
            "dhcpLeaseTime": "1 day",
            "dnsNameservers": "custom",
            "dnsCustomNameservers": ["172.16.2.111", "172.16.2.30"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"dhcpLeaseTime": "1 day"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/organizations/1/insight/monitoredMediaServers/7"))
        .and(body_json(json!({"name": "Renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "7"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = DashboardApi::new(quick_session(&mock_server.uri()));

    api.cellular_gateway()
        .update_network_cellular_gateway_dhcp(
            "N_1",
            &DhcpOptions {
                dhcp_lease_time: Some("1 day".to_string()),
                dns_nameservers: Some("custom".to_string()),
                dns_custom_nameservers: Some(vec![
                    "172.16.2.111".to_string(),
                    "172.16.2.30".to_string(),
                ]),
            },
        )
        .await
        .unwrap();

    api.insight()
        .update_organization_insight_monitored_media_server(
            "1",
            "7",
            &UpdateMonitoredMediaServer {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_untyped_options_are_whitelisted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/networks/N_1/cellularGateway/subnetPool"))
        .and(body_json(json!({"cidr": "192.168.0.0/16"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    const SUBNET_POOL: Endpoint = Endpoint {
        operation: "updateNetworkCellularGatewaySubnetPool",
        tags: &["cellularGateway", "configure", "subnetPool"],
        method: Method::PUT,
        path: "/networks/{networkId}/cellularGateway/subnetPool",
        query_params: &[],
        body_params: &["mask", "cidr"],
        array_params: &[],
    };

    let request = SUBNET_POOL
        .request(
            &[("networkId", "N_1")],
            &json!({" cidr ": "192.168.0.0/16", "mask": null, "colour": "blue"}),
        )
        .unwrap();

    quick_session(&mock_server.uri())
        .execute(&request)
        .await
        .unwrap();
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn test_deadline_covers_every_page() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", format!("<{uri}/events?startingAfter=more>; rel=next").as_str())
                .set_body_json(json!([{"id": 1}]))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&mock_server)
        .await;

    let session = quick_session(&uri);
    let err = session
        .execute_paginated_with(
            &meraki_dashboard::RequestDescriptor::get("/events", "getEvents"),
            TotalPages::All,
            Direction::Next,
            &CallOptions::timeout(Duration::from_millis(300)),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
}

#[tokio::test]
async fn test_abort_during_rate_limit_backoff() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&mock_server)
        .await;

    let config = SessionConfig::builder()
        .base_url(mock_server.uri())
        .no_throttle()
        .build();
    let session = Session::new(config, AuthConfig::None).unwrap();

    let (call, handle) = cancellable(session.get("/limited", Default::default()));
    let task = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();
    });

    let err = call.await.unwrap_err();
    task.await.unwrap();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
}
