//! End-to-end scrapes through the registry and the axum router.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use common::{capture_logs, droplet, populated};
use digitalocean_exporter::collectors::{
    register_all, AccountCollector, BuildInfo, DomainCollector, DropletCollector,
    ExporterCollector, VolumeCollector,
};
use digitalocean_exporter::api::mock::MockApi;
use digitalocean_exporter::metrics::encode_text;
use digitalocean_exporter::{create_app, CloudApi, DigitalOceanClient, Registry, WebConfig};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn registry_for(api: MockApi, timeout: Duration) -> Registry {
    let mut registry = Registry::new();
    register_all(
        &mut registry,
        Arc::new(api),
        timeout,
        BuildInfo::current(),
        Utc::now(),
    )
    .unwrap();
    registry
}

async fn scrape(registry: Arc<Registry>) -> (StatusCode, String) {
    let app = create_app(&WebConfig::default(), registry);
    let response = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn lines_for<'a>(body: &'a str, metric: &str) -> Vec<&'a str> {
    let prefix = format!("{}{{", metric);
    body.lines().filter(|l| l.starts_with(&prefix)).collect()
}

#[tokio::test]
async fn test_droplet_status_state_set() {
    let api = MockApi {
        droplets: vec![droplet("d1", "active"), droplet("d2", "off")],
        ..Default::default()
    };
    let (status, body) = scrape(Arc::new(registry_for(api, Duration::from_secs(1)))).await;
    assert_eq!(status, StatusCode::OK);

    assert!(body.contains("# TYPE digitalocean_droplet_status gauge"));
    let d1 = r#"digitalocean_droplet_status{id="d1",name="d1-host",region="nyc3",status="#;
    assert!(body.contains(&format!(r#"{}"active"}} 1"#, d1)));
    assert!(body.contains(&format!(r#"{}"new"}} 0"#, d1)));
    assert!(body.contains(&format!(r#"{}"off"}} 0"#, d1)));
    assert!(body.contains(&format!(r#"{}"archive"}} 0"#, d1)));

    let d2 = r#"digitalocean_droplet_status{id="d2",name="d2-host",region="nyc3",status="#;
    assert!(body.contains(&format!(r#"{}"off"}} 1"#, d2)));
    assert!(body.contains(&format!(r#"{}"active"}} 0"#, d2)));

    // Exactly one active state per droplet.
    let active: Vec<_> = lines_for(&body, "digitalocean_droplet_status")
        .into_iter()
        .filter(|l| l.ends_with(" 1"))
        .collect();
    assert_eq!(active.len(), 2);
}

#[tokio::test]
async fn test_volume_timeout_keeps_other_collectors() {
    let (logs, _guard) = capture_logs();

    let mut api = populated();
    api.stalled.insert("volume");
    let registry = Arc::new(registry_for(api, Duration::from_millis(50)));

    let (status, body) = scrape(registry).await;
    assert_eq!(status, StatusCode::OK);

    assert!(!body.contains("digitalocean_volume_"));
    for metric in [
        "digitalocean_account_droplet_limit",
        "digitalocean_domain_ttl_seconds",
        "digitalocean_droplet_up",
        "digitalocean_exporter_build_info",
        "digitalocean_floating_ipv4_active",
        "digitalocean_image_size_bytes",
        "digitalocean_key",
        "digitalocean_loadbalancer_status",
        "digitalocean_snapshot_size_bytes",
    ] {
        assert!(
            body.contains(&format!("# TYPE {} gauge", metric)),
            "missing {}",
            metric
        );
    }

    let logs = logs.contents();
    assert!(logs.contains(r#"collector="volume""#), "logs: {}", logs);
    assert!(logs.contains("timed out"), "logs: {}", logs);
}

#[tokio::test]
async fn test_failed_collector_is_invisible_to_scrapers() {
    let mut api = populated();
    api.failing.insert("droplet");
    api.failing.insert("account");

    let (status, body) = scrape(Arc::new(registry_for(api, Duration::from_secs(1)))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("digitalocean_droplet_"));
    assert!(!body.contains("digitalocean_account_"));
    assert!(body.contains("digitalocean_volume_size_bytes{"));
}

#[tokio::test]
async fn test_uptime_from_fixed_clock() {
    let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let t1 = t0 + chrono::Duration::seconds(3600);

    let mut registry = Registry::new();
    registry
        .register_collector(
            ExporterCollector::new(BuildInfo::current(), t0)
                .unwrap()
                .with_clock(move || t1),
        )
        .unwrap();

    let (_, body) = scrape(Arc::new(registry)).await;
    assert!(body.contains("digitalocean_exporter_uptime_seconds 3600\n"));
    assert!(body.contains("digitalocean_exporter_start_time 1704067200\n"));
}

#[tokio::test]
async fn test_successive_scrapes_are_identical() {
    let registry = Arc::new(registry_for(populated(), Duration::from_secs(1)));

    let strip_uptime = |body: String| -> String {
        body.lines()
            .filter(|l| !l.starts_with("digitalocean_exporter_uptime_seconds "))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let (_, first) = scrape(registry.clone()).await;
    let (_, second) = scrape(registry).await;
    assert_eq!(strip_uptime(first), strip_uptime(second));
}

#[tokio::test]
async fn test_describe_is_stable() {
    let registry = registry_for(populated(), Duration::from_secs(1));
    let first = registry.describe();
    let second = registry.describe();
    assert_eq!(first, second);
    assert!(first.len() > 30);
}

#[tokio::test]
async fn test_colliding_collectors_are_rejected() {
    let api: Arc<dyn CloudApi> = Arc::new(MockApi::default());
    let timeout = Duration::from_secs(1);

    let mut registry = Registry::new();
    registry
        .register_collector(DropletCollector::new(api.clone(), timeout).unwrap())
        .unwrap();
    registry
        .register_collector(AccountCollector::new(api.clone(), timeout).unwrap())
        .unwrap();

    assert!(registry
        .register_collector(DropletCollector::new(api.clone(), timeout).unwrap())
        .is_err());
    assert_eq!(registry.len(), 2);

    registry
        .register_collector(DomainCollector::new(api.clone(), timeout).unwrap())
        .unwrap();
    registry
        .register_collector(VolumeCollector::new(api, timeout).unwrap())
        .unwrap();
    assert_eq!(registry.len(), 4);
}

#[tokio::test]
async fn test_landing_page() {
    let config = WebConfig::default();
    let app = create_app(&config, Arc::new(Registry::new()));
    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("DigitalOcean Exporter"));
    assert!(body.contains(r#"href="/metrics""#));
}

#[tokio::test]
async fn test_scrape_through_http_client() {
    let mut server = mockito::Server::new_async().await;
    let _droplets = server
        .mock("GET", "/droplets")
        .match_query(mockito::Matcher::Any)
        .match_header("authorization", "Bearer secret")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "droplets": [{
                    "id": 3164444,
                    "name": "web-1",
                    "memory": 2048,
                    "vcpus": 2,
                    "disk": 50,
                    "locked": false,
                    "status": "active",
                    "region": {"slug": "ams3", "name": "Amsterdam 3"},
                    "size": {"slug": "s-2vcpu-2gb", "price_monthly": 18.0, "price_hourly": 0.02679},
                    "features": ["backups", "ipv6"]
                }],
                "links": {},
                "meta": {"total": 1}
            }"#,
        )
        .create_async()
        .await;

    let client = DigitalOceanClient::with_base_url("secret", server.url()).unwrap();
    let mut registry = Registry::new();
    registry
        .register_collector(DropletCollector::new(Arc::new(client), Duration::from_secs(5)).unwrap())
        .unwrap();

    let families = registry.gather().await;
    let body = encode_text(&families).unwrap();

    let labels = r#"{id="3164444",name="web-1",region="ams3"}"#;
    assert!(body.contains(&format!("digitalocean_droplet_up{} 1", labels)));
    assert!(body.contains(&format!("digitalocean_droplet_cpus{} 2", labels)));
    assert!(body.contains(&format!("digitalocean_droplet_memory_bytes{} 2147483648", labels)));
    assert!(body.contains(&format!("digitalocean_droplet_backups_enabled{} 1", labels)));
}
