use ferrous_recursor_application::ports::DnsResolver;
use ferrous_recursor_application::use_cases::ResolveNamesUseCase;
use ferrous_recursor_domain::{DomainError, RecordType, Resolution};
use ferrous_recursor_infrastructure::dns::{
    IterativeResolver, ResolutionCache, SystemClock, UdpTransport, WalkConfig,
};
use ferrous_recursor_infrastructure::repositories::JsonFileCacheStore;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

mod helpers;
use helpers::mock_nameserver::start_all;
use helpers::{MockNameserver, Zone};

const ROOT: Ipv4Addr = Ipv4Addr::new(127, 0, 0, 2);
const TLD: Ipv4Addr = Ipv4Addr::new(127, 0, 0, 3);
const AUTH: Ipv4Addr = Ipv4Addr::new(127, 0, 0, 4);

/// root -> com -> example.com, all referrals carrying glue, plus a
/// `hosted.com` delegation whose nameserver has no glue.
async fn three_level_tree() -> (u16, Vec<MockNameserver>) {
    let root = Zone::new()
        .delegate("www.example.com", "com", "a.gtld.test", Some(TLD))
        .delegate("alias.example.com", "com", "a.gtld.test", Some(TLD))
        .delegate("app.hosted.com", "com", "a.gtld.test", Some(TLD))
        .answer_a("ns.hosting.test", AUTH, 600);
    let tld = Zone::new()
        .delegate("www.example.com", "example.com", "ns1.example.com", Some(AUTH))
        .delegate("alias.example.com", "example.com", "ns1.example.com", Some(AUTH))
        .delegate("app.hosted.com", "hosted.com", "ns.hosting.test", None);
    let auth = Zone::new()
        .answer_a("www.example.com", Ipv4Addr::new(93, 184, 216, 34), 300)
        .answer_a("app.hosted.com", Ipv4Addr::new(198, 51, 100, 7), 120)
        .answer_cname("alias.example.com", "www.example.com");

    start_all(vec![(ROOT, root), (TLD, tld), (AUTH, auth)]).await
}

fn walk_config(port: u16) -> WalkConfig {
    WalkConfig {
        root_server: IpAddr::V4(ROOT),
        port,
        query_timeout: Duration::from_secs(2),
        ..WalkConfig::default()
    }
}

fn resolver(port: u16) -> IterativeResolver {
    IterativeResolver::new(Arc::new(UdpTransport::default()), walk_config(port))
}

#[tokio::test]
async fn test_a_walk_follows_glue_to_authoritative_answer() {
    let (port, _servers) = three_level_tree().await;

    let resolution = resolver(port)
        .resolve_name("www.example.com", RecordType::A)
        .await
        .unwrap();

    assert_eq!(
        resolution,
        Resolution::Address(IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)))
    );
}

#[tokio::test]
async fn test_ns_request_reports_last_referring_nameserver() {
    let (port, _servers) = three_level_tree().await;

    let resolution = resolver(port)
        .resolve_name("www.example.com", RecordType::NS)
        .await
        .unwrap();

    assert_eq!(resolution.to_string(), "ns1.example.com 127.0.0.4");
}

#[tokio::test]
async fn test_glueless_referral_resolves_nameserver_from_root() {
    let (port, _servers) = three_level_tree().await;

    let resolution = resolver(port)
        .resolve_name("app.hosted.com", RecordType::A)
        .await
        .unwrap();

    assert_eq!(
        resolution,
        Resolution::Address(IpAddr::V4(Ipv4Addr::new(198, 51, 100, 7)))
    );
}

#[tokio::test]
async fn test_cache_file_is_written_and_reused_after_restart() {
    let (port, servers) = three_level_tree().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.json");

    let cache = Arc::new(
        ResolutionCache::load(
            Arc::new(JsonFileCacheStore::new(&path)),
            Arc::new(SystemClock),
        )
        .unwrap(),
    );
    let first = resolver(port).with_cache(cache);
    first
        .resolve_name("app.hosted.com", RecordType::A)
        .await
        .unwrap();

    let document = std::fs::read_to_string(&path).unwrap();
    assert!(document.contains("app.hosted.com"), "{}", document);
    assert!(document.contains("ns.hosting.test"), "{}", document);

    // Every nameserver is gone: only the reloaded cache can answer.
    for server in servers {
        server.shutdown();
    }
    let reloaded = Arc::new(
        ResolutionCache::load(
            Arc::new(JsonFileCacheStore::new(&path)),
            Arc::new(SystemClock),
        )
        .unwrap(),
    );
    let second = resolver(port).with_cache(reloaded);

    let resolution = second
        .resolve_name("app.hosted.com", RecordType::A)
        .await
        .unwrap();
    assert_eq!(
        resolution,
        Resolution::Address(IpAddr::V4(Ipv4Addr::new(198, 51, 100, 7)))
    );
}

#[tokio::test]
async fn test_unreachable_glue_times_out() {
    let root = Zone::new().delegate(
        "dark.example",
        "example",
        "ns.dark.example",
        Some(Ipv4Addr::new(127, 0, 0, 9)),
    );
    let (port, _servers) = start_all(vec![(ROOT, root)]).await;

    let config = WalkConfig {
        query_timeout: Duration::from_millis(200),
        ..walk_config(port)
    };
    let resolver = IterativeResolver::new(Arc::new(UdpTransport::default()), config);

    let err = resolver
        .resolve_name("dark.example", RecordType::A)
        .await
        .unwrap_err();
    assert!(err.is_transport(), "{:?}", err);
}

#[tokio::test]
async fn test_batch_keeps_order_and_isolates_failures() {
    let (port, _servers) = three_level_tree().await;
    let resolver: Arc<dyn DnsResolver> = Arc::new(resolver(port));
    let use_case = ResolveNamesUseCase::new(resolver);

    let names = ["www.example.com", "missing.invalid", "alias.example.com"];
    let outcomes = use_case.execute(&names, RecordType::A).await;

    assert_eq!(outcomes.len(), 3);
    assert_eq!(&*outcomes[0].name, "www.example.com");
    assert!(outcomes[0].result.is_ok());
    assert!(matches!(
        outcomes[1].result,
        Err(DomainError::ResolutionExhausted { .. })
    ));
    // alias.example.com is a CNAME for www.example.com
    assert_eq!(
        outcomes[2].result.as_ref().unwrap(),
        &Resolution::Address(IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)))
    );

    let txt = use_case.execute(&["anything.test"], RecordType::TXT).await;
    match &txt[0].result {
        Ok(Resolution::Text(token)) => assert!(token.parse::<u32>().unwrap() < 10_000),
        other => panic!("unexpected TXT outcome {:?}", other),
    }
}
