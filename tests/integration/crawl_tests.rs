//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use keyword_crawler::config::{BackoffKind, Config};
use keyword_crawler::crawler::{CrawlObserver, Crawler, Fetcher, SkipReason};
use keyword_crawler::output::CrawlStatistics;
use keyword_crawler::session::{run_session, CrawlRequest};
use keyword_crawler::FetchError;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration without throttling or retry delays
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.crawler.min_host_interval_ms = 0;
    config.fetcher.max_retries = 0;
    config.fetcher.backoff = BackoffKind::None;
    config.fetcher.timeout_secs = 5;
    config
}

/// Builds an HTML page linking to the given hrefs
fn page(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body><main><p>{} has enough words to count as content.</p>{}</main></body></html>",
        title, title, anchors
    )
}

/// Mounts a page that must be requested exactly `times` times
async fn mount_page(server: &MockServer, route: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(times)
        .mount(server)
        .await;
}

fn urls(server: &MockServer, routes: &[&str]) -> Vec<String> {
    routes
        .iter()
        .map(|route| format!("{}{}", server.uri(), route))
        .collect()
}

#[tokio::test]
async fn test_cycle_fetches_each_page_once() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("A", &["/b"]), 1).await;
    mount_page(&server, "/b", page("B", &["/"]), 1).await;

    let crawler = Crawler::new(&create_test_config()).unwrap();
    let report = crawler.crawl(&server.uri(), 2).await;

    assert_eq!(report.urls(), urls(&server, &["/", "/b"]));
    assert_eq!(report.stats.pages_fetched, 2);
    assert_eq!(report.stats.skipped_visited, 1);
    assert!(!report.is_partial());
}

#[tokio::test]
async fn test_depth_zero_fetches_only_start_page() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", &["/a"]), 1).await;
    mount_page(&server, "/a", page("A", &[]), 0).await;

    let crawler = Crawler::new(&create_test_config()).unwrap();
    let report = crawler.crawl(&server.uri(), 0).await;

    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.pages[0].title.as_deref(), Some("Home"));
    assert_eq!(report.pages[0].depth, 0);
}

#[tokio::test]
async fn test_depth_first_order() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", &["/b", "/a"]), 1).await;
    mount_page(&server, "/a", page("A", &["/a/deep"]), 1).await;
    mount_page(&server, "/a/deep", page("Deep", &["/a/deeper"]), 1).await;
    mount_page(&server, "/b", page("B", &[]), 1).await;
    mount_page(&server, "/a/deeper", page("Deeper", &[]), 0).await;

    let crawler = Crawler::new(&create_test_config()).unwrap();
    let report = crawler.crawl(&server.uri(), 2).await;

    assert_eq!(report.urls(), urls(&server, &["/", "/a", "/a/deep", "/b"]));
    let depths: Vec<u32> = report.pages.iter().map(|p| p.depth).collect();
    assert_eq!(depths, vec![0, 1, 2, 1]);
}

#[tokio::test]
async fn test_external_links_not_followed() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        page("Home", &["http://external.invalid/page", "#top"]),
        1,
    )
    .await;

    let crawler = Crawler::new(&create_test_config()).unwrap();
    let report = crawler.crawl(&server.uri(), 3).await;

    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.visited, urls(&server, &["/"]));
}

#[tokio::test]
async fn test_retry_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/", page("Home", &[]), 1).await;

    let mut config = create_test_config();
    config.fetcher.max_retries = 2;

    let crawler = Crawler::new(&config).unwrap();
    let report = crawler.crawl(&server.uri(), 1).await;

    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.stats.fetch_failures, 0);
}

#[tokio::test]
async fn test_failed_page_is_dropped_and_crawl_continues() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", &["/broken", "/ok"]), 1).await;
    mount_page(&server, "/ok", page("Ok", &["/broken"]), 1).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let mut config = create_test_config();
    config.fetcher.max_retries = 1;

    let crawler = Crawler::new(&config).unwrap();
    let report = crawler.crawl(&server.uri(), 2).await;

    assert_eq!(report.urls(), urls(&server, &["/", "/ok"]));
    assert_eq!(report.stats.fetch_failures, 1);
    assert!(report.visited.contains(&format!("{}/broken", server.uri())));
}

#[tokio::test]
async fn test_unreachable_start_page_yields_empty_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let crawler = Crawler::new(&create_test_config()).unwrap();
    let report = crawler.crawl(&server.uri(), 2).await;

    assert!(report.pages.is_empty());
    assert_eq!(report.stats.fetch_failures, 1);
}

#[tokio::test]
async fn test_concurrent_crawl_has_no_duplicates() {
    let server = MockServer::start().await;
    let all = ["/", "/a", "/b", "/c"];
    for route in all {
        mount_page(&server, route, page(route, &all), 1).await;
    }

    let mut config = create_test_config();
    config.crawler.max_concurrent_fetches = 4;

    let crawler = Crawler::new(&config).unwrap();
    let report = crawler.crawl(&server.uri(), 3).await;

    let unique: HashSet<&str> = report.urls().into_iter().collect();
    assert_eq!(report.pages.len(), 4);
    assert_eq!(unique.len(), 4);
    assert_eq!(report.pages[0].url, format!("{}/", server.uri()));
}

#[tokio::test]
async fn test_page_limit_stops_crawl() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", &["/a", "/b", "/c"]), 1).await;
    mount_page(&server, "/a", page("A", &[]), 1).await;
    mount_page(&server, "/b", page("B", &[]), 0).await;
    mount_page(&server, "/c", page("C", &[]), 0).await;

    let mut config = create_test_config();
    config.crawler.max_pages = 2;

    let crawler = Crawler::new(&config).unwrap();
    let report = crawler.crawl(&server.uri(), 1).await;

    assert_eq!(report.urls(), urls(&server, &["/", "/a"]));
    assert!(report.stats.page_limit_hit);
    assert!(report.is_partial());
}

#[tokio::test]
async fn test_cancelled_crawl_returns_partial_report() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", &["/slow"]), 1).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page("Slow", &[]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        trigger.cancel();
    });

    let crawler = Crawler::new(&create_test_config()).unwrap();
    let report = crawler.crawl_with_cancel(&server.uri(), 1, cancel).await;

    assert_eq!(report.urls(), urls(&server, &["/"]));
    assert!(report.stats.cancelled);
}

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl CrawlObserver for RecordingObserver {
    fn on_crawl_target(&self, url: &str, remaining_depth: u32) {
        self.push(format!("target {} {}", url, remaining_depth));
    }

    fn on_fetch_failed(&self, url: &str, _error: &FetchError) {
        self.push(format!("failed {}", url));
    }

    fn on_skipped(&self, url: &str, reason: SkipReason) {
        self.push(format!("skipped {} ({})", url, reason));
    }

    fn on_finished(&self, stats: &CrawlStatistics) {
        self.push(format!("finished {}", stats.pages_fetched));
    }
}

impl RecordingObserver {
    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

#[tokio::test]
async fn test_observer_receives_crawl_events() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("A", &["/b"]), 1).await;
    mount_page(&server, "/b", page("B", &["/"]), 1).await;

    let observer = Arc::new(RecordingObserver::default());
    let crawler = Crawler::new(&create_test_config())
        .unwrap()
        .with_observer(observer.clone());
    crawler.crawl(&server.uri(), 2).await;

    let base = server.uri();
    let events = observer.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            format!("target {}/ 2", base),
            format!("target {}/b 1", base),
            format!("skipped {}/ (already visited)", base),
            "finished 2".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_fetcher_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "keyword-crawler-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = create_test_config().fetcher;
    config.user_agent = "keyword-crawler-test/1.0".to_string();
    let fetcher = Fetcher::new(&config).unwrap();
    assert_eq!(fetcher.fetch(&server.uri()).await.unwrap(), "ok");
}

#[tokio::test]
async fn test_fetcher_reports_exhausted_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let mut config = create_test_config().fetcher;
    config.max_retries = 2;
    let fetcher = Fetcher::new(&config).unwrap();

    match fetcher.fetch(&server.uri()).await {
        Err(FetchError::Exhausted {
            attempts,
            last_error,
            ..
        }) => {
            assert_eq!(attempts, 3);
            assert!(last_error.contains("500"));
        }
        other => panic!("expected exhausted fetch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_page_limit_skips_each_unvisited_url_once() {
    let server = MockServer::start().await;
    mount_page(&server, "/", page("Home", &["/a", "/b"]), 1).await;
    mount_page(&server, "/a", page("A", &["/", "/b"]), 1).await;
    mount_page(&server, "/b", page("B", &[]), 0).await;

    let mut config = create_test_config();
    config.crawler.max_pages = 2;

    let observer = Arc::new(RecordingObserver::default());
    let crawler = Crawler::new(&config)
        .unwrap()
        .with_observer(observer.clone());
    let report = crawler.crawl(&server.uri(), 2).await;
    assert!(report.stats.page_limit_hit);

    let base = server.uri();
    let events = observer.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            format!("target {}/ 2", base),
            format!("target {}/a 1", base),
            format!("skipped {}/b (page limit reached)", base),
            "finished 2".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_fetcher_times_out_slow_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("too late")
                .set_delay(Duration::from_secs(3)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut config = create_test_config().fetcher;
    config.timeout_secs = 1;
    let fetcher = Fetcher::new(&config).unwrap();

    let start = Instant::now();
    match fetcher.fetch(&server.uri()).await {
        Err(FetchError::Exhausted {
            attempts,
            last_error,
            ..
        }) => {
            assert_eq!(attempts, 1);
            assert_eq!(last_error, "Request timeout");
        }
        other => panic!("expected timed out fetch, got {:?}", other),
    }
    assert!(start.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_fetcher_waits_between_attempts_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let mut config = create_test_config().fetcher;
    config.max_retries = 2;
    config.backoff = BackoffKind::Linear;
    config.backoff_base_ms = 200;
    let fetcher = Fetcher::new(&config).unwrap();

    let start = Instant::now();
    let result = fetcher.fetch(&server.uri()).await;
    let elapsed = start.elapsed();

    assert!(matches!(result, Err(FetchError::Exhausted { attempts: 3, .. })));
    // 200ms after the first failure, 400ms after the second, none after the last
    assert!(elapsed >= Duration::from_millis(600), "took {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(1200), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_session_highlights_terms() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        "<html><body><nav>Rust Rust Rust navigation that should be ignored</nav><main><p>Rust gives memory safety without a garbage collector.</p></main></body></html>".to_string(),
        1,
    )
    .await;

    let request = CrawlRequest::new(&server.uri(), 1, "rust, safety").unwrap();
    let output = run_session(&create_test_config(), &request, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(output.views.len(), 1);
    assert_eq!(
        output.views[0].snippet,
        "<mark>Rust</mark> gives memory <mark>safety</mark> without a garbage collector."
    );
}
