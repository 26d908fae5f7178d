//! Tests for pagination module

use super::*;
use crate::error::Error;
use crate::test_support::MockTransport;
use serde_json::json;
use std::sync::Arc;
use test_case::test_case;

fn source(transport: &Arc<MockTransport>, page_size: usize) -> PageSource {
    PageSource::new(
        transport.clone(),
        "https://api.example.com/posts/",
        PaginationConfig::page_number(page_size).strategy(),
    )
}

// ============================================================================
// Paginator Tests
// ============================================================================

#[test_case(0, 0, 0 ; "first item")]
#[test_case(39, 0, 39 ; "last item of first page")]
#[test_case(40, 1, 0 ; "first item of second page")]
#[test_case(99, 2, 19 ; "last item")]
fn test_resolve_arithmetic(index: usize, page: usize, offset: usize) {
    let paginator = Paginator::new(40).unwrap();
    let slot = paginator.resolve(index).unwrap();
    assert_eq!(slot, PageSlot { index, page, offset });
}

#[test]
fn test_zero_page_size_rejected() {
    assert!(matches!(Paginator::new(0), Err(Error::Config { .. })));
    assert!(PaginationConfig::page_number(0).validate().is_err());
    assert!(PaginationConfig::limit_offset(10).validate().is_ok());
}

#[test]
fn test_resolve_unbounded_accepts_any_index() {
    let paginator = Paginator::new(40).unwrap();
    assert!(!paginator.is_bounded());
    assert_eq!(paginator.resolve(10_000).unwrap().page, 250);
}

#[test]
fn test_resolve_bounded_rejects_past_max() {
    let mut paginator = Paginator::new(40).unwrap();
    paginator.observe(100);

    assert!(paginator.resolve(99).is_ok());
    let err = paginator.resolve(100).unwrap_err();
    assert!(matches!(err, Error::IndexOutOfRange { index: 100, max: 100 }));
}

#[test]
fn test_resolve_range_spans_pages() {
    let paginator = Paginator::new(40).unwrap();
    let slots: Vec<_> = paginator.resolve_range(35, 45).unwrap().collect();

    assert_eq!(slots.len(), 10);
    assert_eq!(slots[0], PageSlot { index: 35, page: 0, offset: 35 });
    assert_eq!(slots[5], PageSlot { index: 40, page: 1, offset: 0 });
    assert!(slots.windows(2).all(|w| w[0].index < w[1].index));
}

#[test]
fn test_resolve_range_inverted() {
    let paginator = Paginator::new(40).unwrap();
    assert!(matches!(
        paginator.resolve_range(5, 3),
        Err(Error::InvalidSlice { start: 5, stop: 3 })
    ));
}

#[test]
fn test_resolve_range_clamps_once_bounded() {
    let mut paginator = Paginator::new(40).unwrap();
    assert_eq!(paginator.resolve_range(0, 11).unwrap().count(), 11);

    paginator.observe(10);
    assert_eq!(paginator.resolve_range(0, 11).unwrap().count(), 10);
    assert_eq!(paginator.resolve_range(12, 20).unwrap().count(), 0);
}

#[test]
fn test_resolve_range_is_lazy_while_unbounded() {
    let paginator = Paginator::new(40).unwrap();
    let mut slots = paginator.resolve_range(0, usize::MAX).unwrap();

    assert_eq!(slots.next(), Some(PageSlot { index: 0, page: 0, offset: 0 }));
    assert_eq!(
        slots.nth(40),
        Some(PageSlot { index: 41, page: 1, offset: 1 })
    );
}

#[test]
fn test_observe_never_regresses() {
    let mut paginator = Paginator::new(10).unwrap();
    paginator.observe(100);
    paginator.observe(50);
    assert_eq!(paginator.max(), Some(100));

    paginator.observe(120);
    assert_eq!(paginator.max(), Some(120));
}

#[test]
fn test_unpaged_everything_on_page_zero() {
    let paginator = Paginator::for_config(&PaginationConfig::None).unwrap();
    let slot = paginator.resolve(1234).unwrap();
    assert_eq!(slot.page, 0);
    assert_eq!(slot.offset, 1234);
}

// ============================================================================
// Strategy Tests
// ============================================================================

#[test]
fn test_page_number_params() {
    let strategy = PaginationConfig::page_number(40).strategy();
    let params = strategy.page_params(2);
    assert_eq!(params.get("page"), Some(&"3".to_string()));
    assert_eq!(params.get("page_size"), Some(&"40".to_string()));
}

#[test]
fn test_limit_offset_params() {
    let strategy = PaginationConfig::limit_offset(25).strategy();
    let params = strategy.page_params(3);
    assert_eq!(params.get("limit"), Some(&"25".to_string()));
    assert_eq!(params.get("offset"), Some(&"75".to_string()));
}

#[test]
fn test_page_number_parse() {
    let strategy = PaginationConfig::page_number(2).strategy();
    let page = strategy
        .parse(&json!({"count": 7, "results": [{"id": 1}, {"id": 2}]}))
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.total, Some(7));
    assert_eq!(page.get(1), Some(&json!({"id": 2})));
}

#[test]
fn test_parse_custom_paths() {
    let config = PaginationConfig::PageNumber {
        page_param: "p".to_string(),
        page_size_param: "per_page".to_string(),
        page_size: 10,
        start_page: 0,
        results_path: "data.items".to_string(),
        count_path: "meta.total".to_string(),
    };
    let strategy = config.strategy();

    assert_eq!(strategy.page_params(0).get("p"), Some(&"0".to_string()));

    let body = json!({"data": {"items": [{"id": 1}]}, "meta": {"total": "31"}});
    let page = strategy.parse(&body).unwrap();
    assert_eq!(page.total, Some(31));
}

#[test]
fn test_parse_missing_results_is_decode_error() {
    let strategy = PaginationConfig::page_number(10).strategy();
    let err = strategy.parse(&json!({"count": 3})).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));

    let err = strategy.parse(&json!({"results": {"id": 1}})).unwrap_err();
    assert!(err.to_string().contains("Expected an array"));
}

#[test]
fn test_no_pagination_parse() {
    let strategy = PaginationConfig::None.strategy();

    let page = strategy.parse(&json!([{"id": 1}, {"id": 2}, {"id": 3}])).unwrap();
    assert_eq!(page.total, Some(3));

    let page = strategy.parse(&json!({"results": [{"id": 1}]})).unwrap();
    assert_eq!(page.total, Some(1));

    assert!(strategy.parse(&json!("nope")).is_err());
}

#[test]
fn test_pagination_config_yaml() {
    let config: PaginationConfig = serde_yaml::from_str(
        r"
type: page_number
page_size: 40
",
    )
    .unwrap();
    assert_eq!(config, PaginationConfig::page_number(40));

    let config: PaginationConfig = serde_yaml::from_str("type: none").unwrap();
    assert_eq!(config, PaginationConfig::None);
}

// ============================================================================
// Page Cache Tests
// ============================================================================

#[tokio::test]
async fn test_cache_fetches_once_per_page() {
    let transport = Arc::new(MockTransport::paginated(100));
    let source = source(&transport, 40);
    let mut paginator = Paginator::new(40).unwrap();
    let mut cache = PageCache::new();

    let page = cache.get_or_fetch(0, &source, &mut paginator).await.unwrap();
    assert_eq!(page.len(), 40);
    assert_eq!(paginator.max(), Some(100));

    cache.get_or_fetch(0, &source, &mut paginator).await.unwrap();
    cache.get_or_fetch(2, &source, &mut paginator).await.unwrap();
    cache.get_or_fetch(2, &source, &mut paginator).await.unwrap();

    assert_eq!(transport.get_count(), 2);
    assert_eq!(cache.fetch_count(), 2);
    assert_eq!(cache.page_indices().collect::<Vec<_>>(), vec![0, 2]);
    assert_eq!(cache.get(2).unwrap().len(), 20);
}

#[tokio::test]
async fn test_cache_failed_fetch_leaves_no_entry() {
    let transport = Arc::new(MockTransport::paginated(100));
    transport.fail_next(1);
    let source = source(&transport, 40);
    let mut paginator = Paginator::new(40).unwrap();
    let mut cache = PageCache::new();

    let err = cache
        .get_or_fetch(1, &source, &mut paginator)
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert!(cache.is_empty());
    assert!(!paginator.is_bounded());

    cache.get_or_fetch(1, &source, &mut paginator).await.unwrap();
    assert!(cache.contains(1));
    assert_eq!(transport.get_count(), 2);
}

#[tokio::test]
async fn test_cache_short_page_implies_total() {
    let transport = Arc::new(MockTransport::paginated_without_count(50));
    let source = source(&transport, 40);
    let mut paginator = Paginator::new(40).unwrap();
    let mut cache = PageCache::new();

    cache.get_or_fetch(0, &source, &mut paginator).await.unwrap();
    assert!(!paginator.is_bounded());

    cache.get_or_fetch(1, &source, &mut paginator).await.unwrap();
    assert_eq!(paginator.max(), Some(50));
}

#[tokio::test]
async fn test_source_sends_filters_with_page_params() {
    let transport = Arc::new(MockTransport::paginated(10));
    let source = source(&transport, 5).with_param("author", "alice");

    source.fetch(1).await.unwrap();

    let params = transport.last_params().unwrap();
    assert_eq!(params.get("author"), Some(&"alice".to_string()));
    assert_eq!(params.get("page"), Some(&"2".to_string()));
    assert_eq!(transport.last_url().unwrap(), "https://api.example.com/posts/");
}
