use crate::client::RumClientError;
use crate::error::LookupError;
use crate::resolver::{find_app_monitor_by_name, LIST_APP_MONITORS_MAX_RESULTS};
use crate::test::mocks::MockRumClient;
use crate::test::{init_logging, TestUtils};
use pretty_assertions::assert_eq;
use std::time::Duration;
use tokio::sync::watch;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_absent_name_is_not_found_across_pages() {
    init_logging();
    let client = MockRumClient::new();
    client
        .mock_list_page(Ok(TestUtils::page(&["app-a", "app-b"], Some("t1"))))
        .await;
    client
        .mock_list_page(Ok(TestUtils::page(&["app-c"], Some("t2"))))
        .await;
    client.mock_list_page(Ok(TestUtils::page(&["app-d"], None))).await;

    let (_tx, mut rx) = watch::channel(false);
    let result =
        find_app_monitor_by_name(&client, "app-z", &TestUtils::fast_config(), &mut rx).await;

    match assert_err!(result) {
        LookupError::NotFound { name } => assert_eq!(name, "app-z"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert_eq!(client.list_request_count(), 3);
    // Tokens are threaded through in order
    let tokens: Vec<_> = client
        .list_requests()
        .into_iter()
        .map(|r| r.next_token)
        .collect();
    assert_eq!(
        tokens,
        vec![None, Some("t1".to_string()), Some("t2".to_string())]
    );
    // Every page is requested at the fixed page size
    assert!(client
        .list_requests()
        .iter()
        .all(|r| r.max_results == LIST_APP_MONITORS_MAX_RESULTS));
    // No fetch is issued for a name that never appeared
    assert!(client.get_requests().is_empty());
}

#[tokio::test]
async fn test_exact_match_only() {
    init_logging();
    let client = MockRumClient::new();
    client
        .mock_list_page(Ok(TestUtils::page(&["app", "app-a-long", "APP-A"], None)))
        .await;

    let (_tx, mut rx) = watch::channel(false);
    let err = find_app_monitor_by_name(&client, "app-a", &TestUtils::fast_config(), &mut rx)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(client.get_requests().is_empty());
}

#[tokio::test]
async fn test_match_on_later_page_returns_fetch_unchanged() {
    init_logging();
    let client = MockRumClient::new();
    client
        .mock_list_page(Ok(TestUtils::page(&["app-a"], Some("t1"))))
        .await;
    client
        .mock_list_page(Ok(TestUtils::page(&["app-x", "app-b"], Some("t2"))))
        .await;
    let expected = TestUtils::sample_app_monitor();
    client.mock_get_app_monitor(Ok(Some(expected.clone()))).await;

    let (_tx, mut rx) = watch::channel(false);
    let monitor = assert_ok!(
        find_app_monitor_by_name(&client, "app-b", &TestUtils::fast_config(), &mut rx).await
    );

    assert_eq!(monitor, expected);
    assert_eq!(client.get_requests(), vec!["app-b".to_string()]);
    // Page with t2 is never requested
    assert_eq!(client.list_request_count(), 2);
}

#[tokio::test]
async fn test_duplicate_name_stops_after_first_page() {
    init_logging();
    let client = MockRumClient::new();
    client
        .mock_list_page(Ok(TestUtils::page(&["dup"], Some("t1"))))
        .await;
    client.mock_list_page(Ok(TestUtils::page(&["dup"], None))).await;
    client
        .mock_get_app_monitor(Ok(Some(TestUtils::app_monitor("first", "dup"))))
        .await;

    let (_tx, mut rx) = watch::channel(false);
    let monitor = find_app_monitor_by_name(&client, "dup", &TestUtils::fast_config(), &mut rx)
        .await
        .unwrap();

    assert_eq!(monitor.id, "first");
    assert_eq!(client.list_request_count(), 1);
}

#[tokio::test]
async fn test_fetch_transport_error_is_returned_verbatim() {
    init_logging();
    let client = MockRumClient::new();
    client.mock_list_page(Ok(TestUtils::page(&["app-a"], None))).await;
    client
        .mock_get_app_monitor(Err(RumClientError::AccessDenied))
        .await;

    let (_tx, mut rx) = watch::channel(false);
    let err = find_app_monitor_by_name(&client, "app-a", &TestUtils::fast_config(), &mut rx)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        LookupError::Transport(RumClientError::AccessDenied)
    ));
}

#[tokio::test]
async fn test_fetch_resource_not_found_is_not_reclassified() {
    init_logging();
    let client = MockRumClient::new();
    client.mock_list_page(Ok(TestUtils::page(&["app-a"], None))).await;
    client
        .mock_get_app_monitor(Err(RumClientError::ResourceNotFound(
            "deleted".to_string(),
        )))
        .await;

    let (_tx, mut rx) = watch::channel(false);
    let err = find_app_monitor_by_name(&client, "app-a", &TestUtils::fast_config(), &mut rx)
        .await
        .unwrap_err();

    assert!(!err.is_not_found());
    assert!(matches!(
        err,
        LookupError::Transport(RumClientError::ResourceNotFound(_))
    ));
}

#[tokio::test]
async fn test_empty_fetch_is_not_found() {
    init_logging();
    let client = MockRumClient::new();
    client.mock_list_page(Ok(TestUtils::page(&["app-a"], None))).await;
    client.mock_get_app_monitor(Ok(None)).await;

    let (_tx, mut rx) = watch::channel(false);
    let err = find_app_monitor_by_name(&client, "app-a", &TestUtils::fast_config(), &mut rx)
        .await
        .unwrap_err();

    match err {
        LookupError::NotFound { name } => assert_eq!(name, "app-a"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert_eq!(client.get_requests(), vec!["app-a".to_string()]);
}

#[tokio::test]
async fn test_list_error_aborts_pagination() {
    init_logging();
    let client = MockRumClient::new();
    client
        .mock_list_page(Ok(TestUtils::page(&["app-a"], Some("t1"))))
        .await;
    client.mock_list_page(Err(RumClientError::Throttling)).await;
    client.mock_list_page(Ok(TestUtils::page(&["app-b"], None))).await;

    let (_tx, mut rx) = watch::channel(false);
    let err = find_app_monitor_by_name(&client, "app-b", &TestUtils::fast_config(), &mut rx)
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Transport(RumClientError::Throttling)));
    assert_eq!(client.list_request_count(), 2);
    assert!(client.get_requests().is_empty());
}

#[tokio::test]
async fn test_cancel_before_second_page() {
    init_logging();
    let client = MockRumClient::new();
    client
        .mock_list_page(Ok(TestUtils::page(&["app-a"], Some("t1"))))
        .await;
    client.mock_list_page(Ok(TestUtils::page(&["app-b"], None))).await;

    let (tx, mut rx) = watch::channel(false);
    client.cancel_after_list_calls(1, tx);

    let err = find_app_monitor_by_name(&client, "app-b", &TestUtils::fast_config(), &mut rx)
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Cancelled));
    assert_eq!(client.list_request_count(), 1);
}

#[tokio::test]
async fn test_cancel_aborts_in_flight_list_call() {
    init_logging();
    let client = MockRumClient::new_with_delay(Duration::from_secs(10));
    client.mock_list_page(Ok(TestUtils::page(&["app-a"], None))).await;

    let (tx, mut rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let _ = tx.send(true);
    });

    let config = crate::resolver::LookupConfig {
        api_timeout: Duration::from_secs(30),
        ..Default::default()
    };
    let started = std::time::Instant::now();
    let err = find_app_monitor_by_name(&client, "app-a", &config, &mut rx)
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(5));
}
