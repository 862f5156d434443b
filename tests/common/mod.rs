// tests/common/mod.rs
use rum_app_monitor::test::mocks::MockRumClient;
use rum_app_monitor::test::TestUtils;
use rum_app_monitor::{AppMonitorDataSource, LookupConfig};
use std::sync::Arc;
use tokio::sync::watch;

pub struct TestContext {
    pub client: Arc<MockRumClient>,
    pub source: AppMonitorDataSource<MockRumClient>,
    /// Kept alive so `shutdown_rx` never observes a closed channel
    pub shutdown_tx: watch::Sender<bool>,
    pub shutdown_rx: watch::Receiver<bool>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(TestUtils::fast_config())
    }

    pub fn with_config(config: LookupConfig) -> Self {
        rum_app_monitor::test::init_logging();
        let client = Arc::new(MockRumClient::new());
        let source = AppMonitorDataSource::new(client.clone(), config);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            client,
            source,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// List page `[app-a, app-b]` followed by the sample `app-b` monitor
    pub async fn setup_sample_scenario(&self) {
        self.client
            .mock_list_page(Ok(TestUtils::page(&["app-a", "app-b"], None)))
            .await;
        self.client
            .mock_get_app_monitor(Ok(Some(TestUtils::sample_app_monitor())))
            .await;
    }
}
