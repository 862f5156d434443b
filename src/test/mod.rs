//! Test utilities and mock implementations for testing the app monitor lookup


use crate::model::{AppMonitor, AppMonitorConfiguration, AppMonitorPage, AppMonitorSummary};
use crate::resolver::LookupConfig;
use std::sync::Once;
use std::time::Duration;

static INIT: Once = Once::new();

/// Install a test-writer subscriber once per process
pub fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive("rum_app_monitor=debug".parse().unwrap()),
            )
            .with_test_writer()
            .with_file(true)
            .with_line_number(true)
            .try_init()
            .ok();
    });
}

/// Helper functions for creating test data
pub struct TestUtils;

impl TestUtils {
    pub fn summary(name: &str) -> AppMonitorSummary {
        AppMonitorSummary {
            name: name.to_string(),
        }
    }

    /// A list page with the given names, in order
    pub fn page(names: &[&str], next_token: Option<&str>) -> AppMonitorPage {
        AppMonitorPage {
            summaries: names.iter().map(|n| Self::summary(n)).collect(),
            next_token: next_token.map(String::from),
        }
    }

    pub fn app_monitor(id: &str, name: &str) -> AppMonitor {
        AppMonitor {
            id: id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// The `app-b` monitor used by the end-to-end scenarios
    pub fn sample_app_monitor() -> AppMonitor {
        AppMonitor {
            id: "abc123".to_string(),
            name: "app-b".to_string(),
            domain: "example.com".to_string(),
            configuration: AppMonitorConfiguration {
                allow_cookies: true,
                session_sample_rate: 0.1,
                excluded_pages: vec!["/admin".to_string()],
                included_pages: vec![],
                telemetries: vec!["errors".to_string(), "performance".to_string()],
                ..Default::default()
            },
            tags: Default::default(),
        }
    }

    /// Lookup config with short timeouts
    pub fn fast_config() -> LookupConfig {
        LookupConfig {
            api_timeout: Duration::from_secs(1),
            total_timeout: Some(Duration::from_secs(5)),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_keeps_order() {
        let page = TestUtils::page(&["b", "a", "c"], Some("next"));
        let names: Vec<_> = page.summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(page.next_token.as_deref(), Some("next"));
    }

    #[test]
    fn test_fast_config_timeouts() {
        let config = TestUtils::fast_config();
        assert_eq!(config.api_timeout, Duration::from_secs(1));
        assert_eq!(config.total_timeout, Some(Duration::from_secs(5)));
    }
}
