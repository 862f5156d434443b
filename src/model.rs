//! Domain types for CloudWatch RUM app monitors
//!
//! These are owned copies of the SDK shapes with optional fields already
//! defaulted, so the resolver and flattener never deal with `Option` noise.

use std::collections::BTreeMap;

use aws_sdk_rum::types as sdk;

/// Name-only record returned by the list API
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppMonitorSummary {
    pub name: String,
}

/// One page of a `ListAppMonitors` response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppMonitorPage {
    pub summaries: Vec<AppMonitorSummary>,
    /// Token for the following page; `None` on the last page
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppMonitorConfiguration {
    pub allow_cookies: bool,
    pub enable_xray: bool,
    pub excluded_pages: Vec<String>,
    pub included_pages: Vec<String>,
    pub guest_role_arn: String,
    pub identity_pool_id: String,
    pub session_sample_rate: f64,
    /// Enabled telemetry types, e.g. `errors`, `performance`, `http`
    pub telemetries: Vec<String>,
}

/// Full app monitor as returned by `GetAppMonitor`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppMonitor {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub configuration: AppMonitorConfiguration,
    pub tags: BTreeMap<String, String>,
}

impl From<sdk::AppMonitorSummary> for AppMonitorSummary {
    fn from(summary: sdk::AppMonitorSummary) -> Self {
        Self {
            name: summary.name.unwrap_or_default(),
        }
    }
}

impl From<sdk::AppMonitorConfiguration> for AppMonitorConfiguration {
    fn from(config: sdk::AppMonitorConfiguration) -> Self {
        Self {
            // SDK releases disagree on whether these members are optional
            allow_cookies: Option::<bool>::from(config.allow_cookies).unwrap_or_default(),
            enable_xray: Option::<bool>::from(config.enable_x_ray).unwrap_or_default(),
            excluded_pages: config.excluded_pages.unwrap_or_default(),
            included_pages: config.included_pages.unwrap_or_default(),
            guest_role_arn: config.guest_role_arn.unwrap_or_default(),
            identity_pool_id: config.identity_pool_id.unwrap_or_default(),
            session_sample_rate: Option::<f64>::from(config.session_sample_rate)
                .unwrap_or_default(),
            telemetries: config
                .telemetries
                .unwrap_or_default()
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
        }
    }
}

impl From<sdk::AppMonitor> for AppMonitor {
    fn from(monitor: sdk::AppMonitor) -> Self {
        Self {
            id: monitor.id.unwrap_or_default(),
            name: monitor.name.unwrap_or_default(),
            domain: monitor.domain.unwrap_or_default(),
            configuration: monitor
                .app_monitor_configuration
                .map(AppMonitorConfiguration::from)
                .unwrap_or_default(),
            tags: monitor.tags.unwrap_or_default().into_iter().collect(),
        }
    }
}
