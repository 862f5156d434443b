//! RUM App Monitor - read-only lookup of CloudWatch RUM app monitors
//!
//! This crate resolves a CloudWatch RUM app monitor by name and flattens its
//! configuration into the attribute map of an `aws_rum_app_monitor` data source.

pub mod client;
pub mod data_source;
pub mod error;
pub mod model;
pub mod resolver;
pub mod schema;
pub mod tags;

// Make test utilities available for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test;
#[cfg(test)]
mod tests;

pub use error::{LookupError, Result};
pub use resolver::{find_app_monitor_by_name, LookupConfig, LIST_APP_MONITORS_MAX_RESULTS};

// Re-export main traits
pub use crate::client::{ProviderConfig, RumClientError, RumClientTrait};

pub use crate::data_source::{data_source_schema, AppMonitorDataSource, AppMonitorRecord};
pub use crate::model::{AppMonitor, AppMonitorConfiguration, AppMonitorPage, AppMonitorSummary};
pub use crate::tags::IgnoreTagsConfig;
