//! The `aws_rum_app_monitor` data source
//!
//! Reads `app_monitor_name` from the attribute store, resolves the monitor and
//! writes every computed attribute back. The typed [`AppMonitorRecord`] is
//! built first; conversion to generic attributes happens only in
//! [`AppMonitorRecord::write_to`].

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::client::RumClientTrait;
use crate::error::{LookupError, Result};
use crate::model::AppMonitor;
use crate::resolver::{find_app_monitor_by_name, LookupConfig};
use crate::schema::{
    AttributeSchema, AttributeType, AttributeValue, ResourceData, ScalarType, Schema,
};
use crate::tags::IgnoreTagsConfig;

/// Type name the host engine registers this data source under
pub const DATA_SOURCE_TYPE_NAME: &str = "aws_rum_app_monitor";

pub const APP_MONITOR_NAME: &str = "app_monitor_name";
pub const ALLOW_COOKIES: &str = "allow_cookies";
pub const ENABLE_XRAY: &str = "enable_xray";
pub const EXCLUDED_PAGES: &str = "excluded_pages";
pub const GUEST_ROLE_ARN: &str = "guest_role_arn";
pub const IDENTITY_POOL_ID: &str = "identity_pool_id";
pub const INCLUDED_PAGES: &str = "included_pages";
pub const SESSION_SAMPLE_RATE: &str = "session_sample_rate";
pub const TELEMETRIES: &str = "telemetries";
pub const DOMAIN: &str = "domain";
pub const TAGS: &str = "tags";

/// Attribute declarations of the data source
pub fn data_source_schema() -> Schema {
    use AttributeType::{List, Map, Scalar};

    Schema::new()
        .attribute(
            APP_MONITOR_NAME,
            AttributeSchema::required(Scalar(ScalarType::String)),
        )
        .attribute(ALLOW_COOKIES, AttributeSchema::computed(Scalar(ScalarType::Bool)))
        .attribute(ENABLE_XRAY, AttributeSchema::computed(Scalar(ScalarType::Bool)))
        .attribute(EXCLUDED_PAGES, AttributeSchema::computed(List(ScalarType::String)))
        .attribute(GUEST_ROLE_ARN, AttributeSchema::computed(Scalar(ScalarType::String)))
        .attribute(IDENTITY_POOL_ID, AttributeSchema::computed(Scalar(ScalarType::String)))
        .attribute(INCLUDED_PAGES, AttributeSchema::computed(List(ScalarType::String)))
        .attribute(
            SESSION_SAMPLE_RATE,
            AttributeSchema::computed(Scalar(ScalarType::Float)),
        )
        .attribute(TELEMETRIES, AttributeSchema::computed(List(ScalarType::String)))
        .attribute(DOMAIN, AttributeSchema::computed(Scalar(ScalarType::String)))
        .attribute(TAGS, AttributeSchema::computed(Map(ScalarType::String)))
}

/// Typed output of one read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppMonitorRecord {
    pub id: String,
    pub allow_cookies: bool,
    pub enable_xray: bool,
    pub excluded_pages: Vec<String>,
    pub guest_role_arn: String,
    pub identity_pool_id: String,
    pub included_pages: Vec<String>,
    pub session_sample_rate: f64,
    pub telemetries: Vec<String>,
    pub domain: String,
    pub tags: BTreeMap<String, String>,
}

impl AppMonitorRecord {
    pub fn from_app_monitor(monitor: &AppMonitor, ignore_tags: &IgnoreTagsConfig) -> Self {
        let config = &monitor.configuration;
        Self {
            id: monitor.id.clone(),
            allow_cookies: config.allow_cookies,
            enable_xray: config.enable_xray,
            excluded_pages: config.excluded_pages.clone(),
            guest_role_arn: config.guest_role_arn.clone(),
            identity_pool_id: config.identity_pool_id.clone(),
            included_pages: config.included_pages.clone(),
            session_sample_rate: config.session_sample_rate,
            telemetries: config.telemetries.clone(),
            domain: monitor.domain.clone(),
            tags: ignore_tags.apply(&monitor.tags),
        }
    }

    /// Write every computed attribute; the first failing field aborts and
    /// leaves `data` untouched
    pub fn write_to(&self, data: &mut ResourceData) -> Result<()> {
        let mut staged = data.clone();
        staged.set_id(self.id.clone());

        let scalars: [(&'static str, AttributeValue); 7] = [
            (ALLOW_COOKIES, self.allow_cookies.into()),
            (ENABLE_XRAY, self.enable_xray.into()),
            (GUEST_ROLE_ARN, self.guest_role_arn.as_str().into()),
            (IDENTITY_POOL_ID, self.identity_pool_id.as_str().into()),
            (SESSION_SAMPLE_RATE, self.session_sample_rate.into()),
            (DOMAIN, self.domain.as_str().into()),
            (TAGS, self.tags.clone().into()),
        ];
        for (field, value) in scalars {
            staged
                .set(field, value)
                .map_err(|e| LookupError::field(field, e))?;
        }

        let lists = [
            (EXCLUDED_PAGES, &self.excluded_pages),
            (INCLUDED_PAGES, &self.included_pages),
            (TELEMETRIES, &self.telemetries),
        ];
        for (field, values) in lists {
            staged
                .set(field, values.clone())
                .map_err(|e| LookupError::field(field, e))?;
        }

        *data = staged;
        Ok(())
    }
}

/// Read-only data source backed by an injected RUM client
pub struct AppMonitorDataSource<C>
where
    C: RumClientTrait + ?Sized,
{
    client: Arc<C>,
    config: LookupConfig,
}

impl<C> AppMonitorDataSource<C>
where
    C: RumClientTrait + ?Sized,
{
    pub fn new(client: Arc<C>, config: LookupConfig) -> Self {
        Self { client, config }
    }

    pub fn schema(&self) -> Schema {
        data_source_schema()
    }

    /// Fresh attribute store with `app_monitor_name` supplied
    pub fn resource_data(&self, app_monitor_name: &str) -> Result<ResourceData> {
        let mut data = ResourceData::new(self.schema());
        data.set_input(APP_MONITOR_NAME, app_monitor_name)
            .map_err(|e| LookupError::field(APP_MONITOR_NAME, e))?;
        Ok(data)
    }

    /// Resolve `name` into the typed record without touching an attribute store
    pub async fn lookup(
        &self,
        name: &str,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<AppMonitorRecord> {
        if name.is_empty() {
            return Err(LookupError::InvalidInput(format!(
                "{} must not be empty",
                APP_MONITOR_NAME
            )));
        }

        let monitor =
            find_app_monitor_by_name(self.client.as_ref(), name, &self.config, shutdown).await?;
        Ok(AppMonitorRecord::from_app_monitor(
            &monitor,
            &self.config.ignore_tags,
        ))
    }

    /// Populate `data` from the monitor named by its `app_monitor_name` input
    #[instrument(skip_all, fields(data_source = DATA_SOURCE_TYPE_NAME))]
    pub async fn read(
        &self,
        data: &mut ResourceData,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<()> {
        data.validate_inputs()
            .map_err(|e| LookupError::InvalidInput(e.to_string()))?;
        let name = data
            .get_string(APP_MONITOR_NAME)
            .ok_or_else(|| {
                LookupError::InvalidInput(format!("{} must be a string", APP_MONITOR_NAME))
            })?
            .to_string();

        let record = self.lookup(&name, shutdown).await?;
        record.write_to(data)?;

        debug!(name = %name, id = %record.id, "Read app monitor data source");
        Ok(())
    }
}
