//! CloudWatch RUM client seam
//!
//! The resolver only ever talks to [`RumClientTrait`]. The trait is implemented
//! for the real `aws_sdk_rum::Client` here and for `MockRumClient` in the test
//! utilities.

use crate::model::{AppMonitor, AppMonitorPage, AppMonitorSummary};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_rum::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_rum::Client;
use aws_smithy_types::error::display::DisplayErrorContext;
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

/// Failures raised by the underlying RUM API calls
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RumClientError {
    #[error("Access denied")]
    AccessDenied,

    #[error("Request throttled")]
    Throttling,

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("{0}")]
    Other(String),
}

impl<E, R> From<SdkError<E, R>> for RumClientError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: fmt::Debug + Send + Sync + 'static,
{
    fn from(err: SdkError<E, R>) -> Self {
        match &err {
            SdkError::TimeoutError(_) => {
                RumClientError::Timeout(DisplayErrorContext(&err).to_string())
            }
            SdkError::DispatchFailure(_) => {
                RumClientError::ConnectionError(DisplayErrorContext(&err).to_string())
            }
            SdkError::ServiceError(service) => {
                let service_err = service.err();
                let message = service_err.message().unwrap_or_default().to_string();
                match service_err.code() {
                    Some("AccessDeniedException") => RumClientError::AccessDenied,
                    Some("ThrottlingException") => RumClientError::Throttling,
                    Some("ResourceNotFoundException") => RumClientError::ResourceNotFound(message),
                    Some("ValidationException") => RumClientError::Validation(message),
                    _ => RumClientError::Other(DisplayErrorContext(&err).to_string()),
                }
            }
            _ => RumClientError::Other(DisplayErrorContext(&err).to_string()),
        }
    }
}

#[async_trait]
pub trait RumClientTrait: Send + Sync {
    /// Fetch one page of app monitor summaries
    async fn list_app_monitors(
        &self,
        max_results: i32,
        next_token: Option<&str>,
    ) -> Result<AppMonitorPage, RumClientError>;

    /// Fetch the full app monitor by exact name. `Ok(None)` means the call
    /// succeeded but carried no monitor.
    async fn get_app_monitor(&self, name: &str) -> Result<Option<AppMonitor>, RumClientError>;
}

#[async_trait]
impl RumClientTrait for Client {
    async fn list_app_monitors(
        &self,
        max_results: i32,
        next_token: Option<&str>,
    ) -> Result<AppMonitorPage, RumClientError> {
        let response = self
            .list_app_monitors()
            .max_results(max_results)
            .set_next_token(next_token.map(String::from))
            .send()
            .await?;

        let summaries: Vec<AppMonitorSummary> = response
            .app_monitor_summaries
            .unwrap_or_default()
            .into_iter()
            .map(AppMonitorSummary::from)
            .collect();

        trace!(count = summaries.len(), "Received app monitor summaries");

        Ok(AppMonitorPage {
            summaries,
            next_token: response.next_token,
        })
    }

    async fn get_app_monitor(&self, name: &str) -> Result<Option<AppMonitor>, RumClientError> {
        let response = self.get_app_monitor().name(name).send().await?;
        Ok(response.app_monitor.map(AppMonitor::from))
    }
}

/// Static access keys, used instead of the default credential chain
#[derive(Clone)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &self.session_token.as_ref().map(|_| "** redacted **"))
            .finish()
    }
}

/// How to build the authenticated RUM client handed to the data source
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Region override; falls back to the default provider chain
    pub region: Option<String>,
    /// Named profile from the shared config files
    pub profile: Option<String>,
    /// Custom endpoint, e.g. for a local stub
    pub endpoint_url: Option<String>,
    pub static_credentials: Option<StaticCredentials>,
}

impl ProviderConfig {
    pub async fn load_client(&self) -> Client {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        if let Some(creds) = &self.static_credentials {
            loader = loader.credentials_provider(Credentials::new(
                creds.access_key_id.clone(),
                creds.secret_access_key.clone(),
                creds.session_token.clone(),
                None,
                "rum-app-monitor-static",
            ));
        }

        let sdk_config = loader.load().await;
        debug!(
            region = ?sdk_config.region(),
            profile = ?self.profile,
            "Loaded AWS configuration for RUM client"
        );

        Client::new(&sdk_config)
    }
}
