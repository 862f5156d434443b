//! Name resolution for app monitors
//!
//! `GetAppMonitor` needs an exact name, and the list API is the only way to
//! confirm a monitor exists before asking for it. The resolver therefore:
//!
//! - pages through `ListAppMonitors` until a summary name matches exactly
//! - stops paging at the first match (first in delivery order wins)
//! - fetches the full monitor by the matched name
//!
//! Every call is raced against the caller's cancellation signal and bounded by
//! the per-call timeout; the whole lookup is optionally bounded by a deadline.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::client::{RumClientError, RumClientTrait};
use crate::error::{LookupError, Result};
use crate::model::AppMonitor;
use crate::tags::IgnoreTagsConfig;

/// Page size requested from `ListAppMonitors`
pub const LIST_APP_MONITORS_MAX_RESULTS: i32 = 100;

/// Configuration for a lookup
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Timeout for each individual API call
    pub api_timeout: Duration,
    /// Optional deadline for the whole lookup
    pub total_timeout: Option<Duration>,
    /// Tags to drop from the output
    pub ignore_tags: IgnoreTagsConfig,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            api_timeout: Duration::from_secs(30),
            total_timeout: None,
            ignore_tags: IgnoreTagsConfig::default(),
        }
    }
}

/// Resolve `name` to its full app monitor
///
/// Summaries are listed [`LIST_APP_MONITORS_MAX_RESULTS`] at a time. When no
/// summary matches, `GetAppMonitor` is never called: an empty-name fetch can
/// only fail, so the lookup returns `NotFound` straight away.
///
/// # Errors
///
/// * [`LookupError::NotFound`] if no summary matches or the fetch carries no monitor
/// * [`LookupError::Transport`] with the client error unchanged if a call fails
/// * [`LookupError::Cancelled`] if `shutdown` flips to `true` before completion
/// * [`LookupError::DeadlineExceeded`] if `total_timeout` elapses
#[instrument(skip(client, config, shutdown))]
pub async fn find_app_monitor_by_name<C>(
    client: &C,
    name: &str,
    config: &LookupConfig,
    shutdown: &mut watch::Receiver<bool>,
) -> Result<AppMonitor>
where
    C: RumClientTrait + ?Sized,
{
    match config.total_timeout {
        Some(deadline) => {
            match tokio::time::timeout(deadline, resolve(client, name, config, shutdown)).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(deadline = ?deadline, "App monitor lookup exceeded deadline");
                    Err(LookupError::DeadlineExceeded(deadline))
                }
            }
        }
        None => resolve(client, name, config, shutdown).await,
    }
}

async fn resolve<C>(
    client: &C,
    name: &str,
    config: &LookupConfig,
    shutdown: &mut watch::Receiver<bool>,
) -> Result<AppMonitor>
where
    C: RumClientTrait + ?Sized,
{
    let mut next_token: Option<String> = None;
    let mut monitor_name: Option<String> = None;
    let mut page_number = 0usize;

    loop {
        if *shutdown.borrow() {
            warn!(page = page_number + 1, "Lookup cancelled before listing page");
            return Err(LookupError::Cancelled);
        }
        page_number += 1;

        let page = guarded_call(
            config.api_timeout,
            shutdown,
            client.list_app_monitors(LIST_APP_MONITORS_MAX_RESULTS, next_token.as_deref()),
        )
        .await?;

        debug!(
            page = page_number,
            summaries = page.summaries.len(),
            has_next = page.next_token.is_some(),
            "Listed app monitor page"
        );

        if let Some(summary) = page.summaries.iter().find(|s| s.name == name) {
            monitor_name = Some(summary.name.clone());
            break;
        }

        match page.next_token {
            // A repeated token would loop forever
            Some(token) if !token.is_empty() && next_token.as_deref() != Some(token.as_str()) => {
                next_token = Some(token);
            }
            _ => break,
        }
    }

    let Some(monitor_name) = monitor_name else {
        debug!(pages = page_number, "No app monitor summary matched");
        return Err(LookupError::not_found(name));
    };

    let monitor = guarded_call(
        config.api_timeout,
        shutdown,
        client.get_app_monitor(&monitor_name),
    )
    .await?;

    match monitor {
        Some(monitor) => {
            info!(id = %monitor.id, pages = page_number, "Resolved app monitor");
            Ok(monitor)
        }
        None => {
            debug!("GetAppMonitor returned no monitor");
            Err(LookupError::not_found(name))
        }
    }
}

/// Run one API call, aborting on cancellation or per-call timeout
async fn guarded_call<T, F>(
    api_timeout: Duration,
    shutdown: &mut watch::Receiver<bool>,
    call: F,
) -> Result<T>
where
    F: Future<Output = std::result::Result<T, RumClientError>>,
{
    tokio::select! {
        biased;
        _ = cancelled(shutdown) => {
            warn!("Lookup cancelled during API call");
            Err(LookupError::Cancelled)
        }
        outcome = tokio::time::timeout(api_timeout, call) => match outcome {
            Ok(result) => result.map_err(LookupError::from),
            Err(_) => Err(LookupError::Transport(RumClientError::Timeout(format!(
                "API call exceeded {:?}",
                api_timeout
            )))),
        },
    }
}

/// Completes once the shutdown flag is `true`; never completes if the sender is gone
async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
