// Copyright 2026 The anf contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Waiters.
//!
//! Everything here is built on [poll_until](fn.poll_until.html): call a lookup,
//! classify the result, sleep, repeat until the classifier gives a final answer,
//! the deadline passes or the wait is cancelled.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use static_assertions::assert_impl_all;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use super::protocol::ProvisioningState;
use super::types::{Provisioned, Refresh};
use crate::{Error, ErrorKind, Result};

/// Default delay between two lookups.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(10);

/// Default maximum time to wait.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Shortest delay between two lookups, smaller delays are raised to it.
pub const MIN_DELAY: Duration = Duration::from_millis(10);

/// How the delay between lookups changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backoff {
    /// The delay stays the same.
    #[default]
    Fixed,
    /// The delay is multiplied by `factor` after every tick, up to `max_delay`.
    Exponential {
        /// Multiplier applied after each tick.
        factor: u32,
        /// Upper bound for the delay.
        max_delay: Duration,
    },
}

impl Backoff {
    fn next_delay(&self, current: Duration) -> Duration {
        match *self {
            Backoff::Fixed => current,
            Backoff::Exponential { factor, max_delay } => {
                current.saturating_mul(factor.max(1)).min(max_delay)
            }
        }
    }
}

/// A single lookup that did not end the wait.
#[derive(Debug, Clone)]
pub struct Tick<'a> {
    /// Resource being waited for.
    pub resource: &'a str,
    /// Number of the lookup, starting with 1.
    pub attempt: u32,
    /// Time since the wait started.
    pub elapsed: Duration,
    /// Observed status or the lookup error.
    pub detail: String,
}

type ProgressCallback = Arc<dyn Fn(&Tick<'_>) + Send + Sync>;

/// Timing and control options of a wait.
#[derive(Clone)]
pub struct WaitOptions {
    delay: Duration,
    timeout: Duration,
    backoff: Backoff,
    cancellation: Option<CancellationToken>,
    progress: Option<ProgressCallback>,
}

assert_impl_all!(WaitOptions: Send, Sync);

impl fmt::Debug for WaitOptions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("WaitOptions")
            .field("delay", &self.delay)
            .field("timeout", &self.timeout)
            .field("backoff", &self.backoff)
            .field("cancellable", &self.cancellation.is_some())
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl Default for WaitOptions {
    fn default() -> WaitOptions {
        WaitOptions::new(DEFAULT_DELAY, DEFAULT_TIMEOUT)
    }
}

impl WaitOptions {
    /// Create options with a fixed delay and a timeout.
    ///
    /// A delay below [MIN_DELAY](constant.MIN_DELAY.html) is raised to it.
    pub fn new(delay: Duration, timeout: Duration) -> WaitOptions {
        WaitOptions {
            delay: delay.max(MIN_DELAY),
            timeout,
            backoff: Backoff::Fixed,
            cancellation: None,
            progress: None,
        }
    }

    /// Change how the delay evolves between lookups.
    #[inline]
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Stop waiting once the token is cancelled.
    #[inline]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Call `callback` after every lookup that did not end the wait.
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Tick<'_>) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(callback));
        self
    }

    /// Initial delay between lookups.
    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Maximum time to wait.
    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Backoff policy.
    #[inline]
    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .map(|t| t.is_cancelled())
            .unwrap_or(false)
    }

    fn notify(&self, tick: &Tick<'_>) {
        if let Some(ref callback) = self.progress {
            callback(tick);
        }
    }
}

/// Outcome of classifying a single lookup.
#[derive(Debug)]
pub enum Verdict<T> {
    /// The wait is over.
    Ready(T),
    /// Not there yet, the string describes the current status.
    Pending(String),
    /// The lookup itself failed, try again.
    Retry(Error),
    /// The resource will never get to the desired state.
    Failed(String),
}

/// Reason a wait has ended without success.
#[derive(Debug, Clone)]
pub enum WaitError {
    /// Deadline reached before a final state was observed.
    TimedOut {
        /// Resource being waited for.
        resource: String,
        /// Time spent waiting.
        elapsed: Duration,
        /// Error of the last lookup, if it failed.
        last_error: Option<Error>,
    },
    /// The resource reached a failure state.
    Failed {
        /// Resource being waited for.
        resource: String,
        /// Reported state.
        state: String,
    },
    /// The wait was cancelled.
    Cancelled {
        /// Resource being waited for.
        resource: String,
        /// Time spent waiting.
        elapsed: Duration,
    },
}

impl WaitError {
    /// Resource the wait was for.
    pub fn resource(&self) -> &str {
        match self {
            WaitError::TimedOut { resource, .. }
            | WaitError::Failed { resource, .. }
            | WaitError::Cancelled { resource, .. } => resource,
        }
    }

    /// Error kind this maps to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WaitError::TimedOut { .. } => ErrorKind::OperationTimedOut,
            WaitError::Failed { .. } => ErrorKind::OperationFailed,
            WaitError::Cancelled { .. } => ErrorKind::OperationCancelled,
        }
    }
}

impl fmt::Display for WaitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WaitError::TimedOut {
                resource,
                elapsed,
                last_error,
            } => {
                write!(f, "Timeout waiting for resource {} after {:?}", resource, elapsed)?;
                if let Some(err) = last_error {
                    write!(f, " (last error: {})", err)?;
                }
                Ok(())
            }
            WaitError::Failed { resource, state } => {
                write!(f, "Resource {} got into {} state", resource, state)
            }
            WaitError::Cancelled { resource, elapsed } => {
                write!(f, "Waiting for resource {} cancelled after {:?}", resource, elapsed)
            }
        }
    }
}

impl ::std::error::Error for WaitError {
    fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
        match self {
            WaitError::TimedOut {
                last_error: Some(err),
                ..
            } => Some(err),
            _ => None,
        }
    }
}

impl From<WaitError> for Error {
    fn from(value: WaitError) -> Error {
        Error::new(value.kind(), value.to_string())
    }
}

async fn cancelled(token: Option<&CancellationToken>) {
    match token {
        Some(t) => t.cancelled().await,
        None => ::std::future::pending().await,
    }
}

/// Poll `fetch` until `classify` gives a final answer.
///
/// Lookups never overlap. Between them the task sleeps for the current delay
/// (at least [MIN_DELAY](constant.MIN_DELAY.html)), never past the deadline.
/// A zero timeout fails without calling `fetch`.
pub async fn poll_until<O, T, F, Fut, C>(
    resource: &str,
    options: &WaitOptions,
    mut fetch: F,
    mut classify: C,
) -> ::std::result::Result<T, WaitError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<O>>,
    C: FnMut(Result<O>) -> Verdict<T>,
{
    let started = Instant::now();
    let token = options.cancellation.as_ref();
    let mut delay = options.delay.max(MIN_DELAY);
    let mut last_error = None;
    let mut attempt = 0;

    loop {
        let elapsed = started.elapsed();
        if options.is_cancelled() {
            debug!("Waiting for resource {} was cancelled", resource);
            return Err(WaitError::Cancelled {
                resource: resource.to_string(),
                elapsed,
            });
        }

        if elapsed >= options.timeout {
            debug!(
                "Timeout waiting for resource {} after {} attempt(s)",
                resource, attempt
            );
            return Err(WaitError::TimedOut {
                resource: resource.to_string(),
                elapsed,
                last_error,
            });
        }

        attempt += 1;
        let observation = match time::timeout(options.timeout - elapsed, fetch()).await {
            Ok(value) => value,
            Err(..) => {
                debug!("Lookup of resource {} did not finish in time", resource);
                return Err(WaitError::TimedOut {
                    resource: resource.to_string(),
                    elapsed: started.elapsed(),
                    last_error,
                });
            }
        };

        let detail = match classify(observation) {
            Verdict::Ready(value) => {
                debug!(
                    "Resource {} is ready after {} attempt(s)",
                    resource, attempt
                );
                return Ok(value);
            }
            Verdict::Failed(state) => {
                debug!("Resource {} got into {} state", resource, state);
                return Err(WaitError::Failed {
                    resource: resource.to_string(),
                    state,
                });
            }
            Verdict::Pending(status) => {
                trace!(
                    "Still waiting for resource {}, current status is {}",
                    resource,
                    status
                );
                last_error = None;
                status
            }
            Verdict::Retry(err) => {
                debug!("Lookup of resource {} failed, will retry: {}", resource, err);
                let detail = err.to_string();
                last_error = Some(err);
                detail
            }
        };

        let elapsed = started.elapsed();
        options.notify(&Tick {
            resource,
            attempt,
            elapsed,
            detail,
        });

        let pause = delay.min(options.timeout.saturating_sub(elapsed));
        tokio::select! {
            _ = time::sleep(pause) => {}
            _ = cancelled(token) => {
                debug!("Waiting for resource {} was cancelled", resource);
                return Err(WaitError::Cancelled {
                    resource: resource.to_string(),
                    elapsed: started.elapsed(),
                });
            }
        }
        delay = options.backoff.next_delay(delay).max(MIN_DELAY);
    }
}

/// Expected final states of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Convergence {
    ready: ProvisioningState,
    failures: Vec<ProvisioningState>,
}

impl Default for Convergence {
    fn default() -> Convergence {
        Convergence::provisioning()
    }
}

impl Convergence {
    /// Wait for `ready`, give up on any of `failures`.
    pub fn new<I>(ready: ProvisioningState, failures: I) -> Convergence
    where
        I: IntoIterator<Item = ProvisioningState>,
    {
        Convergence {
            ready,
            failures: failures.into_iter().collect(),
        }
    }

    /// Wait for `Succeeded`, give up on `Failed` or `Canceled`.
    pub fn provisioning() -> Convergence {
        Convergence::new(ProvisioningState::STABLE, ProvisioningState::FAILURES)
    }

    /// State that ends the wait successfully.
    #[inline]
    pub fn ready(&self) -> ProvisioningState {
        self.ready
    }

    /// States that end the wait with a failure.
    #[inline]
    pub fn failures(&self) -> &[ProvisioningState] {
        &self.failures
    }

    /// Classify a lookup result.
    ///
    /// A resource that is not found is a failure: it cannot converge anymore.
    pub fn classify<O: Provisioned>(&self, observation: Result<O>) -> Verdict<O> {
        match observation {
            Ok(value) => {
                let state = value.provisioning_state();
                if state == self.ready {
                    Verdict::Ready(value)
                } else if self.failures.contains(&state) {
                    Verdict::Failed(state.to_string())
                } else {
                    Verdict::Pending(state.to_string())
                }
            }
            Err(ref e) if e.kind() == ErrorKind::ResourceNotFound => {
                Verdict::Failed(String::from("NotFound"))
            }
            Err(e) => Verdict::Retry(e),
        }
    }
}

/// Wait for a resource to converge to the ready state.
pub async fn wait_for_state<O, F, Fut>(
    resource: &str,
    options: &WaitOptions,
    convergence: &Convergence,
    fetch: F,
) -> ::std::result::Result<O, WaitError>
where
    O: Provisioned,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<O>>,
{
    poll_until(resource, options, fetch, |observation| {
        convergence.classify(observation)
    })
    .await
}

/// Wait for a resource to disappear.
///
/// `fetch` reports whether the resource still exists. A `ResourceNotFound`
/// error is also taken as absence.
pub async fn wait_for_absence<F, Fut>(
    resource: &str,
    options: &WaitOptions,
    fetch: F,
) -> ::std::result::Result<(), WaitError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    poll_until(resource, options, fetch, |observation| match observation {
        Ok(false) => Verdict::Ready(()),
        Ok(true) => Verdict::Pending(String::from("exists")),
        Err(ref e) if e.kind() == ErrorKind::ResourceNotFound => Verdict::Ready(()),
        Err(e) => Verdict::Retry(e),
    })
    .await
}

/// Wait for a resource to finish provisioning.
#[derive(Debug)]
pub struct ProvisioningWaiter<T> {
    inner: T,
    resource: String,
    options: WaitOptions,
    convergence: Convergence,
}

impl<T> ProvisioningWaiter<T> {
    pub(crate) fn new<S: Into<String>>(inner: T, resource: S) -> ProvisioningWaiter<T> {
        ProvisioningWaiter {
            inner,
            resource: resource.into(),
            options: WaitOptions::default(),
            convergence: Convergence::provisioning(),
        }
    }

    /// Use these options instead of the defaults.
    #[inline]
    pub fn with_options(mut self, options: WaitOptions) -> Self {
        self.options = options;
        self
    }

    /// Use different ready and failure states.
    #[inline]
    pub fn with_convergence(mut self, convergence: Convergence) -> Self {
        self.convergence = convergence;
        self
    }

    /// Resource as returned by the last request.
    #[inline]
    pub fn current_state(&self) -> &T {
        &self.inner
    }

    /// Give up waiting and return the resource as is.
    #[inline]
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> ProvisioningWaiter<T>
where
    T: Refresh + Provisioned + Clone + Send + Sync,
{
    /// Wait for the resource to converge and return its fresh representation.
    pub async fn wait(self) -> Result<T> {
        let last = self.inner;
        wait_for_state(&self.resource, &self.options, &self.convergence, || {
            let mut fresh = last.clone();
            async move { fresh.refresh().await.map(|()| fresh) }
        })
        .await
        .map_err(Error::from)
    }

    /// Wait with the provided options.
    #[inline]
    pub async fn wait_with(self, options: WaitOptions) -> Result<T> {
        self.with_options(options).wait().await
    }
}

/// Wait for resource deletion.
#[derive(Debug)]
pub struct DeletionWaiter<T> {
    inner: T,
    resource: String,
    options: WaitOptions,
}

impl<T> DeletionWaiter<T> {
    pub(crate) fn new<S: Into<String>>(inner: T, resource: S) -> DeletionWaiter<T> {
        DeletionWaiter {
            inner,
            resource: resource.into(),
            options: WaitOptions::default(),
        }
    }

    /// Use these options instead of the defaults.
    #[inline]
    pub fn with_options(mut self, options: WaitOptions) -> Self {
        self.options = options;
        self
    }

    /// Resource as it was before deletion was requested.
    #[inline]
    pub fn current_state(&self) -> &T {
        &self.inner
    }
}

impl<T> DeletionWaiter<T>
where
    T: Refresh + Clone + Send + Sync,
{
    /// Wait for the resource to disappear.
    pub async fn wait(self) -> Result<()> {
        let last = self.inner;
        wait_for_absence(&self.resource, &self.options, || {
            let mut fresh = last.clone();
            async move { fresh.refresh().await.map(|()| true) }
        })
        .await
        .map_err(Error::from)
    }

    /// Wait with the provided options.
    #[inline]
    pub async fn wait_with(self, options: WaitOptions) -> Result<()> {
        self.with_options(options).wait().await
    }
}
