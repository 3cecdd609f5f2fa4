//! Client-side cache of one company's aggregate view.
//!
//! The cache is the single shared mutable resource within an open
//! company view. It is replaced wholesale on every refetch; editors
//! never mutate it directly, only through a successful remote write
//! followed by invalidation. No optimistic local patching happens here:
//! server-computed derived fields (timestamps, assigned ids) would
//! otherwise diverge from what the client guesses.

use jiff::Timestamp;

use crate::error::{FichaError, Result};
use crate::remote::RemoteStore;
use crate::types::{AggregateView, CompanyId};

/// Holds the currently displayed composite view of one company.
///
/// The version counter bumps on every successful replacement, so
/// editors can detect staleness deterministically instead of relying
/// on re-render timing.
#[derive(Debug, Default)]
pub struct AggregateCache {
    company: Option<CompanyId>,
    view: Option<AggregateView>,
    version: u64,
    refreshed_at: Option<Timestamp>,
}

impl AggregateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the full composite for a company, replacing any existing
    /// cached view unconditionally. Verifies that the returned
    /// aggregate is owned by the requested company before accepting it.
    pub async fn load<S: RemoteStore>(
        &mut self,
        store: &S,
        company: CompanyId,
    ) -> Result<&AggregateView> {
        let view = store.fetch_aggregate(company).await?;
        if view.company_id() != company {
            return Err(FichaError::CompanyMismatch {
                expected: company.0,
                found: view.company_id().0,
            });
        }

        self.company = Some(company);
        self.version += 1;
        self.refreshed_at = Some(Timestamp::now());
        tracing::debug!(company = company.0, version = self.version, "aggregate replaced");

        Ok(self.view.insert(view))
    }

    /// Re-run the load for the cached company. No-op returning the
    /// current view when no company is loaded. On failure the last
    /// good view is kept and the error is returned to the caller.
    pub async fn invalidate<S: RemoteStore>(
        &mut self,
        store: &S,
    ) -> Result<Option<&AggregateView>> {
        let Some(company) = self.company else {
            return Ok(self.view.as_ref());
        };

        self.load(store, company).await.map(Some)
    }

    /// The cached view, if a company is loaded and its initial fetch
    /// has completed.
    pub fn current(&self) -> Option<&AggregateView> {
        self.view.as_ref()
    }

    /// The company whose aggregate is (being) cached.
    pub fn company(&self) -> Option<CompanyId> {
        self.company
    }

    /// Monotonic counter of successful replacements.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Instant of the last successful refetch.
    pub fn refreshed_at(&self) -> Option<Timestamp> {
        self.refreshed_at
    }

    /// Discard the view when the company selection changes or the host
    /// view closes. Nothing survives navigation away.
    pub fn clear(&mut self) {
        self.company = None;
        self.view = None;
        self.refreshed_at = None;
    }
}
