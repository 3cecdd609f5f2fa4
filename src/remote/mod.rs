//! Remote store module.
//!
//! The console backend is reached exclusively through the [`RemoteStore`]
//! trait; [`http::HttpStore`] is the production transport and tests
//! substitute an in-memory fake. Every write carries a JSON body and a
//! non-2xx response is a uniform failure.

pub mod http;

use std::future::Future;

use crate::checklist::ChecklistState;
use crate::error::Result;
use crate::types::{
    AggregateView, Branch, BranchFields, BranchId, BranchNetwork, CompanyId, FichaPayload,
    NetworkConfig, TechnicalSheet,
};

pub use http::HttpStore;

/// Common interface over the company-record resource endpoints.
pub trait RemoteStore: Send + Sync {
    /// Fetch the full composite view of a company.
    fn fetch_aggregate(
        &self,
        company: CompanyId,
    ) -> impl Future<Output = Result<AggregateView>> + Send;

    /// Replace the company checklist. The body always carries the
    /// complete fixed-key map, never a partial patch.
    fn put_checklist(
        &self,
        company: CompanyId,
        checklist: &ChecklistState,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Replace the commercial profile together with the contact list.
    fn put_ficha(
        &self,
        company: CompanyId,
        payload: &FichaPayload,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Fetch the technical datasheet on its own.
    fn fetch_technical_sheet(
        &self,
        company: CompanyId,
    ) -> impl Future<Output = Result<TechnicalSheet>> + Send;

    /// Replace the technical datasheet.
    fn put_technical_sheet(
        &self,
        company: CompanyId,
        sheet: &TechnicalSheet,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Fetch the company-level ISP record on its own.
    fn fetch_network(
        &self,
        company: CompanyId,
    ) -> impl Future<Output = Result<NetworkConfig>> + Send;

    /// Replace the company-level ISP record.
    fn put_network(
        &self,
        company: CompanyId,
        network: &NetworkConfig,
    ) -> impl Future<Output = Result<()>> + Send;

    /// List the branch offices of a company.
    fn list_branches(
        &self,
        company: CompanyId,
    ) -> impl Future<Output = Result<Vec<Branch>>> + Send;

    /// Fetch a single branch office.
    fn fetch_branch(&self, branch: BranchId) -> impl Future<Output = Result<Branch>> + Send;

    /// Create a branch office. The response carries the server-assigned id.
    fn create_branch(
        &self,
        company: CompanyId,
        fields: &BranchFields,
    ) -> impl Future<Output = Result<Branch>> + Send;

    /// Update an existing branch office.
    fn update_branch(
        &self,
        branch: BranchId,
        fields: &BranchFields,
    ) -> impl Future<Output = Result<Branch>> + Send;

    /// Fetch the network record of a branch.
    fn fetch_branch_network(
        &self,
        branch: BranchId,
    ) -> impl Future<Output = Result<BranchNetwork>> + Send;

    /// Blind upsert of the network record of a branch, regardless of
    /// whether one already existed.
    fn put_branch_network(
        &self,
        branch: BranchId,
        network: &BranchNetwork,
    ) -> impl Future<Output = Result<()>> + Send;
}
