#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use fichas::error::{FichaError, Result};
use fichas::{
    AggregateView, Branch, BranchFields, BranchId, BranchNetwork, ChecklistState, CompanyId,
    CompanyProfile, Contact, FichaPayload, NetworkConfig, RemoteStore, TechnicalSheet,
};

/// In-memory store that records every call (method, path, JSON body)
/// and can be told to fail specific endpoints, so tests can assert on
/// write counts, ordering and payloads without a real backend.
#[derive(Default)]
pub struct FakeStore {
    aggregate: Mutex<Option<AggregateView>>,
    calls: Mutex<Vec<RecordedCall>>,
    next_branch_id: AtomicU64,
    pub fail_aggregate: AtomicBool,
    pub fail_branch_write: AtomicBool,
    pub fail_network_write: AtomicBool,
    pub fail_sub_resource_write: AtomicBool,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub endpoint: String,
    pub body: Option<serde_json::Value>,
}

impl FakeStore {
    pub fn with_aggregate(view: AggregateView) -> Self {
        Self {
            aggregate: Mutex::new(Some(view)),
            next_branch_id: AtomicU64::new(100),
            ..Default::default()
        }
    }

    fn record(&self, endpoint: impl Into<String>, body: Option<serde_json::Value>) {
        self.calls.lock().unwrap().push(RecordedCall {
            endpoint: endpoint.into(),
            body,
        });
    }

    fn record_json<B: serde::Serialize>(&self, endpoint: impl Into<String>, body: &B) {
        self.record(endpoint, Some(serde_json::to_value(body).unwrap()));
    }

    /// Endpoints hit, in call order.
    pub fn endpoints(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.endpoint.clone())
            .collect()
    }

    /// Number of calls whose endpoint contains the fragment.
    pub fn count_calls(&self, fragment: &str) -> usize {
        self.endpoints()
            .iter()
            .filter(|e| e.contains(fragment))
            .count()
    }

    /// Number of calls whose endpoint ends with the suffix.
    pub fn count_ending(&self, suffix: &str) -> usize {
        self.endpoints()
            .iter()
            .filter(|e| e.ends_with(suffix))
            .count()
    }

    /// Bodies sent to endpoints containing the fragment, in call order.
    pub fn bodies(&self, fragment: &str) -> Vec<serde_json::Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.endpoint.contains(fragment))
            .filter_map(|c| c.body.clone())
            .collect()
    }

    /// Bodies sent to endpoints ending with the suffix, in call order.
    pub fn bodies_ending(&self, suffix: &str) -> Vec<serde_json::Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.endpoint.ends_with(suffix))
            .filter_map(|c| c.body.clone())
            .collect()
    }

    fn view(&self) -> Result<AggregateView> {
        self.aggregate
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| FichaError::Api("no aggregate configured".to_string()))
    }

    fn failing(&self, flag: &AtomicBool) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(FichaError::Api("internal server error".to_string()));
        }
        Ok(())
    }
}

impl RemoteStore for FakeStore {
    async fn fetch_aggregate(&self, company: CompanyId) -> Result<AggregateView> {
        self.record(format!("GET /ficha-empresa/{company}/completa"), None);
        self.failing(&self.fail_aggregate)?;
        self.view()
    }

    async fn put_checklist(&self, company: CompanyId, checklist: &ChecklistState) -> Result<()> {
        self.record_json(format!("PUT /ficha-empresa/{company}/checklist"), checklist);
        self.failing(&self.fail_sub_resource_write)
    }

    async fn put_ficha(&self, company: CompanyId, payload: &FichaPayload) -> Result<()> {
        self.record_json(format!("PUT /ficha-empresa/{company}/ficha"), payload);
        self.failing(&self.fail_sub_resource_write)
    }

    async fn fetch_technical_sheet(&self, company: CompanyId) -> Result<TechnicalSheet> {
        self.record(format!("GET /ficha-empresa/{company}/ficha-tecnica"), None);
        Ok(self.view()?.technical_sheet)
    }

    async fn put_technical_sheet(&self, company: CompanyId, sheet: &TechnicalSheet) -> Result<()> {
        self.record_json(format!("PUT /ficha-empresa/{company}/ficha-tecnica"), sheet);
        self.failing(&self.fail_sub_resource_write)
    }

    async fn fetch_network(&self, company: CompanyId) -> Result<NetworkConfig> {
        self.record(format!("GET /ficha-empresa/{company}/isp"), None);
        Ok(self.view()?.network)
    }

    async fn put_network(&self, company: CompanyId, network: &NetworkConfig) -> Result<()> {
        self.record_json(format!("PUT /ficha-empresa/{company}/isp"), network);
        self.failing(&self.fail_sub_resource_write)
    }

    async fn list_branches(&self, company: CompanyId) -> Result<Vec<Branch>> {
        self.record(format!("GET /ficha-empresa/{company}/sucursales"), None);
        Ok(self.view()?.branches)
    }

    async fn fetch_branch(&self, branch: BranchId) -> Result<Branch> {
        self.record(format!("GET /ficha-empresa/sucursales/{branch}"), None);
        self.view()?
            .branches
            .into_iter()
            .find(|b| b.id == branch)
            .ok_or_else(|| FichaError::Api("branch not found".to_string()))
    }

    async fn create_branch(&self, company: CompanyId, fields: &BranchFields) -> Result<Branch> {
        self.record_json(format!("POST /ficha-empresa/{company}/sucursales"), fields);
        self.failing(&self.fail_branch_write)?;
        let id = self.next_branch_id.fetch_add(1, Ordering::SeqCst);
        Ok(Branch {
            id: BranchId(id),
            name: fields.name.clone(),
            address: fields.address.clone(),
            phone: fields.phone.clone(),
            contacts: fields.contacts.clone(),
            network: None,
        })
    }

    async fn update_branch(&self, branch: BranchId, fields: &BranchFields) -> Result<Branch> {
        self.record_json(format!("PUT /ficha-empresa/sucursales/{branch}"), fields);
        self.failing(&self.fail_branch_write)?;
        Ok(Branch {
            id: branch,
            name: fields.name.clone(),
            address: fields.address.clone(),
            phone: fields.phone.clone(),
            contacts: fields.contacts.clone(),
            network: None,
        })
    }

    async fn fetch_branch_network(&self, branch: BranchId) -> Result<BranchNetwork> {
        self.record(format!("GET /ficha-empresa/sucursales/{branch}/red"), None);
        Ok(BranchNetwork::default())
    }

    async fn put_branch_network(&self, branch: BranchId, network: &BranchNetwork) -> Result<()> {
        self.record_json(format!("PUT /ficha-empresa/sucursales/{branch}/red"), network);
        self.failing(&self.fail_network_write)
    }
}

/// A representative aggregate for one company.
pub fn sample_aggregate(company: u64) -> AggregateView {
    AggregateView {
        profile: CompanyProfile {
            id: CompanyId(company),
            name: "Acme SA".to_string(),
            legal_name: "Acme Sociedad Anonima".to_string(),
            commercial_conditions: "net 30".to_string(),
            created_at: None,
        },
        checklist: ChecklistState::default(),
        technical_sheet: TechnicalSheet::default(),
        network: NetworkConfig {
            operator: "Fibertel".to_string(),
            ..Default::default()
        },
        contacts: vec![Contact {
            id: Some(1),
            name: "Ana Diaz".to_string(),
            role: "IT".to_string(),
            email: Some("ana@acme.example".to_string()),
            phone: None,
            principal: true,
        }],
        branches: vec![Branch {
            id: BranchId(7),
            name: "Norte".to_string(),
            address: "Calle 1".to_string(),
            phone: "555-0100".to_string(),
            contacts: vec![],
            network: None,
        }],
    }
}
