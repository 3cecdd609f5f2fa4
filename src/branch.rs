//! Branch office editing and the two-step save protocol.
//!
//! A branch and its network configuration are two distinct server
//! resources written in a fixed dependency order: the branch first
//! (resolving its id), then the network record addressed by that id.
//! The two writes are not atomic. Step 2 is skipped entirely when the
//! network buffer is blank, so an untouched form never overwrites a
//! previously configured network with empty values. The branch write is
//! never rolled back when the network write fails; that partial state
//! is surfaced as its own outcome arm instead of being collapsed into a
//! binary success/failure.

use crate::editor::EditorState;
use crate::error::{FichaError, Result};
use crate::remote::RemoteStore;
use crate::types::{Branch, BranchFields, BranchId, BranchNetwork, CompanyId, Contact};

/// Edit buffer for a branch form. `id` is absent while creating; the
/// server assigns one in step 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchBuffer {
    pub id: Option<BranchId>,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub contacts: Vec<Contact>,
}

impl BranchBuffer {
    /// Buffer for creating a new branch.
    pub fn create() -> Self {
        Self::default()
    }

    /// Buffer pre-filled from an existing branch.
    pub fn from_branch(branch: &Branch) -> Self {
        Self {
            id: Some(branch.id),
            name: branch.name.clone(),
            address: branch.address.clone(),
            phone: branch.phone.clone(),
            contacts: branch.contacts.clone(),
        }
    }

    /// The step-1 payload: branch fields only, network excluded.
    pub fn fields(&self) -> BranchFields {
        BranchFields {
            name: self.name.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            contacts: self.contacts.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FichaError::Validation(
                "branch name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a branch save whose first step succeeded.
///
/// The step-1 failure case is the `Err` arm of [`save_branch`] itself:
/// nothing was written, the form stays open.
#[derive(Debug)]
pub enum BranchSaveOutcome {
    /// Branch written; the network record was written too, or the
    /// buffer was blank and the write was skipped.
    Saved {
        branch_id: BranchId,
        network_saved: bool,
    },
    /// Branch written durably, but the dependent network write failed.
    /// The two resources are now inconsistent; no automatic retry.
    NetworkFailed {
        branch_id: BranchId,
        error: FichaError,
    },
}

impl BranchSaveOutcome {
    /// The id resolved in step 1, present on every outcome.
    pub fn branch_id(&self) -> BranchId {
        match self {
            BranchSaveOutcome::Saved { branch_id, .. } => *branch_id,
            BranchSaveOutcome::NetworkFailed { branch_id, .. } => *branch_id,
        }
    }
}

/// The two-step branch save.
///
/// 1. `POST` (create) or `PUT` (update) the branch fields; a failure
///    here aborts the whole operation.
/// 2. If any network field is non-blank, one blind `PUT` upsert of the
///    network record, addressed by the id step 1 resolved.
pub async fn save_branch<S: RemoteStore>(
    store: &S,
    company: CompanyId,
    branch: &BranchBuffer,
    network: &BranchNetwork,
) -> Result<BranchSaveOutcome> {
    branch.validate()?;

    let fields = branch.fields();
    let saved = match branch.id {
        Some(id) => store.update_branch(id, &fields).await?,
        None => store.create_branch(company, &fields).await?,
    };
    let branch_id = saved.id;
    tracing::debug!(company = company.0, branch = branch_id.0, "branch written");

    if network.is_blank() {
        return Ok(BranchSaveOutcome::Saved {
            branch_id,
            network_saved: false,
        });
    }

    match store.put_branch_network(branch_id, network).await {
        Ok(()) => Ok(BranchSaveOutcome::Saved {
            branch_id,
            network_saved: true,
        }),
        Err(error) => {
            tracing::warn!(
                branch = branch_id.0,
                %error,
                "branch written but network write failed"
            );
            Ok(BranchSaveOutcome::NetworkFailed { branch_id, error })
        }
    }
}

/// Editor for one branch form plus its network sub-form.
///
/// Follows the same state machine as the single-resource editors, but
/// saving runs the two-step protocol and the edit surface closes on any
/// outcome where step 1 succeeded.
#[derive(Debug, Default)]
pub struct BranchEditor {
    state: EditorState,
    branch: Option<BranchBuffer>,
    network: Option<BranchNetwork>,
}

impl BranchEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Open the form for a new branch with empty buffers.
    pub fn open_create(&mut self) -> Result<()> {
        self.open(BranchBuffer::create(), BranchNetwork::default())
    }

    /// Open the form pre-filled from an existing branch.
    pub fn open_edit(&mut self, branch: &Branch) -> Result<()> {
        let network = branch.network.clone().unwrap_or_default();
        self.open(BranchBuffer::from_branch(branch), network)
    }

    fn open(&mut self, branch: BranchBuffer, network: BranchNetwork) -> Result<()> {
        if self.state != EditorState::Viewing {
            return Err(FichaError::InvalidTransition {
                state: self.state.name(),
                action: "open branch form",
            });
        }
        self.branch = Some(branch);
        self.network = Some(network);
        self.state = EditorState::Editing;
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.branch = None;
        self.network = None;
        self.state = EditorState::Viewing;
    }

    pub fn branch_buffer(&self) -> Option<&BranchBuffer> {
        self.branch.as_ref()
    }

    pub fn network_buffer(&self) -> Option<&BranchNetwork> {
        self.network.as_ref()
    }

    pub fn branch_buffer_mut(&mut self) -> Option<&mut BranchBuffer> {
        match self.state {
            EditorState::Editing => self.branch.as_mut(),
            _ => None,
        }
    }

    pub fn network_buffer_mut(&mut self) -> Option<&mut BranchNetwork> {
        match self.state {
            EditorState::Editing => self.network.as_mut(),
            _ => None,
        }
    }

    /// Run the two-step save. Validation and step-1 failures keep the
    /// form open with both buffers intact; once step 1 has succeeded
    /// the form closes and the outcome reports what happened to the
    /// network record.
    pub async fn save<S: RemoteStore>(
        &mut self,
        store: &S,
        company: CompanyId,
    ) -> Result<BranchSaveOutcome> {
        let (branch, network) = match (self.state, &self.branch, &self.network) {
            (EditorState::Editing, Some(branch), Some(network)) => {
                (branch.clone(), network.clone())
            }
            _ => {
                return Err(FichaError::InvalidTransition {
                    state: self.state.name(),
                    action: "save branch",
                });
            }
        };

        self.state = EditorState::Saving;
        match save_branch(store, company, &branch, &network).await {
            Ok(outcome) => {
                self.branch = None;
                self.network = None;
                self.state = EditorState::Viewing;
                Ok(outcome)
            }
            Err(e) => {
                self.state = EditorState::Editing;
                Err(e)
            }
        }
    }
}
