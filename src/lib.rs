pub mod branch;
pub mod cache;
pub mod checklist;
pub mod config;
pub mod editor;
pub mod error;
pub mod host;
pub mod remote;
pub mod types;

pub use branch::{BranchBuffer, BranchEditor, BranchSaveOutcome, save_branch};
pub use cache::AggregateCache;
pub use checklist::{CHECKLIST_SECTIONS, ChecklistKey, ChecklistSection, ChecklistState};
pub use config::Config;
pub use editor::{EditorState, SubResource, SubResourceEditor};
pub use error::{FichaError, Result};
pub use host::Console;
pub use remote::{HttpStore, RemoteStore};
pub use types::{
    AggregateView, Branch, BranchFields, BranchId, BranchNetwork, CompanyId, CompanyProfile,
    Contact, FichaPayload, NetworkConfig, TechnicalSheet, principal_contact,
};
