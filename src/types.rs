//! Data model for the company aggregate and its sub-resources.
//!
//! Everything here mirrors the console backend's JSON wire format
//! (camelCase field names). The aggregate is owned by the cache and is
//! replaced wholesale on refetch, never patched field by field.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::checklist::ChecklistState;

/// Identifier of a company ("empresa").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub u64);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a branch office ("sucursal").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchId(pub u64);

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Commercial profile of a company.
///
/// `created_at` is assigned server-side when the company is first
/// registered and is never written back by this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub id: CompanyId,
    pub name: String,
    #[serde(default)]
    pub legal_name: String,
    #[serde(default)]
    pub commercial_conditions: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Technical datasheet: free-text and date fields grouped into five
/// subsections. Any subset may be absent; there are no cross-field rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicalSheet {
    // Visits
    pub last_visit: Option<String>,
    pub next_visit: Option<String>,
    pub visit_frequency: Option<String>,
    pub visit_notes: Option<String>,
    pub technician: Option<String>,

    // Hardware
    pub server_model: Option<String>,
    pub server_location: Option<String>,
    pub workstation_count: Option<String>,
    pub printer_inventory: Option<String>,
    pub ups_model: Option<String>,

    // Software
    pub operating_systems: Option<String>,
    pub office_suite: Option<String>,
    pub antivirus: Option<String>,
    pub erp_system: Option<String>,
    pub license_notes: Option<String>,

    // Connectivity
    pub provider_link: Option<String>,
    pub bandwidth: Option<String>,
    pub router_model: Option<String>,
    pub internal_wiring: Option<String>,
    pub vpn_access: Option<String>,

    // Backup policy
    pub backup_tool: Option<String>,
    pub backup_schedule: Option<String>,
    pub backup_location: Option<String>,
    pub retention_policy: Option<String>,
    pub last_restore_test: Option<String>,
}

/// Company-level ISP/network record ("ISP/Red"). One-to-one with a company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkConfig {
    pub operator: String,
    pub phone: String,
    pub contracted_service: String,
    pub public_ip: String,
    pub ticket_number: String,
    pub wifi_name: String,
    pub wifi_key: String,
}

/// Branch-level WiFi/network record. Doubles as the edit buffer for the
/// second step of the branch save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BranchNetwork {
    pub wifi_name: String,
    pub wifi_key: String,
    pub ip_address: String,
    pub notes: String,
}

impl BranchNetwork {
    /// True when every field is empty after trimming whitespace. A blank
    /// record must never be written: it would overwrite a previously
    /// configured network with empty values.
    pub fn is_blank(&self) -> bool {
        [&self.wifi_name, &self.wifi_key, &self.ip_address, &self.notes]
            .iter()
            .all(|field| field.trim().is_empty())
    }
}

/// A responsible contact, attached to a company or a branch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub principal: bool,
}

/// Resolve the contact shown as principal.
///
/// The backend does not enforce at-most-one `principal` flag, so several
/// contacts may carry it; the first flagged contact in list order wins.
pub fn principal_contact(contacts: &[Contact]) -> Option<&Contact> {
    contacts.iter().find(|c| c.principal)
}

/// A branch office ("sucursal"). A branch with no network data omits the
/// field on the wire entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<BranchNetwork>,
}

/// The branch fields transmitted in the first step of a branch save.
/// Network fields are excluded by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchFields {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

/// Body of the profile save: identity/commercial fields plus the full
/// contact list, written together to the `ficha` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FichaPayload {
    pub name: String,
    #[serde(default)]
    pub legal_name: String,
    #[serde(default)]
    pub commercial_conditions: String,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

impl FichaPayload {
    /// Build the edit buffer from the cached profile and contact slices.
    pub fn from_view(profile: &CompanyProfile, contacts: &[Contact]) -> Self {
        Self {
            name: profile.name.clone(),
            legal_name: profile.legal_name.clone(),
            commercial_conditions: profile.commercial_conditions.clone(),
            contacts: contacts.to_vec(),
        }
    }
}

/// The full composite record of one company as returned by the
/// `completa` endpoint. All sub-resources belong to the company
/// identified by `profile.id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateView {
    pub profile: CompanyProfile,
    #[serde(default)]
    pub checklist: ChecklistState,
    #[serde(default)]
    pub technical_sheet: TechnicalSheet,
    /// Company-level ISP record; named `detail` on the wire.
    #[serde(default, rename = "detail")]
    pub network: NetworkConfig,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

impl AggregateView {
    /// Owning company of every sub-resource in this view.
    pub fn company_id(&self) -> CompanyId {
        self.profile.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_network_blank_after_trim() {
        let network = BranchNetwork {
            wifi_name: "   ".to_string(),
            wifi_key: "\t".to_string(),
            ip_address: String::new(),
            notes: "  \n".to_string(),
        };
        assert!(network.is_blank());
    }

    #[test]
    fn test_branch_network_single_field_not_blank() {
        let network = BranchNetwork {
            wifi_name: "Guest".to_string(),
            ..Default::default()
        };
        assert!(!network.is_blank());
    }

    #[test]
    fn test_branch_without_network_omits_field() {
        let branch = Branch {
            id: BranchId(3),
            name: "Centro".to_string(),
            address: String::new(),
            phone: String::new(),
            contacts: vec![],
            network: None,
        };
        let json = serde_json::to_value(&branch).unwrap();
        assert!(json.get("network").is_none());
    }

    #[test]
    fn test_principal_contact_first_flagged_wins() {
        let contacts = vec![
            Contact {
                name: "Ana".to_string(),
                ..Default::default()
            },
            Contact {
                name: "Bruno".to_string(),
                principal: true,
                ..Default::default()
            },
            Contact {
                name: "Carla".to_string(),
                principal: true,
                ..Default::default()
            },
        ];
        assert_eq!(principal_contact(&contacts).unwrap().name, "Bruno");
    }

    #[test]
    fn test_aggregate_defaults_for_missing_sections() {
        let json = r#"{"profile":{"id":12,"name":"Acme"}}"#;
        let view: AggregateView = serde_json::from_str(json).unwrap();
        assert_eq!(view.company_id(), CompanyId(12));
        assert!(view.branches.is_empty());
        assert_eq!(view.network, NetworkConfig::default());
    }

    #[test]
    fn test_profile_created_at_parses() {
        let json = r#"{"id":1,"name":"Acme","createdAt":"2024-03-01T10:00:00Z"}"#;
        let profile: CompanyProfile = serde_json::from_str(json).unwrap();
        assert!(profile.created_at.is_some());
    }
}
