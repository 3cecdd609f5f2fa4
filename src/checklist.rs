//! The company checklist: a closed set of twelve boolean flags grouped
//! into six sections.
//!
//! The key/section grouping lives in one declarative table,
//! [`CHECKLIST_SECTIONS`], consumed by both validation and rendering.
//! The server contract is whole-record replacement: a save always
//! transmits all twelve keys, and keys absent from a server payload
//! default to `false`. Unknown keys are rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FichaError, Result};

/// The six semantic sections of the checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistSection {
    Infrastructure,
    Services,
    Documentation,
    Support,
    Access,
    Planning,
}

impl fmt::Display for ChecklistSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChecklistSection::Infrastructure => "infraestructura",
            ChecklistSection::Services => "servicios",
            ChecklistSection::Documentation => "documentacion",
            ChecklistSection::Support => "soporte",
            ChecklistSection::Access => "accesos",
            ChecklistSection::Planning => "planificacion",
        };
        write!(f, "{}", name)
    }
}

/// The closed enumeration of checklist keys. Exactly these twelve exist;
/// anything else in a payload is a contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChecklistKey {
    InventarioHardware,
    MapaRed,
    ContratoSoporte,
    ServicioBackup,
    InventarioSoftware,
    DocumentacionRed,
    ContactoSoporte,
    HorarioAtencion,
    CredencialesAdmin,
    AccesoRemoto,
    PlanContingencia,
    PlanCrecimiento,
}

impl ChecklistKey {
    /// Wire name of this key, as it appears in JSON payloads.
    pub fn wire_name(&self) -> &'static str {
        match self {
            ChecklistKey::InventarioHardware => "inventarioHardware",
            ChecklistKey::MapaRed => "mapaRed",
            ChecklistKey::ContratoSoporte => "contratoSoporte",
            ChecklistKey::ServicioBackup => "servicioBackup",
            ChecklistKey::InventarioSoftware => "inventarioSoftware",
            ChecklistKey::DocumentacionRed => "documentacionRed",
            ChecklistKey::ContactoSoporte => "contactoSoporte",
            ChecklistKey::HorarioAtencion => "horarioAtencion",
            ChecklistKey::CredencialesAdmin => "credencialesAdmin",
            ChecklistKey::AccesoRemoto => "accesoRemoto",
            ChecklistKey::PlanContingencia => "planContingencia",
            ChecklistKey::PlanCrecimiento => "planCrecimiento",
        }
    }

    /// Section this key belongs to, resolved through the section table.
    pub fn section(&self) -> ChecklistSection {
        for (section, keys) in CHECKLIST_SECTIONS {
            if keys.contains(self) {
                return *section;
            }
        }
        unreachable!("every key appears in CHECKLIST_SECTIONS")
    }
}

impl fmt::Display for ChecklistKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl FromStr for ChecklistKey {
    type Err = FichaError;

    fn from_str(s: &str) -> Result<Self> {
        ALL_KEYS
            .iter()
            .find(|key| key.wire_name() == s)
            .copied()
            .ok_or_else(|| FichaError::Validation(format!("unknown checklist key '{}'", s)))
    }
}

const ALL_KEYS: [ChecklistKey; 12] = [
    ChecklistKey::InventarioHardware,
    ChecklistKey::MapaRed,
    ChecklistKey::ContratoSoporte,
    ChecklistKey::ServicioBackup,
    ChecklistKey::InventarioSoftware,
    ChecklistKey::DocumentacionRed,
    ChecklistKey::ContactoSoporte,
    ChecklistKey::HorarioAtencion,
    ChecklistKey::CredencialesAdmin,
    ChecklistKey::AccesoRemoto,
    ChecklistKey::PlanContingencia,
    ChecklistKey::PlanCrecimiento,
];

/// Section table: ordered keys per section, in display order. The single
/// source of truth for the checklist schema.
pub const CHECKLIST_SECTIONS: &[(ChecklistSection, &[ChecklistKey])] = &[
    (
        ChecklistSection::Infrastructure,
        &[ChecklistKey::InventarioHardware, ChecklistKey::MapaRed],
    ),
    (
        ChecklistSection::Services,
        &[ChecklistKey::ContratoSoporte, ChecklistKey::ServicioBackup],
    ),
    (
        ChecklistSection::Documentation,
        &[
            ChecklistKey::InventarioSoftware,
            ChecklistKey::DocumentacionRed,
        ],
    ),
    (
        ChecklistSection::Support,
        &[ChecklistKey::ContactoSoporte, ChecklistKey::HorarioAtencion],
    ),
    (
        ChecklistSection::Access,
        &[ChecklistKey::CredencialesAdmin, ChecklistKey::AccesoRemoto],
    ),
    (
        ChecklistSection::Planning,
        &[ChecklistKey::PlanContingencia, ChecklistKey::PlanCrecimiento],
    ),
];

/// The complete checklist record. Serialization always carries every key;
/// deserialization fills missing keys with `false` and rejects unknown
/// ones, so the key set is the fixed enumeration regardless of how
/// partial the server payload was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ChecklistState {
    pub inventario_hardware: bool,
    pub mapa_red: bool,
    pub contrato_soporte: bool,
    pub servicio_backup: bool,
    pub inventario_software: bool,
    pub documentacion_red: bool,
    pub contacto_soporte: bool,
    pub horario_atencion: bool,
    pub credenciales_admin: bool,
    pub acceso_remoto: bool,
    pub plan_contingencia: bool,
    pub plan_crecimiento: bool,
}

impl ChecklistState {
    pub fn get(&self, key: ChecklistKey) -> bool {
        match key {
            ChecklistKey::InventarioHardware => self.inventario_hardware,
            ChecklistKey::MapaRed => self.mapa_red,
            ChecklistKey::ContratoSoporte => self.contrato_soporte,
            ChecklistKey::ServicioBackup => self.servicio_backup,
            ChecklistKey::InventarioSoftware => self.inventario_software,
            ChecklistKey::DocumentacionRed => self.documentacion_red,
            ChecklistKey::ContactoSoporte => self.contacto_soporte,
            ChecklistKey::HorarioAtencion => self.horario_atencion,
            ChecklistKey::CredencialesAdmin => self.credenciales_admin,
            ChecklistKey::AccesoRemoto => self.acceso_remoto,
            ChecklistKey::PlanContingencia => self.plan_contingencia,
            ChecklistKey::PlanCrecimiento => self.plan_crecimiento,
        }
    }

    /// Toggle support for the editor: mutates exactly one key.
    pub fn set(&mut self, key: ChecklistKey, value: bool) {
        match key {
            ChecklistKey::InventarioHardware => self.inventario_hardware = value,
            ChecklistKey::MapaRed => self.mapa_red = value,
            ChecklistKey::ContratoSoporte => self.contrato_soporte = value,
            ChecklistKey::ServicioBackup => self.servicio_backup = value,
            ChecklistKey::InventarioSoftware => self.inventario_software = value,
            ChecklistKey::DocumentacionRed => self.documentacion_red = value,
            ChecklistKey::ContactoSoporte => self.contacto_soporte = value,
            ChecklistKey::HorarioAtencion => self.horario_atencion = value,
            ChecklistKey::CredencialesAdmin => self.credenciales_admin = value,
            ChecklistKey::AccesoRemoto => self.acceso_remoto = value,
            ChecklistKey::PlanContingencia => self.plan_contingencia = value,
            ChecklistKey::PlanCrecimiento => self.plan_crecimiento = value,
        }
    }

    /// All keys with their values, in section table order.
    pub fn entries(&self) -> impl Iterator<Item = (ChecklistKey, bool)> + '_ {
        CHECKLIST_SECTIONS
            .iter()
            .flat_map(|(_, keys)| keys.iter())
            .map(|key| (*key, self.get(*key)))
    }
}
