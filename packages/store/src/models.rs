//! # Domain models for profiles, elevators and parts
//!
//! Defines the records exchanged with the backend. Every type is
//! `Serialize + Deserialize` so it can be decoded straight from REST rows and
//! RPC payloads, and `PartialEq` so views can diff them cheaply.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Role`] | Closed set of account roles. Drives tenant scoping and dashboard routing. |
//! | [`Profile`] | The `profiles` row for the signed-in user, with flat role-specific columns. |
//! | [`RoleDetails`] | Tagged projection of the role-specific columns, one case per [`Role`]. |
//! | [`Elevator`] / [`ElevatorStatus`] | A tenant-scoped elevator record. |
//! | [`ElevatorPart`] / [`PartStatus`] | A part belonging to exactly one elevator. |
//! | [`Building`] | Building referenced by an elevator, fetched in bulk. |
//! | [`ElevatorInput`] / [`PartInput`] | Validated payloads for create and update. |
//! | [`RpcResult`] | `{ success, data, message }` envelope returned by named procedures. |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// Account role stored on the profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Company,
    CompanyAdmin,
    Technician,
    BuildingManager,
    Admin,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Company,
        Role::CompanyAdmin,
        Role::Technician,
        Role::BuildingManager,
        Role::Admin,
    ];

    /// Roles a visitor may pick on the registration form.
    pub const SELF_REGISTERABLE: [Role; 3] = [Role::Company, Role::Technician, Role::BuildingManager];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Company => "company",
            Role::CompanyAdmin => "company_admin",
            Role::Technician => "technician",
            Role::BuildingManager => "building_manager",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Company => "Company",
            Role::CompanyAdmin => "Company administrator",
            Role::Technician => "Technician",
            Role::BuildingManager => "Building manager",
            Role::Admin => "Administrator",
        }
    }

    /// Whether elevator fetches carry the caller's company as a scoping hint.
    pub fn is_company_scoped(&self) -> bool {
        matches!(self, Role::Company | Role::CompanyAdmin)
    }

    /// Path segment of the role's dashboard: `/dashboard/<slug>`.
    pub fn dashboard_slug(&self) -> &'static str {
        match self {
            Role::Company | Role::CompanyAdmin => "company",
            Role::Technician => "technician",
            Role::BuildingManager => "building-manager",
            Role::Admin => "admin",
        }
    }

    pub fn dashboard_route(&self) -> String {
        format!("/dashboard/{}", self.dashboard_slug())
    }
}

/// Row of the `profiles` table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub certification_number: Option<String>,
    #[serde(default)]
    pub managed_building: Option<String>,
}

/// Role-specific profile fields, one case per [`Role`].
#[derive(Clone, Debug, PartialEq)]
pub enum RoleDetails {
    Company { company_name: String, address: String },
    CompanyAdmin { company_name: String },
    Technician { specialization: String, certification_number: String },
    BuildingManager { managed_building: String },
    Admin,
}

impl RoleDetails {
    pub fn role(&self) -> Role {
        match self {
            RoleDetails::Company { .. } => Role::Company,
            RoleDetails::CompanyAdmin { .. } => Role::CompanyAdmin,
            RoleDetails::Technician { .. } => Role::Technician,
            RoleDetails::BuildingManager { .. } => Role::BuildingManager,
            RoleDetails::Admin => Role::Admin,
        }
    }

    /// Empty details for a role.
    pub fn empty(role: Role) -> Self {
        match role {
            Role::Company => RoleDetails::Company {
                company_name: String::new(),
                address: String::new(),
            },
            Role::CompanyAdmin => RoleDetails::CompanyAdmin {
                company_name: String::new(),
            },
            Role::Technician => RoleDetails::Technician {
                specialization: String::new(),
                certification_number: String::new(),
            },
            Role::BuildingManager => RoleDetails::BuildingManager {
                managed_building: String::new(),
            },
            Role::Admin => RoleDetails::Admin,
        }
    }
}

impl Profile {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or("Unnamed user")
    }

    /// Project the flat role columns into the tagged variant for the profile's role.
    /// Returns `None` while the profile has no role yet.
    pub fn details(&self) -> Option<RoleDetails> {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Some(match self.role? {
            Role::Company => RoleDetails::Company {
                company_name: text(&self.company_name),
                address: text(&self.address),
            },
            Role::CompanyAdmin => RoleDetails::CompanyAdmin {
                company_name: text(&self.company_name),
            },
            Role::Technician => RoleDetails::Technician {
                specialization: text(&self.specialization),
                certification_number: text(&self.certification_number),
            },
            Role::BuildingManager => RoleDetails::BuildingManager {
                managed_building: text(&self.managed_building),
            },
            Role::Admin => RoleDetails::Admin,
        })
    }

    /// Write role details back into the flat columns. The role itself is
    /// never changed from the client.
    pub fn with_details(mut self, details: &RoleDetails) -> Self {
        let opt = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        match details {
            RoleDetails::Company {
                company_name,
                address,
            } => {
                self.company_name = opt(company_name);
                self.address = opt(address);
            }
            RoleDetails::CompanyAdmin { company_name } => {
                self.company_name = opt(company_name);
            }
            RoleDetails::Technician {
                specialization,
                certification_number,
            } => {
                self.specialization = opt(specialization);
                self.certification_number = opt(certification_number);
            }
            RoleDetails::BuildingManager { managed_building } => {
                self.managed_building = opt(managed_building);
            }
            RoleDetails::Admin => {}
        }
        self
    }
}

/// Columns the profile form is allowed to change.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub specialization: Option<String>,
    pub certification_number: Option<String>,
    pub managed_building: Option<String>,
}

impl From<&Profile> for ProfileUpdate {
    fn from(p: &Profile) -> Self {
        Self {
            full_name: p.full_name.clone().unwrap_or_default(),
            phone: p.phone.clone(),
            avatar_url: p.avatar_url.clone(),
            company_name: p.company_name.clone(),
            address: p.address.clone(),
            specialization: p.specialization.clone(),
            certification_number: p.certification_number.clone(),
            managed_building: p.managed_building.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElevatorStatus {
    Operational,
    Maintenance,
    OutOfOrder,
}

impl ElevatorStatus {
    pub const ALL: [ElevatorStatus; 3] = [
        ElevatorStatus::Operational,
        ElevatorStatus::Maintenance,
        ElevatorStatus::OutOfOrder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElevatorStatus::Operational => "operational",
            ElevatorStatus::Maintenance => "maintenance",
            ElevatorStatus::OutOfOrder => "out_of_order",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ElevatorStatus::Operational => "Operational",
            ElevatorStatus::Maintenance => "Maintenance",
            ElevatorStatus::OutOfOrder => "Out of order",
        }
    }
}

/// Tenant-scoped elevator record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Elevator {
    pub id: String,
    #[serde(default)]
    pub company_id: Option<String>,
    pub serial_number: String,
    pub model: String,
    pub capacity: u32,
    pub status: ElevatorStatus,
    #[serde(default)]
    pub building_id: Option<String>,
    #[serde(default)]
    pub last_inspection: Option<NaiveDate>,
    #[serde(default)]
    pub next_inspection: Option<NaiveDate>,
}

/// Payload for creating or updating an elevator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElevatorInput {
    pub serial_number: String,
    pub model: String,
    pub capacity: u32,
    pub status: ElevatorStatus,
    pub building_id: Option<String>,
    pub last_inspection: Option<NaiveDate>,
    pub next_inspection: Option<NaiveDate>,
}

impl ElevatorInput {
    /// Materialise the input as a record with the given id and company.
    pub fn into_elevator(self, id: String, company_id: Option<String>) -> Elevator {
        Elevator {
            id,
            company_id,
            serial_number: self.serial_number,
            model: self.model,
            capacity: self.capacity,
            status: self.status,
            building_id: self.building_id,
            last_inspection: self.last_inspection,
            next_inspection: self.next_inspection,
        }
    }
}

impl From<&Elevator> for ElevatorInput {
    fn from(e: &Elevator) -> Self {
        Self {
            serial_number: e.serial_number.clone(),
            model: e.model.clone(),
            capacity: e.capacity,
            status: e.status,
            building_id: e.building_id.clone(),
            last_inspection: e.last_inspection,
            next_inspection: e.next_inspection,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartStatus {
    Operational,
    NeedsMaintenance,
    Defective,
}

impl PartStatus {
    pub const ALL: [PartStatus; 3] = [
        PartStatus::Operational,
        PartStatus::NeedsMaintenance,
        PartStatus::Defective,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartStatus::Operational => "operational",
            PartStatus::NeedsMaintenance => "needs_maintenance",
            PartStatus::Defective => "defective",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PartStatus::Operational => "Operational",
            PartStatus::NeedsMaintenance => "Needs maintenance",
            PartStatus::Defective => "Defective",
        }
    }
}

/// A part installed in one elevator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElevatorPart {
    pub id: String,
    pub elevator_id: String,
    pub name: String,
    pub part_number: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub installation_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_maintenance_date: Option<NaiveDate>,
    pub status: PartStatus,
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for creating or updating a part.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartInput {
    pub name: String,
    pub part_number: String,
    pub manufacturer: Option<String>,
    pub installation_date: Option<NaiveDate>,
    pub last_maintenance_date: Option<NaiveDate>,
    pub status: PartStatus,
    pub description: Option<String>,
}

impl PartInput {
    pub fn into_part(self, id: String, elevator_id: String) -> ElevatorPart {
        ElevatorPart {
            id,
            elevator_id,
            name: self.name,
            part_number: self.part_number,
            manufacturer: self.manufacturer,
            installation_date: self.installation_date,
            last_maintenance_date: self.last_maintenance_date,
            status: self.status,
            description: self.description,
        }
    }
}

impl From<&ElevatorPart> for PartInput {
    fn from(p: &ElevatorPart) -> Self {
        Self {
            name: p.name.clone(),
            part_number: p.part_number.clone(),
            manufacturer: p.manufacturer.clone(),
            installation_date: p.installation_date,
            last_maintenance_date: p.last_maintenance_date,
            status: p.status,
            description: p.description.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Envelope returned by every named remote procedure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RpcResult<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> RpcResult<T> {
    /// Unwrap the payload. A failed call becomes [`BackendError::Remote`]
    /// carrying the server's message; a successful call without data is a
    /// decode error.
    pub fn into_result(self) -> Result<T, BackendError> {
        if !self.success {
            return Err(BackendError::Remote(self.message.unwrap_or_default()));
        }
        self.data
            .ok_or_else(|| BackendError::Decode("successful call returned no data".to_string()))
    }

    /// For procedures whose success carries no payload.
    pub fn into_unit(self) -> Result<(), BackendError> {
        if self.success {
            Ok(())
        } else {
            Err(BackendError::Remote(self.message.unwrap_or_default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_roundtrips_through_snake_case() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("janitor"), None);
    }

    #[test]
    fn only_company_roles_are_scoped() {
        assert!(Role::Company.is_company_scoped());
        assert!(Role::CompanyAdmin.is_company_scoped());
        assert!(!Role::Technician.is_company_scoped());
        assert!(!Role::BuildingManager.is_company_scoped());
        assert!(!Role::Admin.is_company_scoped());
        assert_eq!(Role::CompanyAdmin.dashboard_route(), "/dashboard/company");
        assert_eq!(Role::BuildingManager.dashboard_route(), "/dashboard/building-manager");
    }

    #[test]
    fn profile_details_follow_role() {
        let profile = Profile {
            id: "u1".into(),
            role: Some(Role::Technician),
            specialization: Some("Hydraulics".into()),
            company_name: Some("ignored".into()),
            ..Default::default()
        };
        assert_eq!(
            profile.details(),
            Some(RoleDetails::Technician {
                specialization: "Hydraulics".into(),
                certification_number: String::new(),
            })
        );

        let updated = profile.with_details(&RoleDetails::Technician {
            specialization: " Traction ".into(),
            certification_number: "".into(),
        });
        assert_eq!(updated.specialization.as_deref(), Some("Traction"));
        assert_eq!(updated.certification_number, None);
        assert_eq!(updated.company_name.as_deref(), Some("ignored"));
    }

    #[test]
    fn profile_without_role_has_no_details() {
        let profile = Profile {
            id: "u2".into(),
            ..Default::default()
        };
        assert_eq!(profile.details(), None);
        assert_eq!(profile.display_name(), "Unnamed user");
    }

    #[test]
    fn elevator_decodes_from_row() {
        let json = r#"{
            "id": "e1",
            "company_id": "c1",
            "serial_number": "A120",
            "model": "Gen2",
            "capacity": 630,
            "status": "out_of_order",
            "building_id": null,
            "last_inspection": "2024-03-01",
            "next_inspection": "2025-03-01"
        }"#;
        let elevator: Elevator = serde_json::from_str(json).unwrap();
        assert_eq!(elevator.status, ElevatorStatus::OutOfOrder);
        assert_eq!(elevator.building_id, None);
        assert_eq!(
            elevator.next_inspection,
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
    }

    #[test]
    fn rpc_failure_carries_message() {
        let res: RpcResult<Vec<Elevator>> =
            serde_json::from_str(r#"{"success": false, "message": "permission denied"}"#).unwrap();
        assert_eq!(
            res.into_result(),
            Err(BackendError::Remote("permission denied".into()))
        );
    }

    #[test]
    fn rpc_success_without_data_is_decode_error() {
        let res: RpcResult<Vec<Elevator>> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(matches!(res.into_result(), Err(BackendError::Decode(_))));

        let unit: RpcResult<serde_json::Value> =
            serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(unit.into_unit(), Ok(()));
    }
}
