//! # Form models and client-side validation
//!
//! Each form holds the raw strings the user typed. `validate()` either returns
//! a typed value ready for the backend or a [`FieldErrors`] map keyed by field
//! name, which the views render inline. Nothing here performs I/O: a form that
//! fails validation never reaches the backend.
//!
//! | Form | Validated value |
//! |------|-----------------|
//! | [`LoginForm`] | [`Credentials`] |
//! | [`RegisterForm`] | [`Registration`] |
//! | [`ForgotPasswordForm`] | email `String` |
//! | [`ResetPasswordForm`] | new password `String` |
//! | [`ProfileForm`] | [`ProfileUpdate`] |
//! | [`ElevatorForm`] | [`ElevatorInput`] |
//! | [`PartForm`] | [`PartInput`] |

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{
    Elevator, ElevatorInput, ElevatorPart, ElevatorStatus, PartInput, PartStatus, Profile,
    ProfileUpdate, Role, RoleDetails,
};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Validation messages keyed by field name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Loose address check: one `@`, non-empty local part, dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.add("email", "Please enter a valid email");
    }
}

fn check_new_password(errors: &mut FieldErrors, password: &str, confirm: &str) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }
    if password != confirm {
        errors.add("confirm_password", "Passwords do not match");
    }
}

fn required(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, format!("{label} is required"));
    }
    value.to_string()
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parse an optional `YYYY-MM-DD` date input.
fn optional_date(errors: &mut FieldErrors, field: &'static str, value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, "Use the format YYYY-MM-DD");
            None
        }
    }
}

fn date_input(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        if self.password.is_empty() {
            errors.add("password", "Password is required");
        }
        errors.into_result(|| Credentials {
            email: self.email.trim().to_lowercase(),
            password: self.password.clone(),
        })
    }
}

/// Sign-up payload: credentials plus the profile metadata the backend uses
/// to create the profile row.
#[derive(Clone, Debug, PartialEq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
    pub company_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// Selector value, e.g. `"technician"`.
    pub role: String,
    pub company_name: String,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            role: Role::Company.as_str().to_string(),
            company_name: String::new(),
        }
    }
}

impl RegisterForm {
    pub fn validate(&self) -> Result<Registration, FieldErrors> {
        let mut errors = FieldErrors::default();
        let full_name = required(&mut errors, "full_name", &self.full_name, "Name");
        check_email(&mut errors, &self.email);
        check_new_password(&mut errors, &self.password, &self.confirm_password);

        let role = Role::parse(&self.role).filter(|r| Role::SELF_REGISTERABLE.contains(r));
        if role.is_none() {
            errors.add("role", "Please choose an account type");
        }
        let company_name = optional(&self.company_name);
        if role == Some(Role::Company) && company_name.is_none() {
            errors.add("company_name", "Company name is required");
        }

        errors.into_result(|| Registration {
            email: self.email.trim().to_lowercase(),
            password: self.password.clone(),
            full_name,
            role: role.unwrap_or(Role::Company),
            company_name: company_name.filter(|_| role == Some(Role::Company)),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        errors.into_result(|| self.email.trim().to_lowercase())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResetPasswordForm {
    pub password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::default();
        check_new_password(&mut errors, &self.password, &self.confirm_password);
        errors.into_result(|| self.password.clone())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProfileForm {
    pub full_name: String,
    pub phone: String,
    pub avatar_url: String,
    pub details: RoleDetails,
}

impl ProfileForm {
    /// Prefill from the stored profile. A profile without a role edits only
    /// the shared fields.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            full_name: profile.full_name.clone().unwrap_or_default(),
            phone: profile.phone.clone().unwrap_or_default(),
            avatar_url: profile.avatar_url.clone().unwrap_or_default(),
            details: profile.details().unwrap_or(RoleDetails::Admin),
        }
    }

    pub fn validate(&self, profile: &Profile) -> Result<ProfileUpdate, FieldErrors> {
        let mut errors = FieldErrors::default();
        let full_name = required(&mut errors, "full_name", &self.full_name, "Name");

        let phone = optional(&self.phone);
        if let Some(ref p) = phone {
            let allowed = |c: char| c.is_ascii_digit() || " +-()".contains(c);
            if !p.chars().all(allowed) || !p.chars().any(|c| c.is_ascii_digit()) {
                errors.add("phone", "Phone may contain digits, spaces, +, - and parentheses");
            }
        }

        match &self.details {
            RoleDetails::Company { company_name, .. } | RoleDetails::CompanyAdmin { company_name } => {
                if company_name.trim().is_empty() {
                    errors.add("company_name", "Company name is required");
                }
            }
            RoleDetails::Technician { .. } | RoleDetails::BuildingManager { .. } | RoleDetails::Admin => {}
        }

        errors.into_result(|| {
            let mut updated = profile.clone().with_details(&self.details);
            updated.full_name = Some(full_name);
            updated.phone = phone;
            updated.avatar_url = optional(&self.avatar_url);
            ProfileUpdate::from(&updated)
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ElevatorForm {
    pub serial_number: String,
    pub model: String,
    pub capacity: String,
    pub status: String,
    /// Empty for "no building".
    pub building_id: String,
    pub last_inspection: String,
    pub next_inspection: String,
}

impl Default for ElevatorForm {
    fn default() -> Self {
        Self {
            serial_number: String::new(),
            model: String::new(),
            capacity: String::new(),
            status: ElevatorStatus::Operational.as_str().to_string(),
            building_id: String::new(),
            last_inspection: String::new(),
            next_inspection: String::new(),
        }
    }
}

impl From<&Elevator> for ElevatorForm {
    fn from(e: &Elevator) -> Self {
        Self {
            serial_number: e.serial_number.clone(),
            model: e.model.clone(),
            capacity: e.capacity.to_string(),
            status: e.status.as_str().to_string(),
            building_id: e.building_id.clone().unwrap_or_default(),
            last_inspection: date_input(e.last_inspection),
            next_inspection: date_input(e.next_inspection),
        }
    }
}

impl ElevatorForm {
    pub fn validate(&self) -> Result<ElevatorInput, FieldErrors> {
        let mut errors = FieldErrors::default();
        let serial_number = required(&mut errors, "serial_number", &self.serial_number, "Serial number");
        let model = required(&mut errors, "model", &self.model, "Model");

        let capacity = match self.capacity.trim().parse::<u32>() {
            Ok(c) if c > 0 => c,
            _ => {
                errors.add("capacity", "Capacity must be a positive whole number");
                0
            }
        };

        let status = ElevatorStatus::parse(&self.status);
        if status.is_none() {
            errors.add("status", "Please choose a status");
        }

        let last_inspection = optional_date(&mut errors, "last_inspection", &self.last_inspection);
        let next_inspection = optional_date(&mut errors, "next_inspection", &self.next_inspection);
        if let (Some(last), Some(next)) = (last_inspection, next_inspection) {
            if next < last {
                errors.add("next_inspection", "Next inspection cannot be before the last one");
            }
        }

        errors.into_result(|| ElevatorInput {
            serial_number,
            model,
            capacity,
            status: status.unwrap_or(ElevatorStatus::Operational),
            building_id: optional(&self.building_id),
            last_inspection,
            next_inspection,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PartForm {
    pub name: String,
    pub part_number: String,
    pub manufacturer: String,
    pub installation_date: String,
    pub last_maintenance_date: String,
    pub status: String,
    pub description: String,
}

impl Default for PartForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            part_number: String::new(),
            manufacturer: String::new(),
            installation_date: String::new(),
            last_maintenance_date: String::new(),
            status: PartStatus::Operational.as_str().to_string(),
            description: String::new(),
        }
    }
}

impl From<&ElevatorPart> for PartForm {
    fn from(p: &ElevatorPart) -> Self {
        Self {
            name: p.name.clone(),
            part_number: p.part_number.clone(),
            manufacturer: p.manufacturer.clone().unwrap_or_default(),
            installation_date: date_input(p.installation_date),
            last_maintenance_date: date_input(p.last_maintenance_date),
            status: p.status.as_str().to_string(),
            description: p.description.clone().unwrap_or_default(),
        }
    }
}

impl PartForm {
    pub fn validate(&self) -> Result<PartInput, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = required(&mut errors, "name", &self.name, "Name");
        let part_number = required(&mut errors, "part_number", &self.part_number, "Part number");

        let status = PartStatus::parse(&self.status);
        if status.is_none() {
            errors.add("status", "Please choose a status");
        }

        let installation_date = optional_date(&mut errors, "installation_date", &self.installation_date);
        let last_maintenance_date =
            optional_date(&mut errors, "last_maintenance_date", &self.last_maintenance_date);
        if let (Some(installed), Some(serviced)) = (installation_date, last_maintenance_date) {
            if serviced < installed {
                errors.add(
                    "last_maintenance_date",
                    "Maintenance date cannot be before installation",
                );
            }
        }

        errors.into_result(|| PartInput {
            name,
            part_number,
            manufacturer: optional(&self.manufacturer),
            installation_date,
            last_maintenance_date,
            status: status.unwrap_or(PartStatus::Operational),
            description: optional(&self.description),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("tech@lifts.example"));
        assert!(is_valid_email("  a.b@c.de "));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a b@c.com"));
    }

    #[test]
    fn forgot_password_with_empty_email_is_blocked() {
        let errors = ForgotPasswordForm::default().validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));
    }

    #[test]
    fn forgot_password_normalises_email() {
        let form = ForgotPasswordForm {
            email: " Tech@Lifts.Example ".into(),
        };
        assert_eq!(form.validate().unwrap(), "tech@lifts.example");
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert!(errors.get("email").is_some());
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[test]
    fn register_checks_password_rules_and_company() {
        let form = RegisterForm {
            full_name: "Ana".into(),
            email: "ana@lifts.example".into(),
            password: "short".into(),
            confirm_password: "different".into(),
            role: "company".into(),
            company_name: "".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));
        assert_eq!(errors.get("company_name"), Some("Company name is required"));
    }

    #[test]
    fn register_rejects_privileged_roles() {
        let form = RegisterForm {
            full_name: "Eve".into(),
            email: "eve@lifts.example".into(),
            password: "longenough".into(),
            confirm_password: "longenough".into(),
            role: "admin".into(),
            company_name: "".into(),
        };
        assert!(form.validate().unwrap_err().get("role").is_some());
    }

    #[test]
    fn register_technician_drops_company_name() {
        let form = RegisterForm {
            full_name: " Ivo ".into(),
            email: "ivo@lifts.example".into(),
            password: "longenough".into(),
            confirm_password: "longenough".into(),
            role: "technician".into(),
            company_name: "Leftover Ltd".into(),
        };
        let reg = form.validate().unwrap();
        assert_eq!(reg.role, Role::Technician);
        assert_eq!(reg.full_name, "Ivo");
        assert_eq!(reg.company_name, None);
    }

    #[test]
    fn reset_password_requires_matching_confirmation() {
        let form = ResetPasswordForm {
            password: "newsecret1".into(),
            confirm_password: "newsecret2".into(),
        };
        assert!(form.validate().unwrap_err().get("confirm_password").is_some());

        let form = ResetPasswordForm {
            password: "newsecret1".into(),
            confirm_password: "newsecret1".into(),
        };
        assert_eq!(form.validate().unwrap(), "newsecret1");
    }

    #[test]
    fn profile_form_validates_per_role() {
        let profile = Profile {
            id: "u1".into(),
            role: Some(Role::CompanyAdmin),
            company_name: Some("Lift Co".into()),
            full_name: Some("Ana".into()),
            ..Default::default()
        };
        let mut form = ProfileForm::from_profile(&profile);
        assert_eq!(
            form.details,
            RoleDetails::CompanyAdmin {
                company_name: "Lift Co".into()
            }
        );

        form.details = RoleDetails::CompanyAdmin {
            company_name: " ".into(),
        };
        form.phone = "call me".into();
        let errors = form.validate(&profile).unwrap_err();
        assert!(errors.get("company_name").is_some());
        assert!(errors.get("phone").is_some());

        form.details = RoleDetails::CompanyAdmin {
            company_name: "Lift Co 2".into(),
        };
        form.phone = "+385 (1) 555-0100".into();
        let update = form.validate(&profile).unwrap();
        assert_eq!(update.company_name.as_deref(), Some("Lift Co 2"));
        assert_eq!(update.phone.as_deref(), Some("+385 (1) 555-0100"));
    }

    #[test]
    fn elevator_form_parses_numbers_and_dates() {
        let form = ElevatorForm {
            serial_number: " A120 ".into(),
            model: "Gen2".into(),
            capacity: "630".into(),
            status: "maintenance".into(),
            building_id: "".into(),
            last_inspection: "2024-01-10".into(),
            next_inspection: "2025-01-10".into(),
        };
        let input = form.validate().unwrap();
        assert_eq!(input.serial_number, "A120");
        assert_eq!(input.capacity, 630);
        assert_eq!(input.status, ElevatorStatus::Maintenance);
        assert_eq!(input.building_id, None);
        assert_eq!(input.next_inspection, NaiveDate::from_ymd_opt(2025, 1, 10));
    }

    #[test]
    fn elevator_form_reports_every_bad_field() {
        let form = ElevatorForm {
            serial_number: "".into(),
            model: "".into(),
            capacity: "0".into(),
            status: "broken".into(),
            building_id: "".into(),
            last_inspection: "2025-02-01".into(),
            next_inspection: "2025-01-01".into(),
        };
        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(
            fields,
            vec!["capacity", "model", "next_inspection", "serial_number", "status"]
        );
    }

    #[test]
    fn elevator_form_roundtrips_existing_record() {
        let elevator = Elevator {
            id: "e1".into(),
            company_id: None,
            serial_number: "B200".into(),
            model: "MonoSpace".into(),
            capacity: 1000,
            status: ElevatorStatus::OutOfOrder,
            building_id: Some("b1".into()),
            last_inspection: NaiveDate::from_ymd_opt(2024, 5, 2),
            next_inspection: None,
        };
        let input = ElevatorForm::from(&elevator).validate().unwrap();
        assert_eq!(input, ElevatorInput::from(&elevator));
    }

    #[test]
    fn part_form_checks_date_order_and_format() {
        let form = PartForm {
            name: "Door operator".into(),
            part_number: "DO-7".into(),
            installation_date: "2024-06-01".into(),
            last_maintenance_date: "2024-05-01".into(),
            ..Default::default()
        };
        assert!(form.validate().unwrap_err().get("last_maintenance_date").is_some());

        let form = PartForm {
            installation_date: "01/06/2024".into(),
            last_maintenance_date: "".into(),
            ..form
        };
        assert_eq!(
            form.validate().unwrap_err().get("installation_date"),
            Some("Use the format YYYY-MM-DD")
        );
    }

    #[test]
    fn part_form_trims_optional_text() {
        let form = PartForm {
            name: "Governor".into(),
            part_number: "GV-2".into(),
            manufacturer: "  ".into(),
            description: " replaced after inspection ".into(),
            status: "defective".into(),
            ..Default::default()
        };
        let input = form.validate().unwrap();
        assert_eq!(input.manufacturer, None);
        assert_eq!(input.description.as_deref(), Some("replaced after inspection"));
        assert_eq!(input.status, PartStatus::Defective);
    }
}
