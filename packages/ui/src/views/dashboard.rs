//! Signed-in pages: the header shell and the role dashboard.

use dioxus::prelude::*;
use store::{Profile, RoleDetails};

use super::ElevatorListView;
use crate::auth::{use_auth, LogoutButton};
use crate::icons::{FaBuilding, FaUser};
use crate::Icon;

/// Header around every signed-in page. Navigation is reported through
/// `on_navigate` with the target path.
#[component]
pub fn AppShell(on_navigate: EventHandler<String>, children: Element) -> Element {
    let auth = use_auth();
    let state = auth();
    let name = state
        .profile
        .as_ref()
        .map(|p| p.display_name().to_string())
        .or_else(|| state.user.as_ref().and_then(|u| u.email.clone()))
        .unwrap_or_default();
    let home = state.home_route();

    rsx! {
        div {
            class: "app-shell",
            header {
                class: "app-header",
                button {
                    class: "app-brand",
                    r#type: "button",
                    onclick: move |_| on_navigate.call(home.clone()),
                    Icon { icon: FaBuilding, width: 18, height: 18 }
                    span { "LiftCare" }
                }
                nav {
                    class: "app-nav",
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| on_navigate.call("/profile".to_string()),
                        Icon { icon: FaUser, width: 14, height: 14 }
                        " {name}"
                    }
                    LogoutButton {
                        on_signed_out: move |_| on_navigate.call("/login".to_string()),
                    }
                }
            }
            main { class: "app-main", {children} }
        }
    }
}

fn role_summary(details: &RoleDetails) -> Vec<(&'static str, String)> {
    let or_dash = |s: &str| if s.trim().is_empty() { "-".to_string() } else { s.to_string() };
    match details {
        RoleDetails::Company { company_name, address } => {
            vec![("Company", or_dash(company_name)), ("Address", or_dash(address))]
        }
        RoleDetails::CompanyAdmin { company_name } => vec![("Company", or_dash(company_name))],
        RoleDetails::Technician {
            specialization,
            certification_number,
        } => vec![
            ("Specialization", or_dash(specialization)),
            ("Certification", or_dash(certification_number)),
        ],
        RoleDetails::BuildingManager { managed_building } => {
            vec![("Managed building", or_dash(managed_building))]
        }
        RoleDetails::Admin => vec![("Access", "All companies".to_string())],
    }
}

/// Role dashboard: a summary of the signed-in profile above the elevator
/// table. The table is remounted whenever the session epoch changes.
#[component]
pub fn DashboardView(profile: Profile) -> Element {
    let auth = use_auth();
    let epoch = auth.read().epoch;
    let role = profile.role.map(|r| r.label()).unwrap_or("No role assigned");
    let summary = profile.details().as_ref().map(role_summary).unwrap_or_default();

    rsx! {
        section {
            class: "dashboard-summary",
            div {
                h1 { class: "dashboard-title", "Welcome, {profile.display_name()}" }
                p { class: "view-muted", "{role}" }
            }
            dl {
                class: "summary-list",
                for (label, value) in summary {
                    div {
                        key: "{label}",
                        dt { "{label}" }
                        dd { "{value}" }
                    }
                }
            }
        }
        ElevatorListView { key: "{epoch}", profile }
    }
}
