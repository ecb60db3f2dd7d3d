use dioxus::prelude::*;
use ui::use_auth;
use ui::views::DashboardView;

use crate::go_to;

/// `/dashboard` resolves to the dashboard of the user's role.
#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    go_to(nav, &auth().home_route(), true);
    rsx! {}
}

#[component]
pub fn RoleDashboard(role: String) -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let state = auth();

    let Some(profile) = state.profile.clone() else {
        go_to(nav, "/profile", true);
        return rsx! {};
    };
    // A dashboard of another role is never shown; send the user to their own.
    match profile.role {
        Some(own) if own.dashboard_slug() == role => rsx! {
            DashboardView { profile }
        },
        _ => {
            go_to(nav, &state.home_route(), true);
            rsx! {}
        }
    }
}
