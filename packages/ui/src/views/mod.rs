//! Page-level views. Navigation is reported through callbacks; the
//! application crate maps them onto its router.

mod auth_card;
mod confirm_dialog;
mod dashboard;
mod elevator_form;
mod elevator_list;
mod forgot_password;
mod login;
mod modal_overlay;
mod part_form;
mod parts_modal;
mod profile;
mod register;
mod reset_password;
mod verify_email;

pub use auth_card::AuthCard;
pub use confirm_dialog::ConfirmDialog;
pub use dashboard::{AppShell, DashboardView};
pub use elevator_form::ElevatorFormModal;
pub use elevator_list::ElevatorListView;
pub use forgot_password::ForgotPasswordView;
pub use login::LoginView;
pub use modal_overlay::ModalOverlay;
pub use part_form::PartFormModal;
pub use parts_modal::PartsModal;
pub use profile::ProfileView;
pub use register::{RegisterView, Registered};
pub use reset_password::ResetPasswordView;
pub use verify_email::VerifyEmailView;
