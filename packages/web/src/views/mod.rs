mod login;
pub use login::Login;

mod register;
pub use register::{Register, VerifyEmail};

mod password;
pub use password::{ForgotPassword, ResetPassword};

mod protected;
pub use protected::Protected;

mod dashboard;
pub use dashboard::{Dashboard, RoleDashboard};

mod profile;
pub use profile::Profile;

mod not_found;
pub use not_found::NotFound;
