use serde::{Deserialize, Serialize};
use retail_shared::pii::Masked;

/// Login input as submitted by the operator.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: Masked<String>,
}

/// Profile issued alongside a session token on successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// The single credential the console accepts.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminCredential {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The caller never learns which field mismatched.
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// Authentication boundary. Exact literal match of both fields against the
/// configured admin credential; anything else is the generic failure.
pub fn authenticate(
    credentials: &Credentials,
    admin: &AdminCredential,
) -> Result<AdminProfile, AuthError> {
    if credentials.email == admin.email && credentials.password.0 == admin.password {
        tracing::info!(email = %Masked(admin.email.clone()), "admin login accepted");
        Ok(AdminProfile {
            id: "1".to_string(),
            email: admin.email.clone(),
            name: admin.display_name.clone(),
            role: "admin".to_string(),
        })
    } else {
        Err(AuthError::InvalidCredentials)
    }
}
