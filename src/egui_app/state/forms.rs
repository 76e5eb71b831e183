//! Form input buffers and the checks run before anything is sent.

use crate::shared::error::ClientError;
use crate::shared::models::DeviceRegistration;

#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// Inline error under the form
    pub error: Option<String>,
}

impl AuthForm {
    pub fn validate_login(&self) -> Result<(), ClientError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ClientError::validation(
                "email",
                "Email and password are required",
            ));
        }
        Ok(())
    }

    pub fn validate_register(&self) -> Result<(), ClientError> {
        if self.name.trim().is_empty() {
            return Err(ClientError::validation("name", "Name is required"));
        }
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ClientError::validation(
                "email",
                "Email and password are required",
            ));
        }
        if !looks_like_email(self.email.trim()) {
            return Err(ClientError::validation(
                "email",
                "Please enter a valid email address",
            ));
        }
        if self.password != self.confirm_password {
            return Err(ClientError::validation(
                "confirm_password",
                "Passwords do not match",
            ));
        }
        Ok(())
    }

    /// Secrets are dropped after every submit, successful or not.
    pub fn clear_secrets(&mut self) {
        self.password.clear();
        self.confirm_password.clear();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeviceForm {
    pub mac_address: String,
    pub cpu_id: String,
    pub hostname: String,
    pub os_version: String,
}

impl DeviceForm {
    pub fn to_registration(&self) -> Result<DeviceRegistration, ClientError> {
        let required = [
            ("mac_address", &self.mac_address, "MAC address is required"),
            ("cpu_id", &self.cpu_id, "CPU id is required"),
            ("hostname", &self.hostname, "Hostname is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                return Err(ClientError::validation(field, message));
            }
        }

        let os_version = self.os_version.trim();
        Ok(DeviceRegistration {
            mac_address: self.mac_address.trim().to_string(),
            cpu_id: self.cpu_id.trim().to_string(),
            hostname: self.hostname.trim().to_string(),
            os_version: (!os_version.is_empty()).then(|| os_version.to_string()),
        })
    }
}
