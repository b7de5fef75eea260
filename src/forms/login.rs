use serde::Deserialize;
use validator::Validate;

use crate::domain::session::Credentials;
use crate::domain::types::AttendeeEmail;
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
/// Sign-in form of a staff member.
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl LoginForm {
    pub fn into_credentials(mut self) -> Result<Credentials, FormError> {
        self.email = self.email.trim().to_string();
        self.validate()?;
        let email = AttendeeEmail::new(self.email).map_err(|_| FormError::InvalidEmail)?;
        Ok(Credentials {
            email,
            password: self.password,
        })
    }
}
