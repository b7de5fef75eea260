//! Sign-in endpoints over HTTP.

use crate::api::errors::ApiResult;
use crate::api::{AuthApi, HttpApi};
use crate::domain::session::{Credentials, Session};
use crate::models::auth::{LoginRequest, LoginResponse};

impl AuthApi for HttpApi {
    fn login(&self, credentials: &Credentials) -> ApiResult<Session> {
        let response: LoginResponse =
            self.post_json(None, "auth/login", &LoginRequest::from(credentials))?;
        Session::try_from(response)
    }

    fn logout(&self, session: &Session) -> ApiResult<()> {
        self.post_empty(session, "auth/logout")
    }
}
