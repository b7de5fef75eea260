use crate::api::AuthApi;
use crate::domain::session::Session;
use crate::forms::login::LoginForm;
use crate::services::{ServiceError, ServiceResult};

/// Validates the sign-in form and opens a new [`Session`].
pub fn login<A>(api: &A, form: LoginForm) -> ServiceResult<Session>
where
    A: AuthApi + ?Sized,
{
    let credentials = form.into_credentials().map_err(|err| {
        log::error!("Failed to validate login form: {err}");
        ServiceError::from(err)
    })?;

    let session = api.login(&credentials).map_err(|err| {
        log::error!("Failed to sign in {}: {err}", credentials.email);
        err
    })?;

    log::info!(
        "Signed in {} for partner {}",
        session.user.email,
        session.partner.name
    );
    Ok(session)
}

/// Closes the session. It is dropped even if the remote call fails.
pub fn logout<A>(api: &A, session: Session) -> ServiceResult<()>
where
    A: AuthApi + ?Sized,
{
    let result = api.logout(&session);
    log::info!("Signed out {}", session.user.email);
    drop(session);

    result.map_err(|err| {
        log::error!("Failed to sign out: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::errors::ApiError;
    use crate::api::mock::MockApi;
    use crate::domain::session::{Partner, StaffMember};
    use crate::domain::types::{AttendeeEmail, NonEmptyString, PartnerId, StaffId};

    fn session() -> Session {
        Session::new(
            "tok",
            StaffMember {
                id: StaffId::new("u1").unwrap(),
                name: NonEmptyString::new("Door").unwrap(),
                email: AttendeeEmail::new("door@expo.io").unwrap(),
            },
            Partner {
                id: PartnerId::new("p1").unwrap(),
                name: NonEmptyString::new("Expo").unwrap(),
            },
        )
    }

    #[test]
    fn login_sends_normalized_credentials() {
        let mut api = MockApi::new();
        api.expect_login()
            .times(1)
            .withf(|credentials| {
                credentials.email.as_str() == "door@expo.io" && credentials.password == "pw"
            })
            .returning(|_| Ok(session()));

        let form = LoginForm {
            email: " Door@Expo.io ".to_string(),
            password: "pw".to_string(),
        };

        let session = login(&api, form).unwrap();
        assert_eq!(session.token(), "tok");
    }

    #[test]
    fn invalid_form_never_reaches_api() {
        let mut api = MockApi::new();
        api.expect_login().never();

        let form = LoginForm {
            email: "door@expo.io".to_string(),
            password: String::new(),
        };

        assert!(matches!(login(&api, form), Err(ServiceError::Form(_))));
    }

    #[test]
    fn logout_failure_is_reported() {
        let mut api = MockApi::new();
        api.expect_logout()
            .times(1)
            .returning(|_| Err(ApiError::Transport("offline".to_string())));

        let result = logout(&api, session());

        assert_eq!(
            result,
            Err(ServiceError::Api(ApiError::Transport("offline".to_string())))
        );
    }
}
