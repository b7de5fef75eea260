use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::domain::session::{Credentials, Partner, Session, StaffMember};
use crate::domain::types::{AttendeeEmail, NonEmptyString, PartnerId, StaffId};

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginRequest<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            email: credentials.email.as_str(),
            password: credentials.password.as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRow {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerRow {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    #[serde(alias = "companyName")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(alias = "accessToken")]
    pub token: Option<String>,
    pub user: Option<StaffRow>,
    pub partner: Option<PartnerRow>,
}

impl TryFrom<LoginResponse> for Session {
    type Error = ApiError;

    fn try_from(response: LoginResponse) -> Result<Self, Self::Error> {
        let token = response
            .token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ApiError::missing_field("token"))?;
        let user = response
            .user
            .ok_or_else(|| ApiError::missing_field("user"))?;
        let partner = response
            .partner
            .ok_or_else(|| ApiError::missing_field("partner"))?;

        let user = StaffMember {
            id: StaffId::new(user.id.unwrap_or_default())
                .map_err(|_| ApiError::missing_field("user id"))?,
            name: NonEmptyString::new(user.name.unwrap_or_default())
                .map_err(|_| ApiError::missing_field("user name"))?,
            email: AttendeeEmail::new(user.email.unwrap_or_default())
                .map_err(|_| ApiError::missing_field("user email"))?,
        };
        let partner = Partner {
            id: PartnerId::new(partner.id.unwrap_or_default())
                .map_err(|_| ApiError::missing_field("partner id"))?,
            name: NonEmptyString::new(partner.name.unwrap_or_default())
                .map_err(|_| ApiError::missing_field("partner name"))?,
        };

        Ok(Session::new(token, user, partner))
    }
}
