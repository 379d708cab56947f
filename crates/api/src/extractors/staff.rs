//! Bearer identity extractors.
//!
//! Staff endpoints carry the identity token in the `Authorization: Bearer`
//! header rather than the request body. [`BearerIdentity`] accepts any
//! valid token; [`StaffUser`] additionally requires the staff capability
//! claim and rejects everyone else with the original 403 body.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::app::AppState;
use crate::error::ApiError;
use shared::jwt::IdentityClaims;

/// Any authenticated caller.
#[derive(Debug, Clone)]
pub struct BearerIdentity {
    pub claims: IdentityClaims,
}

impl BearerIdentity {
    pub fn mail(&self) -> &str {
        &self.claims.iss
    }

    pub fn is_staff(&self) -> bool {
        self.claims.staff
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for BearerIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::Forbidden)?;

        let claims = state
            .verifier
            .verify(bearer.token())
            .map_err(|_| ApiError::Forbidden)?;

        Ok(Self { claims })
    }
}

/// An authenticated caller holding the staff capability.
#[derive(Debug, Clone)]
pub struct StaffUser {
    pub mail: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for StaffUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = BearerIdentity::from_request_parts(parts, state).await?;

        if !identity.is_staff() {
            tracing::warn!(mail = %identity.mail(), "Non-staff caller on staff endpoint");
            return Err(ApiError::Forbidden);
        }

        Ok(Self {
            mail: identity.claims.iss,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(staff: bool) -> IdentityClaims {
        IdentityClaims {
            iss: "bsm@example.edu".to_string(),
            did: "device-1".to_string(),
            staff,
            exp: i64::MAX,
            iat: 0,
        }
    }

    #[test]
    fn test_bearer_identity_accessors() {
        let identity = BearerIdentity {
            claims: claims(true),
        };
        assert_eq!(identity.mail(), "bsm@example.edu");
        assert!(identity.is_staff());
    }

    #[test]
    fn test_bearer_identity_non_staff() {
        let identity = BearerIdentity {
            claims: claims(false),
        };
        assert!(!identity.is_staff());
    }
}
