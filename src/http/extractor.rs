use crate::http::error::Error;
use crate::http::ApiContext;
use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts, Path};
use axum::http::request::Parts;
use hmac::{Hmac, Mac};
use jwt::{SignWithKey, VerifyWithKey};
use serde::{Deserialize, Serialize};
use sha2::Sha384;
use time::OffsetDateTime;
use uuid::Uuid;

const DEFAULT_SESSION_LENGTH: time::Duration = time::Duration::weeks(2);

/// The header clients present their login token in.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Add this as a parameter to a handler function to require the user to be logged in.
///
/// Parses a JWT from the `x-auth-token` header. A missing or empty header is
/// `401 Unauthorized`; a header whose value fails verification is
/// `400 Bad Request`. The 400 is unconventional but asserted by existing
/// clients, so it stays.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub is_admin: bool,
}

/// Add this as a parameter to a handler function to additionally require the
/// logged-in user to be an admin.
///
/// Extraction delegates to [`AuthUser`] first, so the "identity is already
/// attached" precondition holds by construction; an identity without the admin
/// flag is `403 Forbidden`.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub AuthUser);

/// A path id that must be a well-formed record key (UUID).
///
/// Anything else is `404 Not Found` rather than a 400, so responses don't
/// reveal whether an id was malformed or merely absent.
#[derive(Debug, Clone, Copy)]
pub struct ValidId(pub Uuid);

#[derive(Serialize, Deserialize)]
struct AuthUserClaims {
    user_id: Uuid,
    is_admin: bool,
    /// Standard JWT `exp` claim (expiration time, seconds past the epoch).
    exp: i64,
}

/// Why a presented token failed verification.
#[derive(Debug, PartialEq, Eq)]
pub enum VerifyError {
    /// The string could not be parsed as a JWT at all.
    Malformed,
    /// The token parsed but was not signed with our key.
    BadSignature,
    /// The token was signed by us but is past its expiry.
    Expired,
}

impl AuthUser {
    /// Issues a signed token for this identity, valid for two weeks.
    pub fn to_jwt(&self, hmac_key: &str) -> String {
        let hmac = Hmac::<Sha384>::new_from_slice(hmac_key.as_bytes())
            .expect("HMAC-SHA-384 can accept any key length");

        AuthUserClaims {
            user_id: self.user_id,
            is_admin: self.is_admin,
            exp: (OffsetDateTime::now_utc() + DEFAULT_SESSION_LENGTH).unix_timestamp(),
        }
        .sign_with_key(&hmac)
        .expect("HMAC signing should be infallible")
    }

    /// Attempt to parse `token` and verify it against `hmac_key`, returning
    /// the identity it carries.
    pub fn from_token(hmac_key: &str, token: &str) -> Result<Self, VerifyError> {
        let jwt = jwt::Token::<jwt::Header, AuthUserClaims, _>::parse_unverified(token)
            .map_err(|_| VerifyError::Malformed)?;

        let hmac = Hmac::<Sha384>::new_from_slice(hmac_key.as_bytes())
            .expect("HMAC-SHA-384 can accept any key length");

        let jwt = jwt
            .verify_with_key(&hmac)
            .map_err(|_| VerifyError::BadSignature)?;

        let (_header, claims) = jwt.into();

        if claims.exp < OffsetDateTime::now_utc().unix_timestamp() {
            return Err(VerifyError::Expired);
        }

        Ok(Self {
            user_id: claims.user_id,
            is_admin: claims.is_admin,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    ApiContext: FromRef<S>,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ctx: ApiContext = ApiContext::from_ref(state);

        // An empty header value is treated the same as no header at all.
        let token = parts
            .headers
            .get(AUTH_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or(Error::Unauthorized)?;

        Self::from_token(&ctx.config.hmac_key, token).map_err(|e| {
            log::debug!("rejecting token: {:?}", e);
            Error::InvalidToken
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    ApiContext: FromRef<S>,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        if !auth_user.is_admin {
            return Err(Error::Forbidden);
        }

        Ok(Self(auth_user))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| Error::NotFound("Invalid ID."))?;

        let id = id.parse().map_err(|_| Error::NotFound("Invalid ID."))?;

        Ok(Self(id))
    }
}
