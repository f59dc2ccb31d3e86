//! Acting-user extractor.
//!
//! Authentication happens upstream; the gateway forwards the authenticated
//! account id in the `X-User-Id` header and this service trusts it.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};

use super::error::AppError;

/// Header carrying the authenticated user's id.
pub const ACTING_USER_HEADER: &str = "X-User-Id";

/// The user on whose behalf a request is made.
///
/// ```ignore
/// async fn delete(user: ActingUser) -> impl Responder {
///     format!("Hello, {}!", user.id())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActingUser(String);

impl ActingUser {
    pub fn id(&self) -> &str {
        &self.0
    }

    fn from_header(req: &HttpRequest) -> Result<Self, AppError> {
        let value = req
            .headers()
            .get(ACTING_USER_HEADER)
            .ok_or_else(|| AppError::Unauthorized(format!("Missing {ACTING_USER_HEADER} header")))?;

        let id = value
            .to_str()
            .map_err(|_| AppError::Unauthorized(format!("Invalid {ACTING_USER_HEADER} header")))?
            .trim();

        if id.is_empty() {
            return Err(AppError::Unauthorized(format!("Empty {ACTING_USER_HEADER} header")));
        }

        Ok(ActingUser(id.to_string()))
    }
}

impl FromRequest for ActingUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = Self::from_header(req);
        if let Err(e) = &result {
            tracing::debug!(error = %e, "Rejected request without acting user");
        }
        ready(result)
    }
}
