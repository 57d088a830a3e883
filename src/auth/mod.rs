//! Bearer-token gate for routes that require authentication.
//!
//! Token validity is delegated to a [`TokenVerifier`]; this module never
//! inspects token contents. A missing token and an invalid token produce
//! the same client-visible 401 body — callers cannot distinguish them.

use axum::http::HeaderMap;

use crate::http::error::GatewayError;
use crate::routing::CompiledRoute;

/// Header carrying the credential. Header names are normalized to
/// lowercase by the HTTP layer.
pub const AUTHORIZATION: &str = "authorization";

/// The external validity oracle. Tokens are opaque strings here; no claim
/// extraction happens on this side of the seam.
pub trait TokenVerifier: Send + Sync {
    /// Returns true if the token is valid.
    fn verify(&self, token: &str) -> bool;
}

/// Verifier comparing the token against one configured shared key.
///
/// Accepts the raw key or the `Bearer <key>` header form.
pub struct BearerKeyVerifier {
    key: String,
}

impl BearerKeyVerifier {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl TokenVerifier for BearerKeyVerifier {
    fn verify(&self, token: &str) -> bool {
        let token = token.strip_prefix("Bearer ").unwrap_or(token);
        token == self.key
    }
}

/// Gate a matched route on its auth flag.
///
/// Routes with `auth == false` pass unconditionally, whatever headers are
/// present. For guarded routes the `authorization` header value is handed
/// to the verifier as-is.
pub fn authenticate(
    route: &CompiledRoute,
    headers: &HeaderMap,
    verifier: &dyn TokenVerifier,
) -> Result<(), GatewayError> {
    if !route.auth {
        return Ok(());
    }

    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(GatewayError::AuthMissing)?;

    if verifier.verify(token) {
        Ok(())
    } else {
        Err(GatewayError::AuthInvalid)
    }
}
