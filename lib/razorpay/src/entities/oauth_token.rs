use razorpay_core::{Entity, Payload};
use serde::Serialize;
use serde_json::Value;

use crate::{Config, Error, HttpClient, Razorpay, Result};

/// OAuth tokens issued by the authorization server.
///
/// Token responses carry no `entity` discriminator, so they resolve to a
/// generic entity that is wrapped here. Requests go to the auth host without
/// a version segment (`https://auth.razorpay.com/token`).
///
/// ```ignore
/// let token = OAuthToken::exchange(&razorpay, &json!({
///     "client_id": "...",
///     "client_secret": "...",
///     "grant_type": "authorization_code",
///     "redirect_uri": "https://example.com/callback",
///     "code": "def50200...",
///     "mode": "test",
/// }))
/// .await?;
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct OAuthToken(Entity);

impl OAuthToken {
    /// Exchange an authorization code (`grant_type=authorization_code`).
    pub async fn exchange<C, P>(razorpay: &Razorpay<C>, params: &P) -> Result<Self>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        Self::token(razorpay, params).await
    }

    /// Refresh an access token (`grant_type=refresh_token`).
    pub async fn refresh<C, P>(razorpay: &Razorpay<C>, params: &P) -> Result<Self>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        Self::token(razorpay, params).await
    }

    /// Revoke an access or refresh token (`POST /revoke`).
    pub async fn revoke<C, P>(razorpay: &Razorpay<C>, params: &P) -> Result<Entity>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        let payload = razorpay
            .auth_dispatcher("revoke")
            .version("")
            .create(params)
            .await?;
        into_entity(payload)
    }

    async fn token<C, P>(razorpay: &Razorpay<C>, params: &P) -> Result<Self>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        let payload = razorpay
            .auth_dispatcher("token")
            .version("")
            .create(params)
            .await?;
        into_entity(payload).map(Self)
    }

    /// The access token.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.0.get("access_token").and_then(Value::as_str)
    }

    /// The refresh token, when one was issued.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.0.get("refresh_token").and_then(Value::as_str)
    }

    /// Lifetime of the access token in seconds.
    #[must_use]
    pub fn expires_in(&self) -> Option<u64> {
        self.0.get("expires_in").and_then(Value::as_u64)
    }

    /// Token type, usually `Bearer`.
    #[must_use]
    pub fn token_type(&self) -> Option<&str> {
        self.0.get("token_type").and_then(Value::as_str)
    }

    /// A configuration that authenticates with this access token.
    #[must_use]
    pub fn config(&self, base: &Config) -> Option<Config> {
        let token = self.access_token()?;
        Some(base.with_access_token(token))
    }

    /// All attributes of the response.
    #[must_use]
    pub const fn entity(&self) -> &Entity {
        &self.0
    }
}

fn into_entity(payload: Payload<super::Resource>) -> Result<Entity> {
    match payload {
        Payload::Entity(resource) => Ok(resource.into_entity()),
        Payload::Raw(_) => Err(Error::unexpected_entity("oauth_token", "raw payload")),
    }
}

impl From<Entity> for OAuthToken {
    fn from(entity: Entity) -> Self {
        Self(entity)
    }
}
