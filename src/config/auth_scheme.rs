//! HTTP authentication schemes for DigitalOcean API requests.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// The HTTP authentication scheme used when talking to the API server.
///
/// DigitalOcean currently accepts a single scheme: a bearer token carried in
/// the `Authorization` header. The enum leaves room for platforms that
/// rewrite outgoing headers and need a different scheme in the future.
///
/// # Example
///
/// ```rust
/// use digitalocean_sdk::{ApiToken, AuthenticationScheme};
///
/// let token = ApiToken::new("dop_v1_abc").unwrap();
/// let (name, value) = AuthenticationScheme::Bearer.header(&token);
/// assert_eq!(name, "Authorization");
/// assert_eq!(value, "Bearer dop_v1_abc");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AuthenticationScheme {
    /// `Authorization: Bearer <token>`.
    #[default]
    Bearer,
}

impl AuthenticationScheme {
    /// Returns the header name and value that authenticate a request.
    #[must_use]
    pub fn header(&self, token: &super::ApiToken) -> (&'static str, String) {
        match self {
            Self::Bearer => ("Authorization", format!("Bearer {}", token.as_ref())),
        }
    }
}

impl fmt::Display for AuthenticationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer => write!(f, "bearer"),
        }
    }
}

impl FromStr for AuthenticationScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bearer" => Ok(Self::Bearer),
            _ => Err(ConfigError::UnknownAuthenticationScheme {
                scheme: s.to_string(),
            }),
        }
    }
}
