//! Token endpoint wire types
//!
//! The account service answers both grant types with the same JSON body.
//! It is converted into the domain [`TokenPair`] immediately.

use psnlink_domain::{Token, TokenPair};
use serde::{Deserialize, Serialize};

/// Token endpoint response body
///
/// `access_token` is required; a body without it is treated as a failed
/// exchange. The refresh fields are optional because a refresh response may
/// omit a rotated refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub refresh_token_expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl From<TokenResponse> for TokenPair {
    fn from(response: TokenResponse) -> Self {
        let refresh = response.refresh_token.map_or_else(Token::empty, |value| {
            Token::new(value, response.refresh_token_expires_in.unwrap_or_default())
        });
        Self::new(Token::new(response.access_token, response.expires_in), refresh)
    }
}
