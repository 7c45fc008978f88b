//! Capsule <-> URL token conversion.
//!
//! A token is the capsule's JSON, base64-encoded with the URL-safe alphabet
//! (`-` and `_` in place of `+` and `/`). Padding is written on encode and
//! optional on decode.

use crate::domain::model::Capsule;
use crate::utils::error::{CapsuleError, Result};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use std::fmt;
use url::Url;

const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn encode(capsule: &Capsule) -> Result<Token> {
    let json = serde_json::to_vec(capsule)?;
    Ok(Token(TOKEN_ENGINE.encode(json)))
}

pub fn decode(token: &str) -> Result<Capsule> {
    let bytes = TOKEN_ENGINE
        .decode(token.trim())
        .map_err(|e| CapsuleError::MalformedToken {
            reason: format!("not base64: {}", e),
        })?;

    serde_json::from_slice(&bytes).map_err(|e| CapsuleError::MalformedToken {
        reason: format!("not a capsule: {}", e),
    })
}

/// `{origin}/#/{token}`, the link that reopens the form with this capsule.
pub fn share_link(origin: &str, token: &Token) -> Result<Url> {
    let link = format!("{}/#/{}", origin.trim_end_matches('/'), token);
    Url::parse(&link).map_err(|e| CapsuleError::InvalidConfigValueError {
        field: "origin".to_string(),
        value: origin.to_string(),
        reason: format!("cannot build share link: {}", e),
    })
}

/// Token carried in a location fragment (`#/{token}`), if any.
pub fn token_from_location(location: &Url) -> Option<&str> {
    let fragment = location.fragment()?;
    let token = fragment.strip_prefix('/').unwrap_or(fragment);
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Color, NumberOfOutfits, Preference, Season, Style};

    const DEFAULT_TOKEN: &str = "eyJzZWFzb24iOiJBdXR1bW5XaW50ZXIiLCJzdHlsZSI6IkNhc3VhbCIsIm51bWJlck9mT3V0Zml0cyI6IkZyb20xMHRvMjAiLCJjb2xvcnMiOltdLCJwcmVmZXJlbmNlcyI6W119";

    fn office_capsule() -> Capsule {
        Capsule {
            season: Season::SpringSummer,
            style: Style::Office,
            number_of_outfits: NumberOfOutfits::From41to50,
            colors: [Color::Navy, Color::White, Color::DarkOrange].into_iter().collect(),
            preferences: [Preference::Leggings, Preference::Skirts].into_iter().collect(),
        }
    }

    #[test]
    fn test_default_capsule_token() {
        let token = encode(&Capsule::default()).unwrap();
        assert_eq!(token.as_str(), DEFAULT_TOKEN);
        assert_eq!(decode(token.as_str()).unwrap(), Capsule::default());
    }

    #[test]
    fn test_token_uses_url_safe_alphabet() {
        let token = encode(&office_capsule()).unwrap();
        assert_eq!(
            token.as_str(),
            "eyJzZWFzb24iOiJTcHJpbmdTdW1tZXIiLCJzdHlsZSI6Ik9mZmljZSIsIm51bWJlck9mT3V0Zml0cyI6IkZyb200MXRvNTAiLCJjb2xvcnMiOlsiV2hpdGUiLCJOYXZ5IiwiRGFya09yZ2FuZ2UiXSwicHJlZmVyZW5jZXMiOlsiU2tpcnRzIiwiTGVnZ2luZ3NQYW50cyJdfQ=="
        );
        assert!(!token.as_str().contains('+'));
        assert!(!token.as_str().contains('/'));
    }

    #[test]
    fn test_round_trip() {
        let mut capsule = office_capsule();
        for bucket in NumberOfOutfits::ALL {
            capsule.number_of_outfits = *bucket;
            capsule.colors = Color::ALL.iter().copied().collect();
            let token = encode(&capsule).unwrap();
            assert_eq!(decode(token.as_str()).unwrap(), capsule);
        }
    }

    #[test]
    fn test_decode_without_padding() {
        let token = encode(&office_capsule()).unwrap();
        let unpadded = token.as_str().trim_end_matches('=');
        assert_eq!(decode(unpadded).unwrap(), office_capsule());
    }

    #[test]
    fn test_same_capsule_same_token() {
        let a = encode(&office_capsule()).unwrap();
        let b = encode(&office_capsule()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_malformed_tokens() {
        let not_base64 = decode("%%%not-a-token%%%");
        assert!(matches!(not_base64, Err(CapsuleError::MalformedToken { .. })));

        let not_json = TOKEN_ENGINE.encode("hello");
        assert!(matches!(decode(&not_json), Err(CapsuleError::MalformedToken { .. })));

        let bad_literal = TOKEN_ENGINE.encode(
            r#"{"season":"Winter","style":"Casual","numberOfOutfits":"From10to20","colors":[],"preferences":[]}"#,
        );
        assert!(matches!(decode(&bad_literal), Err(CapsuleError::MalformedToken { .. })));

        let missing_field = TOKEN_ENGINE.encode(r#"{"season":"AutumnWinter"}"#);
        assert!(matches!(decode(&missing_field), Err(CapsuleError::MalformedToken { .. })));
    }

    #[test]
    fn test_share_link_and_location() {
        let token = encode(&Capsule::default()).unwrap();
        let link = share_link("http://localhost:8080/", &token).unwrap();

        assert_eq!(link.as_str(), format!("http://localhost:8080/#/{}", DEFAULT_TOKEN));
        assert_eq!(token_from_location(&link), Some(DEFAULT_TOKEN));
    }

    #[test]
    fn test_location_without_token() {
        let bare = Url::parse("http://localhost:8080/").unwrap();
        let empty = Url::parse("http://localhost:8080/#/").unwrap();
        assert_eq!(token_from_location(&bare), None);
        assert_eq!(token_from_location(&empty), None);
    }
}
