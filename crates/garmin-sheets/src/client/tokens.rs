use serde::{Deserialize, Serialize};

/// Bearer credential returned by the Garmin login exchange.
/// Valid for the lifetime of one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionToken {
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub access_token: String,
    #[serde(default)]
    pub expires_in: i64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl SessionToken {
    /// Returns the Authorization header value.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header() {
        let token = SessionToken {
            token_type: "Bearer".to_string(),
            access_token: "my_access_token".to_string(),
            expires_in: 3600,
        };
        assert_eq!(token.authorization_header(), "Bearer my_access_token");
    }

    #[test]
    fn test_token_type_defaults_to_bearer() {
        let token: SessionToken =
            serde_json::from_str(r#"{"access_token": "abc"}"#).unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 0);
    }

    #[test]
    fn test_token_serialization_round_trip() {
        let token = SessionToken {
            token_type: "Bearer".to_string(),
            access_token: "access123".to_string(),
            expires_in: 3600,
        };
        let json = serde_json::to_string(&token).unwrap();
        let deserialized: SessionToken = serde_json::from_str(&json).unwrap();
        assert_eq!(token, deserialized);
    }
}
