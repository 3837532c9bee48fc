#![deny(missing_docs)]

//! # Security Schemes and Requirements

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Required security schemes to execute an operation, keyed by scheme name.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// The type of a security scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecuritySchemeType {
    /// API key in a header, query parameter or cookie.
    #[default]
    #[serde(rename = "apiKey")]
    ApiKey,
    /// HTTP authentication (RFC 7235), e.g. basic or bearer.
    #[serde(rename = "http")]
    Http,
    /// Mutual TLS.
    #[serde(rename = "mutualTLS")]
    MutualTls,
    /// OAuth2 flows.
    #[serde(rename = "oauth2")]
    OAuth2,
    /// OpenID Connect Discovery.
    #[serde(rename = "openIdConnect")]
    OpenIdConnect,
}

/// Where an API key is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    /// Query parameter.
    Query,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
}

/// Defines a security scheme that can be used by the operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityScheme {
    /// **REQUIRED**. The type of the security scheme.
    #[serde(rename = "type")]
    pub scheme_type: SecuritySchemeType,

    /// A description for security scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `apiKey` only: the name of the header, query or cookie parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `apiKey` only: the location of the API key.
    #[serde(
        rename = "in",
        alias = "security_scheme_in",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub security_scheme_in: Option<ApiKeyLocation>,

    /// `http` only: the HTTP Authorization scheme name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    /// `http` bearer only: a hint for the bearer token format.
    #[serde(
        rename = "bearerFormat",
        alias = "bearer_format",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub bearer_format: Option<String>,

    /// `oauth2` only: the supported flows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flows: Option<OAuthFlows>,

    /// `openIdConnect` only: the OpenID Connect discovery URL.
    #[serde(
        rename = "openIdConnectUrl",
        alias = "open_id_connect_url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub open_id_connect_url: Option<String>,
}

/// Configuration of the supported OAuth flows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthFlows {
    /// Implicit flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implicit: Option<OAuthFlow>,

    /// Resource Owner Password flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<OAuthFlow>,

    /// Client Credentials flow.
    #[serde(
        rename = "clientCredentials",
        alias = "client_credentials",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub client_credentials: Option<OAuthFlow>,

    /// Authorization Code flow.
    #[serde(
        rename = "authorizationCode",
        alias = "authorization_code",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub authorization_code: Option<OAuthFlow>,
}

/// Configuration details for a supported OAuth Flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthFlow {
    /// The authorization URL (`implicit`, `authorizationCode`).
    #[serde(
        rename = "authorizationUrl",
        alias = "authorization_url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub authorization_url: Option<String>,

    /// The token URL (`password`, `clientCredentials`, `authorizationCode`).
    #[serde(
        rename = "tokenUrl",
        alias = "token_url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub token_url: Option<String>,

    /// The URL to be used for obtaining refresh tokens.
    #[serde(
        rename = "refreshUrl",
        alias = "refresh_url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub refresh_url: Option<String>,

    /// **REQUIRED**. Available scopes mapped to a short description.
    #[serde(default)]
    pub scopes: IndexMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_security_scheme_alias() {
        let built = SecurityScheme {
            scheme_type: SecuritySchemeType::ApiKey,
            security_scheme_in: Some(ApiKeyLocation::Header),
            ..SecurityScheme::default()
        };
        let by_field: SecurityScheme = serde_json::from_value(json!({
            "type": "apiKey",
            "security_scheme_in": "header"
        }))
        .unwrap();
        let by_keyword: SecurityScheme =
            serde_json::from_value(json!({"type": "apiKey", "in": "header"})).unwrap();
        assert_eq!(built, by_field);
        assert_eq!(by_field, by_keyword);
        assert_eq!(
            serde_json::to_value(&built).unwrap(),
            json!({"type": "apiKey", "in": "header"})
        );
    }

    #[test]
    fn test_oauth2_flows() {
        let scheme: SecurityScheme = serde_json::from_value(json!({
            "type": "oauth2",
            "flows": {
                "implicit": {
                    "authorizationUrl": "http://example.org/api/oauth/dialog",
                    "scopes": {"write:pets": "modify pets in your account"}
                }
            }
        }))
        .unwrap();
        let implicit = scheme.flows.and_then(|f| f.implicit).unwrap();
        assert_eq!(implicit.scopes.len(), 1);
    }
}
