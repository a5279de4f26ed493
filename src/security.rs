use crate::error::ErrorKind;
use crate::ext::Extendable;
use crate::info::check_url;
use crate::parameter::ParameterIn;
use crate::validate::{join_loc, Diagnostic, ValidateSpec, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A security requirement: scheme name to required scopes.
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SecuritySchemeType {
    ApiKey,
    Http,
    MutualTls,
    Oauth2,
    OpenIdConnect,
    Unknown(String),
}

impl Default for SecuritySchemeType {
    fn default() -> Self {
        SecuritySchemeType::Unknown(String::new())
    }
}

impl From<String> for SecuritySchemeType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "apiKey" => SecuritySchemeType::ApiKey,
            "http" => SecuritySchemeType::Http,
            "mutualTLS" => SecuritySchemeType::MutualTls,
            "oauth2" => SecuritySchemeType::Oauth2,
            "openIdConnect" => SecuritySchemeType::OpenIdConnect,
            _ => SecuritySchemeType::Unknown(s),
        }
    }
}

impl From<SecuritySchemeType> for String {
    fn from(v: SecuritySchemeType) -> Self {
        v.to_string()
    }
}

impl fmt::Display for SecuritySchemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SecuritySchemeType::ApiKey => "apiKey",
            SecuritySchemeType::Http => "http",
            SecuritySchemeType::MutualTls => "mutualTLS",
            SecuritySchemeType::Oauth2 => "oauth2",
            SecuritySchemeType::OpenIdConnect => "openIdConnect",
            SecuritySchemeType::Unknown(s) => s,
        };
        f.write_str(s)
    }
}

/// A security scheme usable by the described operations. Which fields are
/// required depends on the scheme type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    #[serde(rename = "type", default, skip_serializing_if = "scheme_type_is_unset")]
    pub scheme_type: SecuritySchemeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ParameterIn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flows: Option<Extendable<OAuthFlows>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_id_connect_url: Option<String>,
}

fn scheme_type_is_unset(v: &SecuritySchemeType) -> bool {
    matches!(v, SecuritySchemeType::Unknown(s) if s.is_empty())
}

impl ValidateSpec for SecurityScheme {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        match &self.scheme_type {
            SecuritySchemeType::ApiKey => {
                if self.name.as_deref().unwrap_or_default().is_empty() {
                    errs.push(Diagnostic::required(join_loc(location, "name")));
                }
                match &self.location {
                    Some(ParameterIn::Query | ParameterIn::Header | ParameterIn::Cookie) => {}
                    Some(other) => errs.push(Diagnostic::new(
                        join_loc(location, "in"),
                        ErrorKind::InvalidEnum,
                        format!(
                            "invalid value, expected one of [query, header, cookie], but got '{other}'"
                        ),
                    )),
                    None => errs.push(Diagnostic::required(join_loc(location, "in"))),
                }
            }
            SecuritySchemeType::Http => {
                if self.scheme.as_deref().unwrap_or_default().is_empty() {
                    errs.push(Diagnostic::required(join_loc(location, "scheme")));
                }
            }
            SecuritySchemeType::MutualTls => {}
            SecuritySchemeType::Oauth2 => {
                if self.flows.is_none() {
                    errs.push(Diagnostic::required(join_loc(location, "flows")));
                }
            }
            SecuritySchemeType::OpenIdConnect => {
                match self.open_id_connect_url.as_deref() {
                    None | Some("") => errs.push(Diagnostic::required(join_loc(
                        location,
                        "openIdConnectUrl",
                    ))),
                    url => {
                        if let Some(err) = check_url(url) {
                            errs.push(Diagnostic::new(
                                join_loc(location, "openIdConnectUrl"),
                                ErrorKind::InvalidPattern,
                                err,
                            ));
                        }
                    }
                }
            }
            SecuritySchemeType::Unknown(s) if s.is_empty() => {
                errs.push(Diagnostic::required(join_loc(location, "type")));
            }
            SecuritySchemeType::Unknown(s) => {
                errs.push(Diagnostic::new(
                    join_loc(location, "type"),
                    ErrorKind::InvalidEnum,
                    format!(
                        "invalid value, expected one of [apiKey, http, mutualTLS, oauth2, \
                         openIdConnect], but got '{s}'"
                    ),
                ));
            }
        }
        if let Some(flows) = &self.flows {
            errs.extend(flows.validate_spec(&join_loc(location, "flows"), validator));
        }
        errs
    }
}

/// Configuration of the supported OAuth flow variants.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlows {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implicit: Option<Extendable<OAuthFlow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Extendable<OAuthFlow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_credentials: Option<Extendable<OAuthFlow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<Extendable<OAuthFlow>>,
}

impl ValidateSpec for OAuthFlows {
    fn validate_spec(&self, location: &str, _validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        // Each flow variant requires its own combination of endpoint URLs.
        if let Some(implicit) = &self.implicit {
            if implicit.spec.authorization_url.is_none() {
                errs.push(Diagnostic::required(join_loc(
                    &join_loc(location, "implicit"),
                    "authorizationUrl",
                )));
            }
        }
        if let Some(password) = &self.password {
            if password.spec.token_url.is_none() {
                errs.push(Diagnostic::required(join_loc(
                    &join_loc(location, "password"),
                    "tokenUrl",
                )));
            }
        }
        if let Some(client_credentials) = &self.client_credentials {
            if client_credentials.spec.token_url.is_none() {
                errs.push(Diagnostic::required(join_loc(
                    &join_loc(location, "clientCredentials"),
                    "tokenUrl",
                )));
            }
        }
        if let Some(authorization_code) = &self.authorization_code {
            if authorization_code.spec.authorization_url.is_none() {
                errs.push(Diagnostic::required(join_loc(
                    &join_loc(location, "authorizationCode"),
                    "authorizationUrl",
                )));
            }
            if authorization_code.spec.token_url.is_none() {
                errs.push(Diagnostic::required(join_loc(
                    &join_loc(location, "authorizationCode"),
                    "tokenUrl",
                )));
            }
        }
        errs
    }
}

/// A single OAuth flow configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scopes: BTreeMap<String, String>,
}
