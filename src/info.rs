use crate::error::ErrorKind;
use crate::ext::Extendable;
use crate::validate::{join_loc, Diagnostic, ValidateSpec, Validator};
use serde::{Deserialize, Serialize};
use url::Url;

/// Metadata about the described API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Extendable<Contact>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<Extendable<License>>,
    #[serde(default)]
    pub version: String,
}

impl ValidateSpec for Info {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.title.is_empty() {
            errs.push(Diagnostic::required(join_loc(location, "title")));
        }
        if self.version.is_empty() {
            errs.push(Diagnostic::required(join_loc(location, "version")));
        }
        if let Some(contact) = &self.contact {
            errs.extend(contact.validate_spec(&join_loc(location, "contact"), validator));
        }
        if let Some(license) = &self.license {
            errs.extend(license.validate_spec(&join_loc(location, "license"), validator));
        }
        errs
    }
}

/// Contact information for the exposed API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ValidateSpec for Contact {
    fn validate_spec(&self, location: &str, _validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if let Some(err) = check_url(self.url.as_deref()) {
            errs.push(Diagnostic::new(
                join_loc(location, "url"),
                ErrorKind::InvalidPattern,
                err,
            ));
        }
        errs
    }
}

/// License information for the exposed API. The `identifier` and `url`
/// fields are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ValidateSpec for License {
    fn validate_spec(&self, location: &str, _validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        if self.name.is_empty() {
            errs.push(Diagnostic::required(join_loc(location, "name")));
        }
        if self.identifier.is_some() && self.url.is_some() {
            errs.push(Diagnostic::mutually_exclusive(join_loc(
                location,
                "identifier&url",
            )));
        }
        if let Some(err) = check_url(self.url.as_deref()) {
            errs.push(Diagnostic::new(
                join_loc(location, "url"),
                ErrorKind::InvalidPattern,
                err,
            ));
        }
        errs
    }
}

/// Returns the parse failure for a present, malformed URL.
pub(crate) fn check_url(url: Option<&str>) -> Option<String> {
    let url = url?;
    match Url::parse(url) {
        Ok(_) => None,
        Err(err) => Some(format!("invalid url '{url}': {err}")),
    }
}
