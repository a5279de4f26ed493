use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum OasError {
    #[error("failed to decode JSON document")]
    #[diagnostic(code(oas::decode::json))]
    Json(#[from] serde_json::Error),

    #[error("failed to decode YAML document")]
    #[diagnostic(code(oas::decode::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] ResolveError),
}

/// Failure of a single reference resolution against the `components` section.
///
/// Cycle messages carry the chain of already-visited references so a bad
/// document can be diagnosed without re-walking it.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("reference is empty")]
    #[diagnostic(
        code(oas::resolve::nil_reference),
        help("a reference container must carry a non-empty `$ref` or an inline value")
    )]
    NilReference,

    #[error("cycle detected for reference '{reference}'; visited: {chain}")]
    #[diagnostic(code(oas::resolve::cycle))]
    CycleDetected { reference: String, chain: String },

    #[error("resolving outside of '#/components/' is not supported for reference '{reference}'")]
    #[diagnostic(
        code(oas::resolve::unsupported_remote),
        help("remote and document-external references are rejected, not fetched")
    )]
    UnsupportedRemoteReference { reference: String },

    #[error("document has no components section, required by reference '{reference}'")]
    #[diagnostic(code(oas::resolve::components_required))]
    ComponentsRequired { reference: String },

    #[error("component '{reference}' not found")]
    #[diagnostic(code(oas::resolve::not_found))]
    NotFound { reference: String },

    #[error("reference '{reference}' points at '{found}' components, expected '{expected}'")]
    #[diagnostic(code(oas::resolve::type_mismatch))]
    TypeMismatch {
        reference: String,
        expected: &'static str,
        found: String,
    },
}

/// Classification of a single validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required field is missing or empty.
    Required,
    /// Two fields that exclude each other are both present.
    MutuallyExclusive,
    /// A value is outside its closed set of allowed values.
    InvalidEnum,
    /// A key or value does not match its required pattern.
    InvalidPattern,
    /// A field is set in a context where it is not allowed.
    UnsupportedCombination,
    /// A reference could not be resolved against the components section.
    ReferenceResolutionFailed,
    /// An example value does not satisfy its governing schema.
    ExampleValidationFailed,
    /// A container was instantiated over an object kind without a rule check.
    UnsupportedObjectKind,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Required => "required",
            ErrorKind::MutuallyExclusive => "mutually exclusive",
            ErrorKind::InvalidEnum => "invalid enum value",
            ErrorKind::InvalidPattern => "invalid pattern",
            ErrorKind::UnsupportedCombination => "unsupported combination",
            ErrorKind::ReferenceResolutionFailed => "reference resolution failed",
            ErrorKind::ExampleValidationFailed => "example validation failed",
            ErrorKind::UnsupportedObjectKind => "unsupported object kind",
        };
        f.write_str(name)
    }
}
