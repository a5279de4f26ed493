use crate::checker::ExampleChecker;
use crate::components::{Component, Components};
use crate::document::OpenApi;
use crate::error::ErrorKind;
use crate::ext::Extendable;
use crate::refs::RefOrSpec;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// One reported rule violation: where, what kind, and a human message.
///
/// Location paths are slash-joined segment sequences mirroring the document's
/// nesting, e.g. `components/parameters/id/in`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub location: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(location: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn required(location: impl Into<String>) -> Self {
        Self::new(location, ErrorKind::Required, "required")
    }

    pub(crate) fn mutually_exclusive(location: impl Into<String>) -> Self {
        Self::new(location, ErrorKind::MutuallyExclusive, "mutually exclusive")
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.location, self.message, self.kind)
    }
}

/// Options recognized by a validation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationOptions {
    /// Suppresses all example-data checks without affecting other rules.
    pub skip_example_validation: bool,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_example_validation(mut self, skip: bool) -> Self {
        self.skip_example_validation = skip;
        self
    }
}

/// Per-run traversal state: the visited set shared by cycle breaking and
/// de-duplication, the diagnostic-free side table of link targets, and the
/// example checker handle. Created per validation run and discarded after;
/// the document itself is never mutated.
pub(crate) struct Validator<'a> {
    pub(crate) spec: &'a OpenApi,
    pub(crate) opts: ValidationOptions,
    pub(crate) visited: HashSet<String>,
    pub(crate) link_operation_ids: BTreeMap<String, String>,
    checker: Option<&'a dyn ExampleChecker>,
}

impl<'a> Validator<'a> {
    fn new(
        spec: &'a OpenApi,
        opts: ValidationOptions,
        checker: Option<&'a dyn ExampleChecker>,
    ) -> Self {
        Self {
            spec,
            opts,
            visited: HashSet::new(),
            link_operation_ids: BTreeMap::new(),
            checker,
        }
    }

    pub(crate) fn components(&self) -> Option<&'a Extendable<Components>> {
        self.spec.components.as_ref()
    }

    /// Marks a reference identifier visited; returns false when it was
    /// already covered by an earlier path through the graph.
    pub(crate) fn mark_visited(&mut self, key: impl Into<String>) -> bool {
        self.visited.insert(key.into())
    }

    /// Runs the external schema checker for one candidate value. Returns the
    /// failure message, if any; `None` when checking is disabled.
    pub(crate) fn check_example(
        &self,
        schema_location: &str,
        value: &serde_json::Value,
    ) -> Option<String> {
        let checker = self.checker?;
        checker.check_example(schema_location, value).err().map(|e| e.to_string())
    }
}

pub(crate) trait ValidateSpec {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic>;
}

impl<T: ValidateSpec> ValidateSpec for Extendable<T> {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        self.spec.validate_spec(location, validator)
    }
}

impl<T: ValidateSpec + Component> ValidateSpec for RefOrSpec<T> {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let r = match self {
            RefOrSpec::Spec(spec) => return spec.validate_spec(location, validator),
            RefOrSpec::Ref(r) => r,
        };
        // A reference already entered this run is fully covered elsewhere.
        if !validator.mark_visited(r.reference.clone()) {
            return Vec::new();
        }
        let mut chain = Vec::new();
        match self.resolve_with(validator.components(), &mut chain) {
            Err(err) => vec![Diagnostic::new(
                location,
                ErrorKind::ReferenceResolutionFailed,
                err.to_string(),
            )],
            Ok(target) => {
                // Every identifier traversed on the way to the target counts
                // as visited, so an alias chain cannot get its target
                // re-validated by a later walk. If the final identifier was
                // already covered, the target was too.
                let mut covered = false;
                for reference in chain.iter().skip(1) {
                    covered = !validator.mark_visited(reference.clone());
                }
                if covered {
                    return Vec::new();
                }
                // The target is checked at its own declared location, not at
                // the location of the referencing container.
                let target_ref = chain.last().map_or(r.reference.as_str(), String::as_str);
                target.validate_spec(&ref_location(target_ref), validator)
            }
        }
    }
}

/// Entry point shared by the public `validate` methods on [`OpenApi`].
pub(crate) fn run_validation(
    spec: &OpenApi,
    opts: ValidationOptions,
    checker: Option<&dyn ExampleChecker>,
) -> Vec<Diagnostic> {
    let mut validator = Validator::new(spec, opts, checker);
    let diagnostics = spec.validate_spec("", &mut validator);
    // TODO: verify collected link operationIds once operation lookup by id is
    // wired up; for now the targets are only gathered.
    log::debug!(
        "validation finished with {} diagnostics, {} link operation targets collected",
        diagnostics.len(),
        validator.link_operation_ids.len()
    );
    diagnostics
}

/// Joins one more segment onto a slash-separated location path.
pub(crate) fn join_loc(location: &str, segment: impl AsRef<str>) -> String {
    let segment = segment.as_ref();
    if location.is_empty() {
        segment.to_string()
    } else {
        format!("{location}/{segment}")
    }
}

/// The declared location of a referenced target, e.g.
/// `#/components/schemas/Pet` validates at `components/schemas/Pet`.
pub(crate) fn ref_location(reference: &str) -> String {
    reference.trim_start_matches("#/").to_string()
}
