use crate::error::OwlXmlError;
use std::fmt;
use tracing::debug;

/// How serious a [`Diagnostic`] is.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

/// The category of a [`Diagnostic`].
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum DiagnosticKind {
    /// An invalid URI, XML name, language tag or base.
    MalformedReference,
    /// A second declaration of an `rdf:ID`, a namespace prefix or a blank node name.
    DuplicateDeclaration,
    /// `rdf:about`, `rdf:ID` and `rdf:nodeID` (or `rdf:resource`, `rdf:nodeID` and `rdf:parseType`) used together.
    ConflictingIdentityAttributes,
    /// A reserved RDF name used as a node or property element.
    ReservedElementMisuse,
    UnqualifiedAttribute,
    UnknownParseType,
    /// Text or elements where none are allowed.
    UnexpectedContent,
    /// A name in the RDF or OWL namespace that is not part of the vocabulary.
    UnknownVocabulary,
}

/// A problem found while parsing or generating a document.
#[derive(Eq, PartialEq, Debug, Clone, thiserror::Error)]
#[error("{severity}: {message}")]
pub struct Diagnostic {
    kind: DiagnosticKind,
    severity: Severity,
    message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The errors, warnings and informational messages produced by a call, in the order they were found.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
    messages: Vec<String>,
}

impl Diagnostics {
    #[inline]
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    #[inline]
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    #[inline]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if there are no errors and no warnings.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Collects diagnostics and turns them into a failure when the matching stop flag is set.
pub(crate) struct Reporter {
    diagnostics: Diagnostics,
    stop_on_errors: bool,
    stop_on_warnings: bool,
}

impl Reporter {
    pub(crate) fn new(stop_on_errors: bool, stop_on_warnings: bool) -> Self {
        Self {
            diagnostics: Diagnostics::default(),
            stop_on_errors,
            stop_on_warnings,
        }
    }

    pub(crate) fn error(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Result<(), OwlXmlError> {
        let diagnostic = Diagnostic::new(kind, Severity::Error, message);
        debug!("{diagnostic}");
        self.diagnostics.errors.push(diagnostic.clone());
        if self.stop_on_errors {
            return Err(diagnostic.into());
        }
        Ok(())
    }

    pub(crate) fn warning(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Result<(), OwlXmlError> {
        let diagnostic = Diagnostic::new(kind, Severity::Warning, message);
        debug!("{diagnostic}");
        self.diagnostics.warnings.push(diagnostic.clone());
        if self.stop_on_warnings {
            return Err(diagnostic.into());
        }
        Ok(())
    }

    pub(crate) fn message(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("{message}");
        self.diagnostics.messages.push(message);
    }

    pub(crate) fn finish(self) -> Diagnostics {
        self.diagnostics
    }
}
