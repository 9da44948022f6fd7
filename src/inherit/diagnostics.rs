//! Diagnostics: reporting tolerated conditions.
//!
//! Nothing the engine meets in well-formed input is fatal. Unresolvable parent
//! references, duplicate template identifiers and skipped cycles are recorded
//! here so callers can surface them, and resolution carries on.

use smol_str::SmolStr;

use crate::base::Position;
use crate::layer::LayerId;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Hint,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Hint => "hint",
        }
    }
}

/// A diagnostic message about one definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable code, see [`codes`].
    pub code: &'static str,
    pub message: String,
    /// Layer holding the definition.
    pub layer: LayerId,
    pub def_type: SmolStr,
    /// Source position of the definition, when it was parsed from text.
    pub position: Option<Position>,
}

impl Diagnostic {
    pub fn warning(
        code: &'static str,
        layer: LayerId,
        def_type: impl Into<SmolStr>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            layer,
            def_type: def_type.into(),
            position: None,
        }
    }

    pub fn hint(
        code: &'static str,
        layer: LayerId,
        def_type: impl Into<SmolStr>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Hint,
            ..Self::warning(code, layer, def_type, message)
        }
    }

    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}] {} {}", self.severity.as_str(), self.code, self.layer, self.def_type)?;
        if let Some(position) = self.position {
            write!(f, " at {position}")?;
        }
        write!(f, ": {}", self.message)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Diagnostic codes.
pub mod codes {
    /// Parent reference matched no template in any visible layer.
    pub const UNRESOLVED_PARENT: &str = "unresolved-parent";
    /// A later definition in the same layer reused a template identifier.
    pub const DUPLICATE_TEMPLATE: &str = "duplicate-template";
    /// Definitions left unmerged because their parents form a cycle.
    pub const INHERITANCE_CYCLE: &str = "inheritance-cycle";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during resolution.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn unresolved_parent(
        &mut self,
        layer: LayerId,
        def_type: &str,
        node_label: &str,
        parent_ref: &str,
        position: Option<Position>,
    ) {
        self.add(
            Diagnostic::warning(
                codes::UNRESOLVED_PARENT,
                layer,
                def_type,
                format!("{node_label} inherits from unknown template '{parent_ref}'"),
            )
            .with_position(position),
        );
    }

    pub fn duplicate_template(
        &mut self,
        layer: LayerId,
        def_type: &str,
        template_id: &str,
        position: Option<Position>,
    ) {
        self.add(
            Diagnostic::hint(
                codes::DUPLICATE_TEMPLATE,
                layer,
                def_type,
                format!("template '{template_id}' redefined; the later definition wins"),
            )
            .with_position(position),
        );
    }

    pub fn inheritance_cycle(&mut self, layer: LayerId, def_type: &str, chain: &[SmolStr]) {
        self.add(Diagnostic::warning(
            codes::INHERITANCE_CYCLE,
            layer,
            def_type,
            format!("parent references form a cycle: {}", chain.join(" -> ")),
        ));
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
