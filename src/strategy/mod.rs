//! # Resolution Strategies
//!
//! Each strategy rewrites declarations so that one link of a cycle no longer
//! forces eager construction, or pulls the cycled behavior out into a new
//! declaration. Strategies never touch the registry: they work on private
//! copy-on-write copies and hand the result to the caller, who decides
//! whether to commit it.
//!
//! | Strategy | Accepts | Effect |
//! |----------|---------|--------|
//! | [`LazyAnnotationStrategy`] | field and setter edges | marks the injection point lazy |
//! | [`SetterInjectionStrategy`] | constructor edges | moves the parameter into a lazy setter |
//! | [`InterfaceExtractionStrategy`] | field and setter edges | injects an extracted interface instead |
//! | [`MethodExtractionStrategy`] | whole cycles | synthesizes a mediator with the cycled methods |

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::MarkerConfig;
use crate::error::UnwireError;
use crate::graph::{DependencyEdge, Fqn, InjectionKind};
use crate::model::Declaration;
use crate::registry::DeclarationRegistry;
use crate::writer::DeclarationWriter;

mod interface;
mod lazy;
mod method;
mod setter;
mod usage;

pub use interface::InterfaceExtractionStrategy;
pub use lazy::LazyAnnotationStrategy;
pub use method::MethodExtractionStrategy;
pub use setter::SetterInjectionStrategy;

/// What a strategy is asked to break
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    Edge(&'a DependencyEdge),
    Cycle(&'a [Fqn]),
}

/// Read-only collaborators shared by every strategy
#[derive(Clone, Copy)]
pub struct StrategyContext<'a> {
    pub registry: &'a DeclarationRegistry,
    pub markers: &'a MarkerConfig,
    pub writer: &'a dyn DeclarationWriter,
}

/// Declarations a strategy has rewritten or created so far
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    dry_run: bool,
    modified: IndexMap<Fqn, Declaration>,
    generated: IndexMap<Fqn, Declaration>,
    outcome: Option<bool>,
}

impl ChangeSet {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// The current version of `fqn`: a tracked copy if there is one, else a
    /// cheap clone of the registry entry
    pub fn working_copy(&self, fqn: &str, registry: &DeclarationRegistry) -> Option<Declaration> {
        self.modified
            .get(fqn)
            .or_else(|| self.generated.get(fqn))
            .or_else(|| registry.get(fqn))
            .cloned()
    }

    pub fn track_modified(&mut self, declaration: Declaration) {
        let fqn = declaration.fqn();
        if self.generated.contains_key(&fqn) {
            self.generated.insert(fqn, declaration);
        } else {
            self.modified.insert(fqn, declaration);
        }
    }

    pub fn track_generated(&mut self, declaration: Declaration) {
        self.generated.insert(declaration.fqn(), declaration);
    }

    /// Whether `fqn` is already taken by the registry or by this change set
    pub fn is_taken(&self, fqn: &str, registry: &DeclarationRegistry) -> bool {
        registry.contains(fqn) || self.modified.contains_key(fqn) || self.generated.contains_key(fqn)
    }

    /// Fold one application outcome into the overall success
    pub fn record(&mut self, ok: bool) -> bool {
        self.outcome = Some(self.outcome.unwrap_or(true) && ok);
        ok
    }

    pub fn success(&self) -> bool {
        self.outcome.unwrap_or(false)
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn modified(&self) -> &IndexMap<Fqn, Declaration> {
        &self.modified
    }

    pub fn generated(&self) -> &IndexMap<Fqn, Declaration> {
        &self.generated
    }

    /// Persist every tracked declaration. Nothing is written in dry-run mode.
    pub fn write(&self, writer: &dyn DeclarationWriter, base: &Path) -> Result<(), UnwireError> {
        if self.dry_run {
            return Ok(());
        }
        for (fqn, declaration) in self.modified.iter().chain(&self.generated) {
            writer.persist(fqn, declaration, base)?;
        }
        Ok(())
    }

    pub fn into_result(self) -> StrategyResult {
        StrategyResult {
            success: self.success(),
            modified_declarations: self.modified,
            generated_declarations: self.generated,
            dry_run: self.dry_run,
        }
    }
}

/// The outcome of one strategy instance
#[derive(Debug, Clone, Serialize)]
pub struct StrategyResult {
    pub success: bool,
    pub modified_declarations: IndexMap<Fqn, Declaration>,
    pub generated_declarations: IndexMap<Fqn, Declaration>,
    pub dry_run: bool,
}

pub trait ResolutionStrategy {
    fn kind(&self) -> StrategyKind;

    /// Try to break `subject`. Returns `false`, leaving the change set as it
    /// was, when the subject is ineligible.
    fn apply(&mut self, subject: Subject<'_>) -> bool;

    fn changes(&self) -> &ChangeSet;

    fn into_changes(self: Box<Self>) -> ChangeSet;

    fn writer(&self) -> &dyn DeclarationWriter;

    fn modified_declarations(&self) -> &IndexMap<Fqn, Declaration> {
        self.changes().modified()
    }

    fn generated_declarations(&self) -> &IndexMap<Fqn, Declaration> {
        self.changes().generated()
    }

    fn is_dry_run(&self) -> bool {
        self.changes().is_dry_run()
    }

    fn write_changes(&self, base: &Path) -> Result<(), UnwireError> {
        self.changes().write(self.writer(), base)
    }

    fn into_result(self: Box<Self>) -> StrategyResult {
        self.into_changes().into_result()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    LazyAnnotation,
    SetterInjection,
    InterfaceExtraction,
    MethodExtraction,
}

impl StrategyKind {
    /// Single-edge strategies, most preferred first
    pub const EDGE_PREFERENCE: [StrategyKind; 3] = [
        StrategyKind::LazyAnnotation,
        StrategyKind::SetterInjection,
        StrategyKind::InterfaceExtraction,
    ];

    pub fn instantiate<'a>(
        self,
        ctx: StrategyContext<'a>,
        dry_run: bool,
    ) -> Box<dyn ResolutionStrategy + 'a> {
        match self {
            StrategyKind::LazyAnnotation => Box::new(LazyAnnotationStrategy::new(ctx, dry_run)),
            StrategyKind::SetterInjection => Box::new(SetterInjectionStrategy::new(ctx, dry_run)),
            StrategyKind::InterfaceExtraction => {
                Box::new(InterfaceExtractionStrategy::new(ctx, dry_run))
            }
            StrategyKind::MethodExtraction => Box::new(MethodExtractionStrategy::new(ctx, dry_run)),
        }
    }

    /// Whether the single-edge strategy could ever accept an edge of `kind`
    pub fn handles(self, kind: InjectionKind) -> bool {
        match self {
            StrategyKind::LazyAnnotation | StrategyKind::InterfaceExtraction => {
                matches!(kind, InjectionKind::Field | InjectionKind::Setter)
            }
            StrategyKind::SetterInjection => kind == InjectionKind::Constructor,
            StrategyKind::MethodExtraction => false,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StrategyKind::LazyAnnotation => "lazy annotation",
            StrategyKind::SetterInjection => "setter injection",
            StrategyKind::InterfaceExtraction => "interface extraction",
            StrategyKind::MethodExtraction => "method extraction",
        };
        write!(f, "{label}")
    }
}
