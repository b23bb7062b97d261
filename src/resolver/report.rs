use std::fmt;

use indexmap::IndexSet;
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::graph::{Cycle, Fqn, InjectionKind};
use crate::strategy::StrategyKind;

/// An injection edge of an unresolved cycle that every strategy turned down
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedEdge {
    pub from: Fqn,
    pub to: Fqn,
    pub kind: InjectionKind,
}

impl fmt::Display for RejectedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {} ({})", self.from, self.to, self.kind)
    }
}

#[derive(Debug, Clone, Error, Diagnostic, Serialize)]
#[error("Could not break cycle {}", .members.join(" → "))]
#[diagnostic(
    code(unwire::unresolved_cycle),
    help("No strategy accepts these injection points; restructure the components by hand")
)]
pub struct UnresolvedCycle {
    pub members: Cycle,
    pub rejected: Vec<RejectedEdge>,
}

/// What happened to one elementary cycle
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CycleOutcome {
    Resolved {
        cycle: Cycle,
        strategy: StrategyKind,
        /// The link the strategy broke; `None` for whole-cycle strategies
        link: Option<(Fqn, Fqn)>,
        modified: Vec<Fqn>,
        generated: Vec<Fqn>,
    },
    /// An earlier resolution already broke one of the cycle's links
    AlreadyBroken { cycle: Cycle },
    Unresolved(UnresolvedCycle),
    /// Member of a component too large to enumerate
    Skipped { members: Vec<Fqn> },
}

impl CycleOutcome {
    pub fn members(&self) -> &[Fqn] {
        match self {
            CycleOutcome::Resolved { cycle, .. } | CycleOutcome::AlreadyBroken { cycle } => cycle,
            CycleOutcome::Unresolved(unresolved) => &unresolved.members,
            CycleOutcome::Skipped { members } => members,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolutionReport {
    pub dry_run: bool,
    pub outcomes: Vec<CycleOutcome>,
    /// Every declaration rewritten during the run, in commit order
    pub modified: IndexSet<Fqn>,
    /// Every declaration created during the run, in commit order
    pub generated: IndexSet<Fqn>,
}

impl ResolutionReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    pub fn resolved_count(&self) -> usize {
        self.count(|o| matches!(o, CycleOutcome::Resolved { .. }))
    }

    pub fn already_broken_count(&self) -> usize {
        self.count(|o| matches!(o, CycleOutcome::AlreadyBroken { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, CycleOutcome::Skipped { .. }))
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &UnresolvedCycle> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            CycleOutcome::Unresolved(unresolved) => Some(unresolved),
            _ => None,
        })
    }

    /// No cycle was left unresolved or skipped
    pub fn is_complete(&self) -> bool {
        self.unresolved().next().is_none() && self.skipped_count() == 0
    }

    fn count(&self, predicate: impl Fn(&CycleOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(*o)).count()
    }
}
