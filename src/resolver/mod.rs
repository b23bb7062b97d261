//! # Cycle Resolution
//!
//! [`CycleResolver`] drives the whole pipeline: it builds the dependency
//! graph, enumerates elementary cycles shortest first, and for each cycle
//! tries the single-edge strategies link by link before falling back to
//! method extraction. A successful attempt is committed into the registry
//! (and persisted unless running dry); a failed one is dropped without a
//! trace.
//!
//! ## Example
//!
//! ```
//! use std::path::Path;
//!
//! use unwire::config::MarkerConfig;
//! use unwire::error::UnwireError;
//! use unwire::model::{Declaration, Field, TypeRef};
//! use unwire::registry::DeclarationRegistry;
//! use unwire::resolver::CycleResolver;
//! use unwire::writer::DeclarationWriter;
//!
//! struct Discard;
//!
//! impl DeclarationWriter for Discard {
//!     fn persist(&self, _: &str, _: &Declaration, _: &Path) -> Result<(), UnwireError> {
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), UnwireError> {
//! let mut registry: DeclarationRegistry = [
//!     Declaration::class("app", "A")
//!         .with_annotation("Service")
//!         .with_member(Field::new("b", TypeRef::simple("B")).with_annotation("Autowired")),
//!     Declaration::class("app", "B")
//!         .with_annotation("Service")
//!         .with_member(Field::new("a", TypeRef::simple("A")).with_annotation("Autowired")),
//! ]
//! .into_iter()
//! .collect();
//!
//! let markers = MarkerConfig::default();
//! let report = CycleResolver::new(&mut registry, &markers, &Discard)
//!     .with_dry_run(true)
//!     .resolve()?;
//!
//! assert_eq!(report.resolved_count(), 1);
//! assert!(registry.get("app.A").unwrap().fields().next().unwrap().1.has_annotation("Lazy"));
//! # Ok(())
//! # }
//! ```

mod report;

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use tracing::{debug, info};

pub use self::report::{CycleOutcome, RejectedEdge, ResolutionReport, UnresolvedCycle};
use crate::config::MarkerConfig;
use crate::constants::analysis::DEFAULT_MAX_SCC_SIZE;
use crate::detector::{CycleDetector, ElementaryCycleFinder};
use crate::error::UnwireError;
use crate::graph::{Cycle, DependencyGraph, DependencyGraphBuilder, Fqn};
use crate::injection_filter::InjectionFilter;
use crate::progress::ProgressReporter;
use crate::registry::DeclarationRegistry;
use crate::strategy::{ResolutionStrategy, StrategyContext, StrategyKind, StrategyResult, Subject};
use crate::writer::DeclarationWriter;

type Link = (Fqn, Fqn);

pub struct CycleResolver<'a> {
    registry: &'a mut DeclarationRegistry,
    markers: &'a MarkerConfig,
    writer: &'a dyn DeclarationWriter,
    base_path: PathBuf,
    dry_run: bool,
    max_scc_size: usize,
    filter: InjectionFilter,
    progress: Option<&'a ProgressReporter>,
}

/// Per-run state threaded through the cycles
struct Run {
    builder: DependencyGraphBuilder,
    graph: DependencyGraph,
    broken: IndexSet<Link>,
    report: ResolutionReport,
}

impl<'a> CycleResolver<'a> {
    pub fn new(
        registry: &'a mut DeclarationRegistry,
        markers: &'a MarkerConfig,
        writer: &'a dyn DeclarationWriter,
    ) -> Self {
        Self {
            registry,
            markers,
            writer,
            base_path: PathBuf::from("."),
            dry_run: false,
            max_scc_size: DEFAULT_MAX_SCC_SIZE,
            filter: InjectionFilter::default(),
            progress: None,
        }
    }

    /// Root directory committed declarations are written under
    pub fn with_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_max_scc_size(mut self, max_scc_size: usize) -> Self {
        self.max_scc_size = max_scc_size;
        self
    }

    pub fn with_filter(mut self, filter: InjectionFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_progress(mut self, progress: &'a ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve every cycle of the registry, shortest first.
    ///
    /// An accepted attempt is written out before it is committed. If the
    /// writer fails, the run stops with that error: files already written by
    /// the failing attempt stay on disk, while the registry keeps the state of
    /// the last committed attempt.
    pub fn resolve(&mut self) -> Result<ResolutionReport, UnwireError> {
        let builder = DependencyGraphBuilder::new(self.markers).with_filter(self.filter);
        let graph = builder.build(self.registry);
        let mut run = Run {
            builder,
            graph,
            broken: IndexSet::new(),
            report: ResolutionReport::new(self.dry_run),
        };

        if !CycleDetector::new(run.graph.adjacency()).has_cycles() {
            info!("no dependency cycles to resolve");
            return Ok(run.report);
        }

        let (mut cycles, skipped) = {
            let mut finder = ElementaryCycleFinder::new(run.graph.adjacency())
                .with_max_scc_size(self.max_scc_size);
            (finder.find_all_cycles(), finder.skipped_sccs().to_vec())
        };
        cycles.sort_by_key(Vec::len);
        info!(cycles = cycles.len(), skipped = skipped.len(), "resolving cycles");

        for cycle in cycles {
            if let Some(progress) = self.progress {
                progress.resolving_cycle(&cycle);
            }
            let outcome = self.resolve_cycle(cycle, &mut run)?;
            run.report.outcomes.push(outcome);
        }

        run.report.outcomes.extend(
            skipped
                .into_iter()
                .map(|group| CycleOutcome::Skipped {
                    members: group.into_iter().collect(),
                }),
        );
        Ok(run.report)
    }

    fn resolve_cycle(&mut self, cycle: Cycle, run: &mut Run) -> Result<CycleOutcome, UnwireError> {
        let links = links_of(&cycle);

        // A link without edges lost them to an earlier commit
        let already_broken = links.iter().any(|link| {
            run.broken.contains(link) || run.graph.edges_between(&link.0, &link.1).next().is_none()
        });
        if already_broken {
            debug!(cycle = %cycle.join(" → "), "cycle already broken");
            return Ok(CycleOutcome::AlreadyBroken { cycle });
        }

        for kind in StrategyKind::EDGE_PREFERENCE {
            for link in &links {
                let edges: Vec<_> = run.graph.edges_between(&link.0, &link.1).collect();
                if !edges.iter().all(|&edge| kind.handles(edge.injection_kind())) {
                    continue;
                }

                let mut strategy = kind.instantiate(self.context(), self.dry_run);
                if !edges.iter().all(|&edge| strategy.apply(Subject::Edge(edge))) {
                    continue;
                }

                let result = persist(strategy, &self.base_path)?;
                let (modified, generated) = self.commit(result, run);
                run.broken.insert(link.clone());
                info!(cycle = %cycle.join(" → "), strategy = %kind, from = %link.0, to = %link.1, "cycle resolved");
                return Ok(CycleOutcome::Resolved {
                    cycle,
                    strategy: kind,
                    link: Some(link.clone()),
                    modified,
                    generated,
                });
            }
        }

        let mut strategy = StrategyKind::MethodExtraction.instantiate(self.context(), self.dry_run);
        if strategy.apply(Subject::Cycle(&cycle)) {
            let result = persist(strategy, &self.base_path)?;
            let (modified, generated) = self.commit(result, run);
            run.broken.extend(links);
            info!(cycle = %cycle.join(" → "), "cycle resolved by method extraction");
            return Ok(CycleOutcome::Resolved {
                cycle,
                strategy: StrategyKind::MethodExtraction,
                link: None,
                modified,
                generated,
            });
        }

        let rejected = links
            .iter()
            .flat_map(|(from, to)| run.graph.edges_between(from, to))
            .map(|edge| RejectedEdge {
                from: edge.from_component().to_string(),
                to: edge.to_component().to_string(),
                kind: edge.injection_kind(),
            })
            .collect();
        info!(cycle = %cycle.join(" → "), "no strategy accepted the cycle");
        Ok(CycleOutcome::Unresolved(UnresolvedCycle {
            members: cycle,
            rejected,
        }))
    }

    fn context(&self) -> StrategyContext<'_> {
        StrategyContext {
            registry: &*self.registry,
            markers: self.markers,
            writer: self.writer,
        }
    }

    /// Fold a successful strategy's declarations into the registry and
    /// rebuild the graph over them
    fn commit(&mut self, result: StrategyResult, run: &mut Run) -> (Vec<Fqn>, Vec<Fqn>) {
        let StrategyResult {
            modified_declarations,
            generated_declarations,
            ..
        } = result;

        let modified: Vec<Fqn> = modified_declarations.keys().cloned().collect();
        let generated: Vec<Fqn> = generated_declarations.keys().cloned().collect();
        for (fqn, declaration) in modified_declarations.into_iter().chain(generated_declarations) {
            self.registry.put(fqn, declaration);
        }

        run.report.modified.extend(modified.iter().cloned());
        run.report.generated.extend(generated.iter().cloned());
        run.graph = run.builder.build(self.registry);
        (modified, generated)
    }
}

/// Write a successful strategy's changes (unless dry run) and release it.
/// Nothing reaches the registry when this fails.
fn persist(
    strategy: Box<dyn ResolutionStrategy + '_>,
    base_path: &Path,
) -> Result<StrategyResult, UnwireError> {
    strategy.write_changes(base_path)?;
    Ok(strategy.into_result())
}

/// Consecutive member pairs, including the wrap-around link
fn links_of(cycle: &[Fqn]) -> Vec<Link> {
    (0..cycle.len())
        .map(|i| (cycle[i].clone(), cycle[(i + 1) % cycle.len()].clone()))
        .collect()
}
