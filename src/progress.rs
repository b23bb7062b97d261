use std::sync::atomic::{AtomicUsize, Ordering};

use console::{Term, style};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};
use crate::utils::string::pluralize;

// Progress bar style templates as constants
const PROGRESS_BAR_TEMPLATE: &str =
    "{msg} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {per_sec}";
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

pub struct ProgressReporter {
    term: Term,
    spinner_position: AtomicUsize,
    multi_progress: MultiProgress,
    current_bar: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        let term = Term::stderr();
        Self {
            term,
            spinner_position: AtomicUsize::new(0),
            multi_progress: MultiProgress::new(),
            current_bar: None,
        }
    }

    pub fn create_progress_bar(&self, len: u64, message: &str) -> ProgressBar {
        let pb = self.multi_progress.add(ProgressBar::new(len));
        if let Ok(bar_style) = ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
            pb.set_style(bar_style.progress_chars("█▉▊▋▌▍▎▏ "));
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template(SPINNER_TEMPLATE) {
            let mut frames = SPINNER_FRAMES.to_vec();
            frames.push("✓");
            pb.set_style(spinner_style.tick_strings(&frames));
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    fn next_frame(&self) -> &'static str {
        let pos = self.spinner_position.fetch_add(1, Ordering::Relaxed) % SPINNER_FRAMES.len();
        SPINNER_FRAMES[pos]
    }

    pub fn start_discovery(&mut self) {
        let _ = self.term.clear_line();
        eprintln!("{} Discovering declaration snapshots...", style("🔍").cyan());
    }

    /// Bar advanced once per parsed snapshot file
    pub fn parsing_bar(&self, files: usize) -> ProgressBar {
        self.create_progress_bar(files as u64, "Parsing snapshots")
    }

    pub fn finish_discovery(&mut self, declarations: usize) {
        let _ = self.term.clear_line();
        if declarations == 0 {
            eprintln!("\r{} No declarations found", style("✗").red());
        } else {
            eprintln!(
                "\r{} Loaded {} {}",
                style("✓").green(),
                style(declarations).yellow().bold(),
                pluralize("declaration", declarations)
            );
        }
    }

    pub fn start_graph_building(&mut self) {
        let spinner = self.create_spinner("Scanning injection points...");
        self.current_bar = Some(spinner);
    }

    pub fn finish_graph_building(&mut self, edges: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_with_message(format!(
                "Graph complete: {} injection {}",
                edges,
                pluralize("edge", edges)
            ));
        }
    }

    pub fn start_cycle_detection(&mut self) {
        eprintln!("\n{} Detecting dependency cycles...", style("🔄").yellow());
    }

    pub fn finish_cycle_detection(&self, cycles_found: usize) {
        if cycles_found == 0 {
            eprintln!(
                "{} No cycles detected! {}",
                style("✓").green().bold(),
                style("🎉").dim()
            );
        } else {
            eprintln!(
                "{} Found {} {}",
                style("⚠").yellow().bold(),
                style(cycles_found).red().bold(),
                pluralize("cycle", cycles_found)
            );
        }
    }

    pub fn start_resolution(&mut self, dry_run: bool) {
        let mode = if dry_run {
            style("(dry run)").dim().to_string()
        } else {
            String::new()
        };
        eprintln!("\n{} Breaking cycles... {}", style("✂").cyan(), mode);
    }

    pub fn resolving_cycle(&self, members: &[String]) {
        let _ = self.term.clear_line();
        eprint!(
            "\r{} Resolving: {}... ",
            style(self.next_frame()).cyan(),
            style(members.join(" → ")).dim()
        );
    }

    pub fn finish_resolution(&self, resolved: usize, unresolved: usize) {
        let _ = self.term.clear_line();
        if unresolved == 0 {
            eprintln!(
                "\r{} Resolved {} {}",
                style("✓").green().bold(),
                style(resolved).yellow().bold(),
                pluralize("cycle", resolved)
            );
        } else {
            eprintln!(
                "\r{} Resolved {}, {} left unresolved",
                style("⚠").yellow().bold(),
                style(resolved).yellow().bold(),
                style(unresolved).red().bold()
            );
        }
    }
}
