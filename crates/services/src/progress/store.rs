use stepwise_core::model::{Guide, ProgressMap};
use storage::ProgressRepository;
use tracing::{debug, warn};

use super::stats::ProgressStats;
use super::view::StepView;
use crate::confirm::{Confirm, RESET_PROMPT};

//
// ─── STORE ─────────────────────────────────────────────────────────────────────
//

/// Completion flags and cursor for one guide being stepped through.
///
/// Every change to the flags is written through to the repository on a
/// best-effort basis: storage failures are logged and otherwise ignored, so
/// the in-memory state stays authoritative for the session. No operation here
/// returns an error.
pub struct StepProgressStore {
    guide: Guide,
    progress: ProgressMap,
    cursor: usize,
    repo: ProgressRepository,
    confirm: Box<dyn Confirm>,
}

impl StepProgressStore {
    /// Build a store for `guide`, restoring any saved progress.
    #[must_use]
    pub fn new(guide: Guide, repo: ProgressRepository, confirm: impl Confirm + 'static) -> Self {
        let progress = load_progress(&repo, &guide);
        Self {
            guide,
            progress,
            cursor: 0,
            repo,
            confirm: Box::new(confirm),
        }
    }

    /// Switch to `guide` (or reload the same one): progress is read back from
    /// storage and the cursor returns to the first step.
    pub fn initialize(&mut self, guide: Guide) {
        self.progress = load_progress(&self.repo, &guide);
        self.guide = guide;
        self.cursor = 0;
    }

    #[must_use]
    pub fn guide(&self) -> &Guide {
        &self.guide
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressMap {
        &self.progress
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_checked(&self, index: usize) -> bool {
        index < self.guide.len() && self.progress.is_checked(index)
    }

    /// Flip the completion flag of step `index`.
    ///
    /// Returns `false` without touching anything if `index` is not a step of
    /// the current guide.
    pub fn toggle_step(&mut self, index: usize) -> bool {
        if index >= self.guide.len() {
            debug!(guide_id = %self.guide.id(), index, "ignoring toggle outside guide");
            return false;
        }
        let checked = self.progress.toggle(index);
        debug!(guide_id = %self.guide.id(), index, checked, "toggled step");
        self.persist();
        true
    }

    /// Toggle the step under the cursor. No-op for a guide without steps.
    pub fn toggle_current(&mut self) -> bool {
        self.toggle_step(self.cursor)
    }

    /// Mark every step complete in a single update.
    pub fn mark_all_complete(&mut self) {
        self.progress = ProgressMap::all_checked(self.guide.len());
        debug!(guide_id = %self.guide.id(), total = self.guide.len(), "marked all steps complete");
        self.persist();
    }

    /// Ask for confirmation, then wipe progress, rewind the cursor and drop
    /// the saved entry. Returns whether the reset happened.
    pub fn reset_progress(&mut self) -> bool {
        if !self.confirm.confirm(RESET_PROMPT) {
            debug!(guide_id = %self.guide.id(), "reset declined");
            return false;
        }

        self.progress.clear();
        self.cursor = 0;
        if let Err(err) = self.repo.clear(self.guide.id()) {
            warn!(guide_id = %self.guide.id(), error = %err, "failed to remove saved step progress");
        }
        debug!(guide_id = %self.guide.id(), "progress reset");
        true
    }

    /// Move to the next step. Returns `false` at the last step.
    pub fn advance(&mut self) -> bool {
        if self.cursor + 1 >= self.guide.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Move to the previous step. Returns `false` at the first step.
    pub fn retreat(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    #[must_use]
    pub fn stats(&self) -> ProgressStats {
        ProgressStats::compute(&self.guide, &self.progress)
    }

    /// True once every step is checked (never for an empty guide).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stats().is_complete()
    }

    /// Whether "complete all" would change anything.
    #[must_use]
    pub fn can_mark_all(&self) -> bool {
        self.progress.completed_count(self.guide.len()) < self.guide.len()
    }

    #[must_use]
    pub fn current_step(&self) -> Option<StepView<'_>> {
        let step = self.guide.step(self.cursor)?;
        Some(StepView {
            index: self.cursor,
            number: self.cursor + 1,
            step,
            checked: self.progress.is_checked(self.cursor),
            can_retreat: self.cursor > 0,
            can_advance: self.cursor + 1 < self.guide.len(),
        })
    }

    fn persist(&self) {
        if let Err(err) = self.repo.save(self.guide.id(), &self.progress) {
            warn!(guide_id = %self.guide.id(), error = %err, "failed to save step progress");
        }
    }
}

fn load_progress(repo: &ProgressRepository, guide: &Guide) -> ProgressMap {
    match repo.load(guide.id()) {
        Ok(Some(progress)) => progress,
        Ok(None) => ProgressMap::new(),
        Err(err) => {
            warn!(guide_id = %guide.id(), error = %err, "discarding unreadable step progress");
            ProgressMap::new()
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
