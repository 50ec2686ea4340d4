mod stats;
mod store;
mod view;

// Public API of the progress subsystem.
pub use stats::ProgressStats;
pub use store::StepProgressStore;
pub use view::StepView;
