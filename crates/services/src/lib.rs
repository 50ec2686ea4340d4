#![forbid(unsafe_code)]

pub mod confirm;
pub mod error;
pub mod guide_service;
pub mod progress;

pub use confirm::{AlwaysConfirm, Confirm, NeverConfirm, RESET_PROMPT};
pub use error::GuideLoadError;
pub use guide_service::{load_guide, parse_guide};
pub use progress::{ProgressStats, StepProgressStore, StepView};
