#![forbid(unsafe_code)]

pub mod model;

pub use model::{
    Guide, GuideDraft, GuideError, GuideId, GuideKind, ImageRef, ImageRefError, Material,
    MaterialDraft, ParseIdError, ProgressMap, QuantityDraft, Step, StepDraft,
};
