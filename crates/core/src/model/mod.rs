mod guide;
mod ids;
mod media;
mod progress;

pub use guide::{
    Guide, GuideDraft, GuideError, GuideKind, Material, MaterialDraft, QuantityDraft, Step,
    StepDraft,
};
pub use ids::{GuideId, ParseIdError};
pub use media::{ImageRef, ImageRefError};
pub use progress::ProgressMap;
