use serde::Deserialize;
use thiserror::Error;

use crate::model::ids::GuideId;
use crate::model::media::{ImageRef, ImageRefError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GuideError {
    #[error("guide id cannot be empty")]
    EmptyId,

    #[error("step {index} has no instruction")]
    EmptyInstruction { index: usize },

    #[error("step {index} has an invalid duration")]
    InvalidDuration { index: usize },

    #[error("material {index} of step {step} has an invalid estimated cost")]
    InvalidMaterialCost { step: usize, index: usize },

    #[error("step {index} has an invalid image reference: {source}")]
    InvalidImage {
        index: usize,
        #[source]
        source: ImageRefError,
    },
}

//
// ─── GUIDE KIND ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuideKind {
    Recipe,
    #[default]
    Diy,
}

impl GuideKind {
    fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("recipe") => GuideKind::Recipe,
            _ => GuideKind::Diy,
        }
    }
}

//
// ─── DRAFTS (wire shape) ───────────────────────────────────────────────────────
//

/// Unvalidated guide as it arrives from the content service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideDraft {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub steps: Vec<StepDraft>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDraft {
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub time: Option<f64>,
    #[serde(default)]
    pub materials: Vec<MaterialDraft>,
    #[serde(default)]
    pub tips: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: Option<QuantityDraft>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub estimated_cost: Option<f64>,
}

/// Quantities are free-form upstream: `200` and `"1/2"` are both accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum QuantityDraft {
    Number(f64),
    Text(String),
}

impl QuantityDraft {
    fn normalize(self) -> Option<String> {
        match self {
            QuantityDraft::Number(n) if n.is_finite() && n.fract() == 0.0 => {
                Some(format!("{n:.0}"))
            }
            QuantityDraft::Number(n) if n.is_finite() => Some(n.to_string()),
            QuantityDraft::Number(_) => None,
            QuantityDraft::Text(s) => normalize_optional(Some(s)),
        }
    }
}

impl GuideDraft {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn with_step(mut self, step: StepDraft) -> Self {
        self.steps.push(step);
        self
    }

    /// Validate and normalize the draft into a `Guide`.
    ///
    /// # Errors
    ///
    /// Returns `GuideError` if the id is blank or any step fails validation.
    pub fn validate(self) -> Result<Guide, GuideError> {
        let id = GuideId::new(self.id).map_err(|_| GuideError::EmptyId)?;
        let steps = self
            .steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| step.validate(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Guide {
            id,
            title: normalize_optional(self.title),
            kind: GuideKind::from_raw(self.kind.as_deref()),
            steps,
        })
    }
}

impl StepDraft {
    #[must_use]
    pub fn instruction(text: impl Into<String>) -> Self {
        Self {
            instruction: Some(text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_time(mut self, minutes: f64) -> Self {
        self.time = Some(minutes);
        self
    }

    #[must_use]
    pub fn with_material(mut self, material: MaterialDraft) -> Self {
        self.materials.push(material);
        self
    }

    #[must_use]
    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tips = Some(tip.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    fn validate(self, index: usize) -> Result<Step, GuideError> {
        let instruction = normalize_optional(self.instruction)
            .or_else(|| normalize_optional(self.description))
            .ok_or(GuideError::EmptyInstruction { index })?;

        if let Some(minutes) = self.time {
            if !minutes.is_finite() || minutes < 0.0 {
                return Err(GuideError::InvalidDuration { index });
            }
        }

        let materials = self
            .materials
            .into_iter()
            .enumerate()
            .map(|(m, material)| material.validate(index, m))
            .collect::<Result<Vec<_>, _>>()?;

        let image = normalize_optional(self.image)
            .map(|raw| ImageRef::parse(raw).map_err(|source| GuideError::InvalidImage { index, source }))
            .transpose()?;

        Ok(Step {
            instruction,
            duration_minutes: self.time,
            materials,
            tip: normalize_optional(self.tips),
            image,
        })
    }
}

impl MaterialDraft {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: QuantityDraft, unit: Option<&str>) -> Self {
        self.quantity = Some(quantity);
        self.unit = unit.map(str::to_owned);
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.estimated_cost = Some(cost);
        self
    }

    fn validate(self, step: usize, index: usize) -> Result<Material, GuideError> {
        if let Some(cost) = self.estimated_cost {
            if !cost.is_finite() || cost < 0.0 {
                return Err(GuideError::InvalidMaterialCost { step, index });
            }
        }

        Ok(Material {
            name: self.name.trim().to_owned(),
            quantity: self.quantity.and_then(QuantityDraft::normalize),
            unit: normalize_optional(self.unit),
            estimated_cost: self.estimated_cost,
        })
    }
}

//
// ─── MATERIAL ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    name: String,
    quantity: Option<String>,
    unit: Option<String>,
    estimated_cost: Option<f64>,
}

impl Material {
    /// Material name; empty when the source left it blank.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn quantity(&self) -> Option<&str> {
        self.quantity.as_deref()
    }

    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    #[must_use]
    pub fn estimated_cost(&self) -> Option<f64> {
        self.estimated_cost
    }

    /// Quantity and unit glued together, e.g. `200g`. `None` without a quantity.
    #[must_use]
    pub fn amount_label(&self) -> Option<String> {
        self.quantity
            .as_deref()
            .map(|q| format!("{q}{}", self.unit.as_deref().unwrap_or_default()))
    }
}

//
// ─── STEP ──────────────────────────────────────────────────────────────────────
//

/// One instruction unit within a guide.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    instruction: String,
    duration_minutes: Option<f64>,
    materials: Vec<Material>,
    tip: Option<String>,
    image: Option<ImageRef>,
}

impl Step {
    #[must_use]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    #[must_use]
    pub fn duration_minutes(&self) -> Option<f64> {
        self.duration_minutes
    }

    #[must_use]
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    #[must_use]
    pub fn tip(&self) -> Option<&str> {
        self.tip.as_deref()
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    /// Sum of the estimated cost of this step's materials; missing costs count as zero.
    #[must_use]
    pub fn material_cost(&self) -> f64 {
        self.materials
            .iter()
            .map(|m| m.estimated_cost.unwrap_or(0.0))
            .sum()
    }
}

//
// ─── GUIDE ─────────────────────────────────────────────────────────────────────
//

/// A recipe or DIY guide: an ordered list of steps under a stable id.
///
/// Guides are immutable once validated; progress lives elsewhere and refers
/// to steps by their 0-based position.
#[derive(Debug, Clone, PartialEq)]
pub struct Guide {
    id: GuideId,
    title: Option<String>,
    kind: GuideKind,
    steps: Vec<Step>,
}

impl Guide {
    #[must_use]
    pub fn id(&self) -> &GuideId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn kind(&self) -> GuideKind {
        self.kind
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total duration of all steps in minutes; steps without a duration add nothing.
    #[must_use]
    pub fn total_time_minutes(&self) -> f64 {
        self.steps
            .iter()
            .map(|s| s.duration_minutes.unwrap_or(0.0))
            .sum()
    }

    #[must_use]
    pub fn total_material_cost(&self) -> f64 {
        self.steps.iter().map(Step::material_cost).sum()
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guide_rejects_blank_id() {
        let err = GuideDraft::new("   ").validate().unwrap_err();
        assert_eq!(err, GuideError::EmptyId);
    }

    #[test]
    fn step_falls_back_to_description() {
        let step = StepDraft {
            instruction: Some("  ".into()),
            description: Some("Fold the paper".into()),
            ..StepDraft::default()
        };
        let guide = GuideDraft::new("g").with_step(step).validate().unwrap();
        assert_eq!(guide.steps()[0].instruction(), "Fold the paper");
    }

    #[test]
    fn step_without_any_text_is_rejected() {
        let err = GuideDraft::new("g")
            .with_step(StepDraft::instruction("ok"))
            .with_step(StepDraft::default())
            .validate()
            .unwrap_err();
        assert_eq!(err, GuideError::EmptyInstruction { index: 1 });
    }

    #[test]
    fn material_cost_must_be_non_negative() {
        let err = GuideDraft::new("g")
            .with_step(StepDraft::instruction("a").with_material(MaterialDraft::new("Glue").with_cost(-1.0)))
            .validate()
            .unwrap_err();
        assert_eq!(err, GuideError::InvalidMaterialCost { step: 0, index: 0 });

        let err = GuideDraft::new("g")
            .with_step(StepDraft::instruction("a").with_material(MaterialDraft::new("Glue").with_cost(f64::NAN)))
            .validate()
            .unwrap_err();
        assert_eq!(err, GuideError::InvalidMaterialCost { step: 0, index: 0 });
    }

    #[test]
    fn nameless_material_is_kept() {
        let guide = GuideDraft::new("g")
            .with_step(
                StepDraft::instruction("a").with_material(
                    MaterialDraft::new(" ")
                        .with_quantity(QuantityDraft::Number(3.0), Some("pcs"))
                        .with_cost(4.25),
                ),
            )
            .validate()
            .unwrap();

        let material = &guide.steps()[0].materials()[0];
        assert_eq!(material.name(), "");
        assert_eq!(material.amount_label().as_deref(), Some("3pcs"));
        assert!((guide.total_material_cost() - 4.25).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_image_reports_step() {
        let err = GuideDraft::new("g")
            .with_step(StepDraft::instruction("a"))
            .with_step(StepDraft::instruction("b").with_image("https://"))
            .validate()
            .unwrap_err();
        assert!(matches!(err, GuideError::InvalidImage { index: 1, .. }));
    }

    #[test]
    fn totals_sum_over_all_steps() {
        let guide = GuideDraft::new("g")
            .with_step(StepDraft::instruction("a").with_time(5.0))
            .with_step(
                StepDraft::instruction("b")
                    .with_material(MaterialDraft::new("Paint").with_cost(12.5))
                    .with_material(MaterialDraft::new("Brush")),
            )
            .with_step(StepDraft::instruction("c").with_time(10.0))
            .validate()
            .unwrap();

        assert_eq!(guide.len(), 3);
        assert!((guide.total_time_minutes() - 15.0).abs() < f64::EPSILON);
        assert!((guide.total_material_cost() - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_guide_has_zero_totals() {
        let guide = GuideDraft::new("g").validate().unwrap();
        assert!(guide.is_empty());
        assert!(guide.total_time_minutes().abs() < f64::EPSILON);
        assert!(guide.total_material_cost().abs() < f64::EPSILON);
    }

    #[test]
    fn kind_defaults_to_diy() {
        let recipe = GuideDraft::new("g").with_kind("Recipe").validate().unwrap();
        assert_eq!(recipe.kind(), GuideKind::Recipe);

        let other = GuideDraft::new("g").with_kind("craft").validate().unwrap();
        assert_eq!(other.kind(), GuideKind::Diy);
    }

    #[test]
    fn deserializes_content_service_document() {
        let json = r#"{
            "_id": "665f",
            "title": "  Pancakes ",
            "type": "recipe",
            "steps": [
                {
                    "instruction": "Whisk",
                    "time": 5,
                    "materials": [
                        { "name": "Flour", "quantity": 200, "unit": "g", "estimatedCost": 1.5 },
                        { "name": "Milk", "quantity": "1/2", "unit": "l" },
                        { "name": "Salt" }
                    ],
                    "tips": "",
                    "image": "https://cdn.example.com/p/1.jpg"
                },
                { "description": "Fry" }
            ]
        }"#;

        let draft: GuideDraft = serde_json::from_str(json).unwrap();
        let guide = draft.validate().unwrap();

        assert_eq!(guide.id().as_str(), "665f");
        assert_eq!(guide.title(), Some("Pancakes"));
        assert_eq!(guide.kind(), GuideKind::Recipe);

        let first = &guide.steps()[0];
        assert_eq!(first.duration_minutes(), Some(5.0));
        assert_eq!(first.tip(), None);
        assert!(first.image().and_then(ImageRef::as_url).is_some());
        assert_eq!(first.materials()[0].amount_label().as_deref(), Some("200g"));
        assert_eq!(first.materials()[1].amount_label().as_deref(), Some("1/2l"));
        assert_eq!(first.materials()[2].amount_label(), None);

        let second = &guide.steps()[1];
        assert_eq!(second.instruction(), "Fry");
        assert_eq!(second.duration_minutes(), None);
        assert!(second.materials().is_empty());
    }

    #[test]
    fn fractional_durations_are_summed() {
        let json = r#"{ "_id": "g", "steps": [
            { "instruction": "a", "time": 2.5 },
            { "instruction": "b", "time": 4 },
            { "instruction": "c" }
        ] }"#;
        let guide = serde_json::from_str::<GuideDraft>(json)
            .unwrap()
            .validate()
            .unwrap();

        assert_eq!(guide.steps()[0].duration_minutes(), Some(2.5));
        assert!((guide.total_time_minutes() - 6.5).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_or_non_finite_time_is_rejected() {
        let json = r#"{ "_id": "g", "steps": [ { "instruction": "a" }, { "instruction": "b", "time": -3 } ] }"#;
        let err = serde_json::from_str::<GuideDraft>(json)
            .unwrap()
            .validate()
            .unwrap_err();
        assert_eq!(err, GuideError::InvalidDuration { index: 1 });

        let err = GuideDraft::new("g")
            .with_step(StepDraft::instruction("a").with_time(f64::INFINITY))
            .validate()
            .unwrap_err();
        assert_eq!(err, GuideError::InvalidDuration { index: 0 });
    }
}
