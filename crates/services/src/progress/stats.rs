use stepwise_core::model::{Guide, ProgressMap};

/// Aggregated view of guide progress, useful for UI.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressStats {
    pub completed_count: usize,
    pub total_steps: usize,
    /// `0.0..=100.0`; zero for a guide without steps.
    pub percentage: f64,
    pub total_time_minutes: f64,
    pub total_material_cost: f64,
}

impl ProgressStats {
    #[must_use]
    pub fn compute(guide: &Guide, progress: &ProgressMap) -> Self {
        let total_steps = guide.len();
        let completed_count = progress.completed_count(total_steps);
        #[allow(clippy::cast_precision_loss)]
        let percentage = if total_steps > 0 {
            100.0 * completed_count as f64 / total_steps as f64
        } else {
            0.0
        };

        Self {
            completed_count,
            total_steps,
            percentage,
            total_time_minutes: guide.total_time_minutes(),
            total_material_cost: guide.total_material_cost(),
        }
    }

    /// Percentage rounded to a whole number for display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rounded_percentage(&self) -> u32 {
        self.percentage.round().clamp(0.0, 100.0) as u32
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_steps > 0 && self.completed_count == self.total_steps
    }

    #[must_use]
    pub fn has_time(&self) -> bool {
        self.total_time_minutes > 0.0
    }

    #[must_use]
    pub fn has_cost(&self) -> bool {
        self.total_material_cost > 0.0
    }

    /// Total cost with two decimals, e.g. `12.50`.
    #[must_use]
    pub fn format_cost(&self) -> String {
        format!("{:.2}", self.total_material_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::model::{GuideDraft, MaterialDraft, StepDraft};

    fn three_step_guide() -> Guide {
        GuideDraft::new("g")
            .with_step(StepDraft::instruction("a").with_time(5.0))
            .with_step(
                StepDraft::instruction("b")
                    .with_time(0.0)
                    .with_material(MaterialDraft::new("Wood").with_cost(12.5)),
            )
            .with_step(StepDraft::instruction("c").with_time(10.0))
            .validate()
            .unwrap()
    }

    #[test]
    fn two_of_three() {
        let progress: ProgressMap = [(0, true), (2, true)].into_iter().collect();
        let stats = ProgressStats::compute(&three_step_guide(), &progress);

        assert_eq!(stats.completed_count, 2);
        assert_eq!(stats.total_steps, 3);
        assert!((stats.percentage - 66.67).abs() < 0.01);
        assert_eq!(stats.rounded_percentage(), 67);
        assert!((stats.total_time_minutes - 15.0).abs() < f64::EPSILON);
        assert!((stats.total_material_cost - 12.5).abs() < f64::EPSILON);
        assert_eq!(stats.format_cost(), "12.50");
        assert!(stats.has_time());
        assert!(stats.has_cost());
        assert!(!stats.is_complete());
    }

    #[test]
    fn empty_guide_is_zero_percent() {
        let guide = GuideDraft::new("g").validate().unwrap();
        let stats = ProgressStats::compute(&guide, &ProgressMap::all_checked(3));

        assert_eq!(stats.completed_count, 0);
        assert_eq!(stats.total_steps, 0);
        assert!(stats.percentage.abs() < f64::EPSILON);
        assert_eq!(stats.rounded_percentage(), 0);
        assert!(!stats.is_complete());
        assert!(!stats.has_time());
        assert!(!stats.has_cost());
    }

    #[test]
    fn stale_indices_do_not_inflate_percentage() {
        let progress: ProgressMap = [(0, true), (3, true), (9, true)].into_iter().collect();
        let stats = ProgressStats::compute(&three_step_guide(), &progress);

        assert_eq!(stats.completed_count, 1);
        assert!(stats.percentage <= 100.0);
    }
}
