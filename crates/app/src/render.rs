use std::fmt::Write as _;

use services::{ProgressStats, StepProgressStore, StepView};
use stepwise_core::model::GuideKind;

/// Header block: title, progress line and totals.
pub fn summary(store: &StepProgressStore) -> String {
    let guide = store.guide();
    let stats = store.stats();
    let mut out = String::new();

    let kind = match guide.kind() {
        GuideKind::Recipe => "recipe",
        GuideKind::Diy => "diy",
    };
    let _ = writeln!(
        out,
        "{} ({kind})",
        guide.title().unwrap_or(guide.id().as_str())
    );
    let _ = writeln!(out, "{}", progress_line(&stats));
    if stats.has_time() {
        let _ = writeln!(
            out,
            "Total time: {} min",
            minutes_label(stats.total_time_minutes)
        );
    }
    if stats.has_cost() {
        let _ = writeln!(out, "Total cost: {}", stats.format_cost());
    }
    if stats.is_complete() {
        let _ = writeln!(out, "All steps complete!");
    }
    out
}

pub fn progress_line(stats: &ProgressStats) -> String {
    format!(
        "Progress: {} / {} steps ({}%)",
        stats.completed_count,
        stats.total_steps,
        stats.rounded_percentage()
    )
}

/// One line per step with its check mark.
pub fn checklist(store: &StepProgressStore) -> String {
    let mut out = String::new();
    for (index, step) in store.guide().steps().iter().enumerate() {
        let mark = if store.is_checked(index) { 'x' } else { ' ' };
        let _ = write!(out, "[{mark}] {}. {}", index + 1, step.instruction());
        if let Some(minutes) = step.duration_minutes().filter(|m| *m > 0.0) {
            let _ = write!(out, " ({} min)", minutes_label(minutes));
        }
        out.push('\n');
    }
    out
}

/// Whole minutes print without decimals, fractions with at most two.
fn minutes_label(minutes: f64) -> String {
    if minutes.fract() == 0.0 {
        format!("{minutes:.0}")
    } else {
        let fixed = format!("{minutes:.2}");
        fixed.trim_end_matches('0').to_owned()
    }
}

/// Full detail of the focused step.
pub fn step_detail(view: &StepView<'_>, total: usize) -> String {
    let step = view.step;
    let mut out = String::new();
    let mark = if view.checked { "done" } else { "todo" };

    let _ = write!(out, "Step {} of {total} [{mark}]", view.number);
    if let Some(minutes) = step.duration_minutes().filter(|m| *m > 0.0) {
        let _ = write!(out, " - {} min", minutes_label(minutes));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", step.instruction());

    if let Some(image) = step.image() {
        let _ = writeln!(out, "Image: {image}");
    }
    if !step.materials().is_empty() {
        let _ = writeln!(out, "Materials needed for this step:");
        for material in step.materials() {
            out.push_str("  -");
            match (material.name(), material.amount_label()) {
                ("", Some(amount)) => {
                    let _ = write!(out, " {amount}");
                }
                ("", None) => out.push_str(" (unnamed)"),
                (name, Some(amount)) => {
                    let _ = write!(out, " {name} ({amount})");
                }
                (name, None) => {
                    let _ = write!(out, " {name}");
                }
            }
            if let Some(cost) = material.estimated_cost().filter(|c| *c > 0.0) {
                let _ = write!(out, " {cost:.2}");
            }
            out.push('\n');
        }
    }
    if let Some(tip) = step.tip() {
        let _ = writeln!(out, "Tip: {tip}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::NeverConfirm;
    use stepwise_core::model::{GuideDraft, MaterialDraft, QuantityDraft, StepDraft};
    use storage::ProgressRepository;

    fn store() -> StepProgressStore {
        let guide = GuideDraft::new("g")
            .with_title("Birdhouse")
            .with_step(
                StepDraft::instruction("Cut panels")
                    .with_time(5.0)
                    .with_material(
                        MaterialDraft::new("Plywood")
                            .with_quantity(QuantityDraft::Number(2.0), Some("m"))
                            .with_cost(7.5),
                    )
                    .with_tip("Measure twice"),
            )
            .with_step(StepDraft::instruction("Paint"))
            .validate()
            .unwrap();
        StepProgressStore::new(guide, ProgressRepository::in_memory(), NeverConfirm)
    }

    #[test]
    fn summary_shows_totals() {
        let mut store = store();
        store.toggle_step(0);
        let text = summary(&store);
        assert!(text.starts_with("Birdhouse (diy)\n"));
        assert!(text.contains("Progress: 1 / 2 steps (50%)"));
        assert!(text.contains("Total time: 5 min"));
        assert!(text.contains("Total cost: 7.50"));
        assert!(!text.contains("All steps complete"));
    }

    #[test]
    fn checklist_marks_done_steps() {
        let mut store = store();
        store.toggle_step(1);
        assert_eq!(checklist(&store), "[ ] 1. Cut panels (5 min)\n[x] 2. Paint\n");
    }

    #[test]
    fn detail_lists_materials_and_tip() {
        let store = store();
        let view = store.current_step().unwrap();
        let text = step_detail(&view, 2);
        assert!(text.starts_with("Step 1 of 2 [todo] - 5 min\n"));
        assert!(text.contains("  - Plywood (2m) 7.50\n"));
        assert!(text.contains("Tip: Measure twice\n"));
    }

    #[test]
    fn fractional_minutes_and_nameless_materials() {
        let guide = GuideDraft::new("g")
            .with_step(
                StepDraft::instruction("Boil")
                    .with_time(2.5)
                    .with_material(
                        MaterialDraft::new("  ")
                            .with_quantity(QuantityDraft::Number(3.0), Some("pcs")),
                    )
                    .with_material(MaterialDraft::new("").with_cost(1.0)),
            )
            .with_step(StepDraft::instruction("Serve").with_time(4.0))
            .validate()
            .unwrap();
        let store = StepProgressStore::new(guide, ProgressRepository::in_memory(), NeverConfirm);

        assert!(summary(&store).contains("Total time: 6.5 min"));
        let view = store.current_step().unwrap();
        let text = step_detail(&view, 2);
        assert!(text.starts_with("Step 1 of 2 [todo] - 2.5 min\n"));
        assert!(text.contains("  - 3pcs\n"));
        assert!(text.contains("  - (unnamed) 1.00\n"));
    }
}
