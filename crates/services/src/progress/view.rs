use stepwise_core::model::Step;

/// The step under the cursor, with the flags a viewer needs to draw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepView<'a> {
    /// 0-based position in the guide.
    pub index: usize,
    /// 1-based position, as shown to people.
    pub number: usize,
    pub step: &'a Step,
    pub checked: bool,
    pub can_retreat: bool,
    pub can_advance: bool,
}
