//! The request/response lifecycle state and the rule for presenting it.

/// Exactly one of these is active at any time. Replaced by the dispatch
/// lifecycle (Loading -> Success | Error) and by mode switches (back to
/// Idle). There are no separate loading/error/result flags, so contradictory
/// displays cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UIState {
    #[default]
    Idle,
    Loading,
    Success(String),
    Error(String),
}

/// What the output area shows. Derived from UIState by one exhaustive match;
/// the submit control separately reflects `is_loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultView<'a> {
    /// Error banner, and nothing else.
    Error(&'a str),
    /// Rendered result text plus the copy affordance.
    Output(&'a str),
    /// The "ready to create" empty state.
    Placeholder,
}

impl UIState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UIState::Loading)
    }

    /// Precedence: error > non-empty success > placeholder. A success whose
    /// text is empty (absent response key) renders as the empty state, not as
    /// an error.
    pub fn result_view(&self) -> ResultView<'_> {
        match self {
            UIState::Error(msg) => ResultView::Error(msg),
            UIState::Success(text) if !text.is_empty() => ResultView::Output(text),
            UIState::Success(_) | UIState::Loading | UIState::Idle => ResultView::Placeholder,
        }
    }
}
