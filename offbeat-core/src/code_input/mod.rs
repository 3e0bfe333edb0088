//! Segmented one-time-passcode input.
//!
//! One logical code value shown as `length` single-digit cells. The value is
//! owned by the caller and reported back through an `on_change` callback;
//! the widget only tracks which cell holds focus.

mod transition;

pub use transition::{
    CellEvent, Transition, is_complete, mount_focus, next_focus, next_value,
    transition,
};

/// Default number of cells.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Render data for one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub index: usize,
    pub digit: Option<char>,
    pub focused: bool,
}

impl Cell {
    /// Accessible label, 1-based.
    pub fn label(&self) -> String {
        format!("Digit {}", self.index + 1)
    }
}

/// Whether the platform should run its default handling for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum EventResponse {
    Ignored,
    Handled { prevent_default: bool },
}

impl EventResponse {
    pub fn prevent_default(self) -> bool {
        matches!(
            self,
            EventResponse::Handled {
                prevent_default: true
            }
        )
    }
}

/// Focus state of a segmented code input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeInput {
    length: usize,
    focused: usize,
}

impl Default for CodeInput {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeInput {
    /// Create an input with `length` cells (at least one) focused on the
    /// first cell.
    pub fn new(length: usize) -> Self {
        let length = length.max(1);
        Self { length, focused: 0 }
    }

    /// Create an input for an existing value, focused where typing should
    /// resume.
    pub fn mount(length: usize, value: &str) -> Self {
        let mut input = Self::new(length);
        input.focused = mount_focus(value, input.length);
        tracing::trace!(
            "[CodeInput] mounted with {} cells, focus on {}",
            input.length,
            input.focused
        );
        input
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Move focus explicitly, e.g. after a pointer press. Clamped to the
    /// last cell.
    pub fn focus(&mut self, index: usize) {
        self.focused = index.min(self.length - 1);
    }

    /// Cells to render for `value`.
    pub fn cells<'a>(
        &'a self,
        value: &'a str,
    ) -> impl Iterator<Item = Cell> + 'a {
        let mut digits = value.chars();
        (0..self.length).map(move |index| Cell {
            index,
            digit: digits.next(),
            focused: index == self.focused,
        })
    }

    pub fn is_complete(&self, value: &str) -> bool {
        is_complete(value, self.length)
    }

    /// Feed an event at cell `index` for the current `value`.
    ///
    /// `on_change` runs at most once, with the new value, before focus
    /// moves. Malformed input never reaches it.
    pub fn handle<F>(
        &mut self,
        index: usize,
        event: CellEvent<'_>,
        value: &str,
        on_change: F,
    ) -> EventResponse
    where
        F: FnOnce(String),
    {
        let step = transition(index, event, self.length, value);
        if step.is_noop() {
            return EventResponse::Ignored;
        }

        if let Some(next) = step.value {
            on_change(next);
        }
        if let Some(focus) = step.focus {
            self.focused = focus;
        }

        EventResponse::Handled {
            prevent_default: step.prevent_default,
        }
    }
}
