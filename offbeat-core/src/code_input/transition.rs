//! Pure transition functions for the segmented code input.
//!
//! Nothing here touches focus handles or callbacks; the widget in the parent
//! module feeds events through these and applies the results.

/// A user interaction targeting one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellEvent<'a> {
    /// The cell's text after an edit, as reported by the platform input.
    Input(&'a str),
    Backspace,
    ArrowLeft,
    ArrowRight,
    /// Raw clipboard text.
    Paste(&'a str),
}

/// Outcome of feeding one [`CellEvent`] into the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// New code value to report through `on_change`, if any.
    pub value: Option<String>,
    /// Cell that should take focus, if focus moves.
    pub focus: Option<usize>,
    /// Whether the platform's default handling must be suppressed.
    pub prevent_default: bool,
}

impl Transition {
    pub fn is_noop(&self) -> bool {
        self.value.is_none() && self.focus.is_none() && !self.prevent_default
    }
}

/// Cell that receives focus when the input is first shown: the first empty
/// cell, or the last one when the code is already complete.
pub fn mount_focus(value: &str, length: usize) -> usize {
    value.chars().count().min(length.saturating_sub(1))
}

/// Whether `value` fills every cell.
pub fn is_complete(value: &str, length: usize) -> bool {
    value.chars().count() == length
}

fn single_digit(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() => Some(c),
        _ => None,
    }
}

fn pasted_code(text: &str, length: usize) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(trimmed.chars().take(length).collect())
}

/// Value produced by `event` at cell `index`, or `None` when the value is
/// left alone.
///
/// Typing replaces the character at `index`. Cells past the end of the
/// current value are empty placeholders, so they collapse when the value is
/// rebuilt rather than turning into zeros.
pub fn next_value(
    index: usize,
    event: CellEvent<'_>,
    length: usize,
    value: &str,
) -> Option<String> {
    if index >= length {
        return None;
    }

    match event {
        CellEvent::Input(text) => {
            let digit = single_digit(text)?;
            let mut cells: Vec<Option<char>> =
                value.chars().take(length).map(Some).collect();
            if cells.len() <= index {
                cells.resize(index + 1, None);
            }
            cells[index] = Some(digit);
            Some(cells.into_iter().flatten().collect())
        }
        CellEvent::Paste(text) if index == 0 => pasted_code(text, length),
        _ => None,
    }
}

/// Cell that takes focus after `event` at cell `index`, or `None` when focus
/// stays put.
pub fn next_focus(
    index: usize,
    event: CellEvent<'_>,
    length: usize,
    value: &str,
) -> Option<usize> {
    if index >= length {
        return None;
    }
    let last = length - 1;

    match event {
        CellEvent::Input(text) => {
            single_digit(text)?;
            (index < last).then_some(index + 1)
        }
        CellEvent::Backspace => {
            let cell_empty = value.chars().nth(index).is_none();
            (cell_empty && index > 0).then(|| index - 1)
        }
        CellEvent::ArrowLeft => (index > 0).then(|| index - 1),
        CellEvent::ArrowRight => (index < last).then_some(index + 1),
        CellEvent::Paste(text) if index == 0 => {
            let code = pasted_code(text, length)?;
            Some(code.chars().count().min(last))
        }
        CellEvent::Paste(_) => None,
    }
}

/// Full transition for `event` at cell `index`.
pub fn transition(
    index: usize,
    event: CellEvent<'_>,
    length: usize,
    value: &str,
) -> Transition {
    let focus = next_focus(index, event, length, value);
    let prevent_default = match event {
        CellEvent::ArrowLeft | CellEvent::ArrowRight => focus.is_some(),
        // Paste is always intercepted on the first cell, even when ignored.
        CellEvent::Paste(_) => index == 0 && index < length,
        _ => false,
    };

    Transition {
        value: next_value(index, event, length, value),
        focus,
        prevent_default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 6;

    #[test]
    fn typing_increasing_cells_concatenates_digits() {
        for n in 1..=8 {
            let mut value = String::new();
            let mut focus = mount_focus(&value, n);
            let digits: Vec<String> =
                (0..n).map(|i| char::from(b'0' + (i % 10) as u8).to_string()).collect();

            for (i, digit) in digits.iter().enumerate() {
                let t = transition(i, CellEvent::Input(digit), n, &value);
                value = t.value.expect("digit accepted");
                if let Some(next) = t.focus {
                    focus = next;
                }
                assert_eq!(focus, (i + 1).min(n - 1));
            }
            assert_eq!(value, digits.concat());
        }
    }

    #[test]
    fn typing_replaces_existing_digit() {
        let t = transition(2, CellEvent::Input("9"), N, "12345");
        assert_eq!(t.value.as_deref(), Some("12945"));
        assert_eq!(t.focus, Some(3));
    }

    #[test]
    fn typing_past_end_collapses_placeholders() {
        let t = transition(4, CellEvent::Input("7"), N, "12");
        assert_eq!(t.value.as_deref(), Some("127"));
    }

    #[test]
    fn typing_into_last_cell_keeps_focus() {
        let t = transition(5, CellEvent::Input("6"), N, "12345");
        assert_eq!(t.value.as_deref(), Some("123456"));
        assert_eq!(t.focus, None);
    }

    #[test]
    fn non_digit_keystroke_is_dropped() {
        for text in ["a", "", "12", " ", "٣"] {
            let t = transition(1, CellEvent::Input(text), N, "1");
            assert!(t.is_noop(), "{text:?} should be ignored");
        }
    }

    #[test]
    fn paste_truncates_to_length() {
        let t = transition(0, CellEvent::Paste("123456789012"), N, "");
        assert_eq!(t.value.as_deref(), Some("123456"));
        assert_eq!(t.focus, Some(5));
        assert!(t.prevent_default);
    }

    #[test]
    fn short_paste_focuses_next_empty_cell() {
        let t = transition(0, CellEvent::Paste("  123 \n"), N, "999999");
        assert_eq!(t.value.as_deref(), Some("123"));
        assert_eq!(t.focus, Some(3));
    }

    #[test]
    fn paste_with_non_digit_is_ignored() {
        let t = transition(0, CellEvent::Paste("12a456"), N, "98");
        assert_eq!(t.value, None);
        assert_eq!(t.focus, None);
        assert!(t.prevent_default);

        let t = transition(0, CellEvent::Paste("   "), N, "98");
        assert_eq!(t.value, None);
    }

    #[test]
    fn paste_outside_first_cell_is_not_intercepted() {
        let t = transition(3, CellEvent::Paste("123456"), N, "");
        assert!(t.is_noop());
    }

    #[test]
    fn backspace_on_empty_cell_moves_back() {
        let t = transition(3, CellEvent::Backspace, N, "123");
        assert_eq!(t.focus, Some(2));
        assert_eq!(t.value, None);
        assert!(!t.prevent_default);
    }

    #[test]
    fn backspace_on_filled_cell_or_first_cell_does_nothing() {
        assert!(transition(1, CellEvent::Backspace, N, "123").is_noop());
        assert!(transition(0, CellEvent::Backspace, N, "").is_noop());
    }

    #[test]
    fn arrows_clamp_to_bounds() {
        let left = transition(0, CellEvent::ArrowLeft, N, "");
        assert!(left.is_noop());

        let right = transition(5, CellEvent::ArrowRight, N, "");
        assert!(right.is_noop());

        let t = transition(2, CellEvent::ArrowLeft, N, "");
        assert_eq!(t.focus, Some(1));
        assert!(t.prevent_default);

        let t = transition(2, CellEvent::ArrowRight, N, "");
        assert_eq!(t.focus, Some(3));
        assert!(t.prevent_default);
    }

    #[test]
    fn events_outside_the_cells_are_ignored() {
        assert!(transition(6, CellEvent::Input("1"), N, "").is_noop());
        assert!(transition(6, CellEvent::ArrowLeft, N, "").is_noop());
    }

    #[test]
    fn mount_focus_targets_first_empty_or_last_cell() {
        assert_eq!(mount_focus("", N), 0);
        assert_eq!(mount_focus("12", N), 2);
        assert_eq!(mount_focus("123456", N), 5);
    }
}
