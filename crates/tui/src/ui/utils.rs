//! Small helpers shared by the panels.

/// Move a list cursor by `delta`, clamped to `0..len`.
pub fn step_cursor(cursor: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    cursor.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_cursor_clamps_at_both_ends() {
        assert_eq!(step_cursor(0, 3, -1), 0);
        assert_eq!(step_cursor(1, 3, 1), 2);
        assert_eq!(step_cursor(2, 3, 1), 2);
        assert_eq!(step_cursor(5, 0, 1), 0);
        assert_eq!(step_cursor(7, 3, -1), 2);
    }
}
