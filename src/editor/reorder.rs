/// Move the element at `from` so it ends up at `to` in the resulting sequence.
///
/// Returns `false` and leaves `items` untouched when either index is out of range.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from == to {
        return true;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// Keyboard stand-in for a pointer drag: a grabbed row and the slot it hovers over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    source: usize,
    hover: usize,
    len: usize,
}

impl DragState {
    pub fn grab(source: usize, len: usize) -> Option<Self> {
        (source < len).then_some(Self {
            source,
            hover: source,
            len,
        })
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn hover(&self) -> usize {
        self.hover
    }

    /// Moves the hover marker, clamped to the list bounds.
    pub fn step(&mut self, delta: i32) -> bool {
        let last = self.len.saturating_sub(1) as i64;
        let next = (self.hover as i64 + delta as i64).clamp(0, last) as usize;
        let changed = next != self.hover;
        self.hover = next;
        changed
    }

    /// Position the grabbed row would occupy if dropped now, for previews.
    pub fn preview_order(&self) -> Vec<usize> {
        let mut order = (0..self.len).collect::<Vec<_>>();
        move_item(&mut order, self.source, self.hover);
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn moving_first_to_third_splices_once() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        assert!(move_item(&mut items, 0, 2));
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);
    }

    #[test]
    fn moving_last_to_front() {
        let mut items = vec![1, 2, 3];
        assert!(move_item(&mut items, 2, 0));
        assert_eq!(items, vec![3, 1, 2]);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut items = vec![1, 2, 3];
        assert!(!move_item(&mut items, 3, 0));
        assert!(!move_item(&mut items, 0, 7));
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn drag_hover_is_clamped() {
        let mut drag = DragState::grab(1, 3).expect("grab");
        assert!(drag.step(5));
        assert_eq!(drag.hover(), 2);
        assert!(!drag.step(1));
        drag.step(-10);
        assert_eq!(drag.hover(), 0);
        assert_eq!(drag.preview_order(), vec![1, 0, 2]);
    }

    #[test]
    fn grab_outside_list_fails() {
        assert!(DragState::grab(0, 0).is_none());
        assert!(DragState::grab(3, 3).is_none());
    }

    proptest! {
        #[test]
        fn move_then_move_back_restores_order(len in 3usize..12, a in 0usize..12, b in 0usize..12) {
            let from = a % len;
            let to = b % len;
            let original = (0..len).collect::<Vec<_>>();
            let mut items = original.clone();
            prop_assert!(move_item(&mut items, from, to));
            prop_assert_eq!(items[to], original[from]);
            prop_assert!(move_item(&mut items, to, from));
            prop_assert_eq!(items, original);
        }

        #[test]
        fn move_preserves_relative_order_of_others(len in 2usize..12, a in 0usize..12, b in 0usize..12) {
            let from = a % len;
            let to = b % len;
            let mut items = (0..len).collect::<Vec<_>>();
            move_item(&mut items, from, to);
            let others = items.iter().copied().filter(|item| *item != from).collect::<Vec<_>>();
            let expected = (0..len).filter(|item| *item != from).collect::<Vec<_>>();
            prop_assert_eq!(others, expected);
        }
    }
}
