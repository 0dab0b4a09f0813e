use std::ops::Range;

/// One focusable row of the selector, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    All,
    Item(usize),
    Done,
}

#[derive(Debug)]
pub struct NavigationState {
    pub focused: Row,
    pub scroll_offset: usize,
    visible_items: usize,
    item_count: usize,
}

impl NavigationState {
    pub fn new(item_count: usize) -> Self {
        Self {
            focused: Row::All,
            scroll_offset: 0,
            visible_items: item_count.max(1),
            item_count,
        }
    }

    pub fn move_focus_up(&mut self) {
        let index = self.row_index(self.focused);
        if index > 0 {
            self.focus(self.row_at(index - 1));
        }
    }

    pub fn move_focus_down(&mut self) {
        let index = self.row_index(self.focused);
        if index < self.row_count() - 1 {
            self.focus(self.row_at(index + 1));
        }
    }

    /// Tab order wraps around.
    pub fn focus_next(&mut self) {
        let index = (self.row_index(self.focused) + 1) % self.row_count();
        self.focus(self.row_at(index));
    }

    pub fn focus_previous(&mut self) {
        let count = self.row_count();
        let index = (self.row_index(self.focused) + count - 1) % count;
        self.focus(self.row_at(index));
    }

    pub fn focus_first(&mut self) {
        self.focus(Row::All);
    }

    pub fn focus_last(&mut self) {
        self.focus(Row::Done);
    }

    pub fn focus(&mut self, row: Row) {
        self.focused = match row {
            Row::Item(i) if i >= self.item_count => Row::Done,
            other => other,
        };
        self.update_scroll();
    }

    /// Called by the renderer once the list height is known.
    pub fn set_visible_items(&mut self, visible: usize) {
        self.visible_items = visible.max(1);
        self.update_scroll();
    }

    pub fn visible_items(&self) -> usize {
        self.visible_items
    }

    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.scroll_offset + self.visible_items).min(self.item_count);
        self.scroll_offset..end
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let offset = self.scroll_offset as isize + delta;
        self.scroll_offset = offset.clamp(0, self.max_offset() as isize) as usize;
    }

    pub fn update_scroll(&mut self) {
        if let Row::Item(i) = self.focused {
            if i < self.scroll_offset {
                self.scroll_offset = i;
            } else if i >= self.scroll_offset + self.visible_items {
                self.scroll_offset = i + 1 - self.visible_items;
            }
        }
        self.scroll_offset = self.scroll_offset.min(self.max_offset());
    }

    fn max_offset(&self) -> usize {
        self.item_count.saturating_sub(self.visible_items)
    }

    fn row_count(&self) -> usize {
        self.item_count + 2
    }

    fn row_index(&self, row: Row) -> usize {
        match row {
            Row::All => 0,
            Row::Item(i) => i + 1,
            Row::Done => self.item_count + 1,
        }
    }

    fn row_at(&self, index: usize) -> Row {
        if index == 0 {
            Row::All
        } else if index <= self.item_count {
            Row::Item(index - 1)
        } else {
            Row::Done
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_focus_stops_at_edges() {
        let mut nav = NavigationState::new(2);
        assert_eq!(nav.focused, Row::All);

        nav.move_focus_up();
        assert_eq!(nav.focused, Row::All);

        nav.move_focus_down();
        assert_eq!(nav.focused, Row::Item(0));
        nav.move_focus_down();
        assert_eq!(nav.focused, Row::Item(1));
        nav.move_focus_down();
        assert_eq!(nav.focused, Row::Done);
        nav.move_focus_down();
        assert_eq!(nav.focused, Row::Done);
    }

    #[test]
    fn test_tab_order_wraps() {
        let mut nav = NavigationState::new(1);

        nav.focus_previous();
        assert_eq!(nav.focused, Row::Done);
        nav.focus_next();
        assert_eq!(nav.focused, Row::All);
        nav.focus_next();
        assert_eq!(nav.focused, Row::Item(0));
    }

    #[test]
    fn test_scroll_follows_focus() {
        let mut nav = NavigationState::new(6);
        nav.set_visible_items(3);
        assert_eq!(nav.visible_range(), 0..3);

        nav.focus(Row::Item(4));
        assert_eq!(nav.scroll_offset, 2);
        assert_eq!(nav.visible_range(), 2..5);

        nav.focus(Row::Item(5));
        assert_eq!(nav.visible_range(), 3..6);

        nav.focus(Row::Item(1));
        assert_eq!(nav.scroll_offset, 1);

        // Leaving the list keeps the current offset
        nav.focus_first();
        assert_eq!(nav.scroll_offset, 1);
    }

    #[test]
    fn test_scroll_by_is_clamped() {
        let mut nav = NavigationState::new(6);
        nav.set_visible_items(4);

        nav.scroll_by(10);
        assert_eq!(nav.scroll_offset, 2);
        nav.scroll_by(-1);
        assert_eq!(nav.scroll_offset, 1);
        nav.scroll_by(-10);
        assert_eq!(nav.scroll_offset, 0);
    }

    #[test]
    fn test_growing_viewport_pulls_offset_back() {
        let mut nav = NavigationState::new(6);
        nav.set_visible_items(2);
        nav.focus_last();
        nav.focus(Row::Item(5));
        assert_eq!(nav.scroll_offset, 4);

        nav.set_visible_items(6);
        assert_eq!(nav.scroll_offset, 0);
        assert_eq!(nav.visible_range(), 0..6);
    }

    #[test]
    fn test_focus_out_of_range_item_lands_on_done() {
        let mut nav = NavigationState::new(2);
        nav.focus(Row::Item(7));
        assert_eq!(nav.focused, Row::Done);
    }
}
