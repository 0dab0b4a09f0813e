use crate::config::PageItem;
use crate::selection::{Confirmation, Outcome, SelectionError, SelectionEvent, SelectionModel, Snapshot};
use crate::tui::handlers::{
    ConfirmModeAction, HelpModeAction, KeyEventHandler, KeyHandler, MouseEventHandler,
    NormalModeAction,
};
use crate::tui::navigation::{NavigationState, Row};
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Pointer flags owned by the UI; the selection model never sees them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PointerState {
    pub hovered: Option<Row>,
    pub pressed: Option<Row>,
    /// Last reported (column, row) of the pointer.
    pub position: Option<(u16, u16)>,
}

/// Screen regions recorded by the last draw, used for mouse hit-testing.
#[derive(Debug, Default, Clone, Copy)]
pub struct HitAreas {
    pub all: Rect,
    pub items: Rect,
    pub done: Rect,
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

#[derive(Debug)]
pub struct App {
    pub selection: SelectionModel,
    pub snapshot: Snapshot,
    pub labels: Vec<String>,
    pub all_label: String,
    pub navigation: NavigationState,
    pub pointer: PointerState,
    pub hit_areas: HitAreas,
    pub help_mode: bool,
    pub pending_confirmation: Option<Confirmation>,
    pub confirmed: Option<Confirmation>,
    pub should_quit: bool,
}

impl App {
    pub fn new(items: Vec<PageItem>, all_label: String) -> Result<Self, SelectionError> {
        let (ids, labels): (Vec<String>, Vec<String>) =
            items.into_iter().map(|item| (item.id, item.label)).unzip();
        let selection = SelectionModel::new(ids)?;
        let snapshot = selection.snapshot();
        let navigation = NavigationState::new(labels.len());

        Ok(Self {
            selection,
            snapshot,
            labels,
            all_label,
            navigation,
            pointer: PointerState::default(),
            hit_areas: HitAreas::default(),
            help_mode: false,
            pending_confirmation: None,
            confirmed: None,
            should_quit: false,
        })
    }

    pub fn apply(&mut self, event: SelectionEvent) -> Result<()> {
        match self.selection.apply(&event)? {
            Outcome::Changed(snapshot) => self.snapshot = snapshot,
            Outcome::Confirmed(confirmation) => self.pending_confirmation = Some(confirmation),
        }
        Ok(())
    }

    pub fn activate(&mut self, row: Row) -> Result<()> {
        let event = match row {
            Row::All => SelectionEvent::ToggleAll,
            Row::Item(i) => match self.selection.items().get(i) {
                Some(id) => SelectionEvent::ToggleItem(id.clone()),
                None => return Ok(()),
            },
            Row::Done => SelectionEvent::Confirm,
        };
        self.apply(event)
    }

    pub fn is_item_checked(&self, index: usize) -> bool {
        self.snapshot
            .entries()
            .get(index)
            .map(|(_, selected)| *selected)
            .unwrap_or(false)
    }

    pub fn selected_count(&self) -> usize {
        self.snapshot.selected_count()
    }

    pub fn total_items(&self) -> usize {
        self.snapshot.len()
    }

    pub fn confirmation_labels(&self, confirmation: &Confirmation) -> Vec<&str> {
        confirmation
            .ids()
            .iter()
            .filter_map(|id| {
                let index = self.selection.items().iter().position(|item| item == id)?;
                self.labels.get(index).map(String::as_str)
            })
            .collect()
    }

    pub fn row_at(&self, column: u16, row: u16) -> Option<Row> {
        if contains(self.hit_areas.all, column, row) {
            return Some(Row::All);
        }
        if contains(self.hit_areas.done, column, row) {
            return Some(Row::Done);
        }
        if contains(self.hit_areas.items, column, row) {
            let index = self.navigation.scroll_offset + (row - self.hit_areas.items.y) as usize;
            if self.navigation.visible_range().contains(&index) {
                return Some(Row::Item(index));
            }
        }
        None
    }

    /// Re-resolves the hovered row after the list scrolled under a still pointer.
    fn refresh_hover(&mut self) {
        if let Some((column, row)) = self.pointer.position {
            self.pointer.hovered = self.row_at(column, row);
        }
    }

    fn handle_normal_mode_key(&mut self, key_event: KeyEvent) -> Result<()> {
        match KeyHandler::handle_normal_mode_key(key_event) {
            NormalModeAction::Quit => self.should_quit = true,
            NormalModeAction::MoveFocusUp => self.navigation.move_focus_up(),
            NormalModeAction::MoveFocusDown => self.navigation.move_focus_down(),
            NormalModeAction::FocusNext => self.navigation.focus_next(),
            NormalModeAction::FocusPrevious => self.navigation.focus_previous(),
            NormalModeAction::FocusFirst => self.navigation.focus_first(),
            NormalModeAction::FocusLast => self.navigation.focus_last(),
            NormalModeAction::ActivateFocused => self.activate(self.navigation.focused)?,
            NormalModeAction::ToggleAll => self.apply(SelectionEvent::ToggleAll)?,
            NormalModeAction::Confirm => self.apply(SelectionEvent::Confirm)?,
            NormalModeAction::ToggleHelpMode => self.help_mode = true,
            NormalModeAction::None => {}
        }
        self.refresh_hover();
        Ok(())
    }

    fn handle_help_mode_key(&mut self, key_event: KeyEvent) {
        if KeyHandler::handle_help_mode_key(key_event) == HelpModeAction::ExitHelpMode {
            self.help_mode = false;
        }
    }

    fn handle_confirm_mode_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_confirm_mode_key(key_event) {
            ConfirmModeAction::Accept => {
                self.confirmed = self.pending_confirmation.take();
                self.should_quit = true;
            }
            ConfirmModeAction::Dismiss => {
                self.pending_confirmation = None;
            }
            ConfirmModeAction::None => {}
        }
    }
}

impl KeyEventHandler for App {
    fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        if !KeyHandler::is_press(&key_event) {
            return Ok(());
        }

        if self.pending_confirmation.is_some() {
            self.handle_confirm_mode_key(key_event);
            Ok(())
        } else if self.help_mode {
            self.handle_help_mode_key(key_event);
            Ok(())
        } else {
            self.handle_normal_mode_key(key_event)
        }
    }
}

impl MouseEventHandler for App {
    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) -> Result<()> {
        if self.pending_confirmation.is_some() || self.help_mode {
            return Ok(());
        }

        self.pointer.position = Some((mouse_event.column, mouse_event.row));
        let target = self.row_at(mouse_event.column, mouse_event.row);
        match mouse_event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer.hovered = target;
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.pointer.hovered = target;
                self.pointer.pressed = target;
                if let Some(row) = target {
                    self.navigation.focus(row);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let pressed = self.pointer.pressed.take();
                if let Some(row) = target {
                    if pressed == Some(row) {
                        self.activate(row)?;
                    }
                }
            }
            MouseEventKind::ScrollDown => {
                self.navigation.scroll_by(1);
                self.refresh_hover();
            }
            MouseEventKind::ScrollUp => {
                self.navigation.scroll_by(-1);
                self.refresh_hover();
            }
            _ => {}
        }
        Ok(())
    }
}
