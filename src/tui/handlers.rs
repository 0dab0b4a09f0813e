use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};

pub struct KeyHandler;

impl KeyHandler {
    pub fn handle_normal_mode_key(key_event: KeyEvent) -> NormalModeAction {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => NormalModeAction::Quit,
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                NormalModeAction::Quit
            }
            KeyCode::Up | KeyCode::Char('k') => NormalModeAction::MoveFocusUp,
            KeyCode::Down | KeyCode::Char('j') => NormalModeAction::MoveFocusDown,
            KeyCode::Tab => NormalModeAction::FocusNext,
            KeyCode::BackTab => NormalModeAction::FocusPrevious,
            KeyCode::Home | KeyCode::Char('g') => NormalModeAction::FocusFirst,
            KeyCode::End | KeyCode::Char('G') => NormalModeAction::FocusLast,
            KeyCode::Enter | KeyCode::Char(' ') => NormalModeAction::ActivateFocused,
            KeyCode::Char('a') => NormalModeAction::ToggleAll,
            KeyCode::Char('d') => NormalModeAction::Confirm,
            KeyCode::Char('?') => NormalModeAction::ToggleHelpMode,
            _ => NormalModeAction::None,
        }
    }

    pub fn handle_help_mode_key(key_event: KeyEvent) -> HelpModeAction {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?') => {
                HelpModeAction::ExitHelpMode
            }
            _ => HelpModeAction::None,
        }
    }

    pub fn handle_confirm_mode_key(key_event: KeyEvent) -> ConfirmModeAction {
        match key_event.code {
            KeyCode::Enter | KeyCode::Char('y') => ConfirmModeAction::Accept,
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('q') => ConfirmModeAction::Dismiss,
            _ => ConfirmModeAction::None,
        }
    }

    /// Key releases are reported on some platforms and must not toggle twice.
    pub fn is_press(key_event: &KeyEvent) -> bool {
        key_event.kind != KeyEventKind::Release
    }
}

#[derive(Debug, PartialEq)]
pub enum NormalModeAction {
    None,
    Quit,
    MoveFocusUp,
    MoveFocusDown,
    FocusNext,
    FocusPrevious,
    FocusFirst,
    FocusLast,
    ActivateFocused,
    ToggleAll,
    Confirm,
    ToggleHelpMode,
}

#[derive(Debug, PartialEq)]
pub enum HelpModeAction {
    None,
    ExitHelpMode,
}

#[derive(Debug, PartialEq)]
pub enum ConfirmModeAction {
    None,
    Accept,
    Dismiss,
}

pub trait KeyEventHandler {
    fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()>;
}

pub trait MouseEventHandler {
    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_mode_basic_keys() {
        let key_event = KeyEvent::from(KeyCode::Char('q'));
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::Quit);

        let key_event = KeyEvent::from(KeyCode::Esc);
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::Quit);

        let key_event = KeyEvent::from(KeyCode::Enter);
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::ActivateFocused);

        let key_event = KeyEvent::from(KeyCode::Char(' '));
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::ActivateFocused);

        let key_event = KeyEvent::from(KeyCode::Char('a'));
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::ToggleAll);

        let key_event = KeyEvent::from(KeyCode::Char('d'));
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::Confirm);
    }

    #[test]
    fn test_normal_mode_navigation_keys() {
        let key_event = KeyEvent::from(KeyCode::Up);
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::MoveFocusUp);

        let key_event = KeyEvent::from(KeyCode::Char('j'));
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::MoveFocusDown);

        let key_event = KeyEvent::from(KeyCode::Tab);
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::FocusNext);

        let key_event = KeyEvent::from(KeyCode::BackTab);
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::FocusPrevious);

        let key_event = KeyEvent::from(KeyCode::End);
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::FocusLast);
    }

    #[test]
    fn test_normal_mode_ctrl_keys() {
        let mut key_event = KeyEvent::from(KeyCode::Char('c'));
        key_event.modifiers = KeyModifiers::CONTROL;
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::Quit);

        let key_event = KeyEvent::from(KeyCode::Char('c'));
        assert_eq!(KeyHandler::handle_normal_mode_key(key_event), NormalModeAction::None);
    }

    #[test]
    fn test_help_mode_keys() {
        let key_event = KeyEvent::from(KeyCode::Esc);
        assert_eq!(KeyHandler::handle_help_mode_key(key_event), HelpModeAction::ExitHelpMode);

        let key_event = KeyEvent::from(KeyCode::Char('?'));
        assert_eq!(KeyHandler::handle_help_mode_key(key_event), HelpModeAction::ExitHelpMode);

        let key_event = KeyEvent::from(KeyCode::Char('x'));
        assert_eq!(KeyHandler::handle_help_mode_key(key_event), HelpModeAction::None);
    }

    #[test]
    fn test_confirm_mode_keys() {
        let key_event = KeyEvent::from(KeyCode::Enter);
        assert_eq!(KeyHandler::handle_confirm_mode_key(key_event), ConfirmModeAction::Accept);

        let key_event = KeyEvent::from(KeyCode::Esc);
        assert_eq!(KeyHandler::handle_confirm_mode_key(key_event), ConfirmModeAction::Dismiss);

        let key_event = KeyEvent::from(KeyCode::Char(' '));
        assert_eq!(KeyHandler::handle_confirm_mode_key(key_event), ConfirmModeAction::None);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut key_event = KeyEvent::from(KeyCode::Enter);
        assert!(KeyHandler::is_press(&key_event));

        key_event.kind = KeyEventKind::Release;
        assert!(!KeyHandler::is_press(&key_event));
    }
}
