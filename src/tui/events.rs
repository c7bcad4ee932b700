//! Event Handling - Keyboard input processing

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::{Focus, TuiState};
use crate::config::{clamp_count, MAX_COUNT};
use crate::mission::MissionController;

/// Actions that can be triggered by user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Launch,
    Help,
    NextPanel,
    PrevPanel,
    Edit,
    ScrollUp,
    ScrollDown,
    None,
}

/// Handle keyboard events
pub fn handle_key_event(
    key: KeyEvent,
    ui: &mut TuiState,
    controller: &mut MissionController,
) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }

    // Global keybindings (work in any state)
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Action::Quit,
        (_, KeyCode::F(1)) => {
            ui.show_help = !ui.show_help;
            return Action::Help;
        }
        (KeyModifiers::NONE, KeyCode::Tab) => {
            ui.focus = ui.focus.next();
            return Action::NextPanel;
        }
        (_, KeyCode::BackTab) => {
            ui.focus = ui.focus.prev();
            return Action::PrevPanel;
        }
        _ => {}
    }

    if ui.show_help && key.code == KeyCode::Esc {
        ui.show_help = false;
        return Action::Help;
    }

    match ui.focus {
        Focus::Niche => handle_niche_key(key, ui, controller),
        Focus::Count => handle_count_key(key, controller),
        Focus::Drafts | Focus::Log => handle_panel_key(key, ui, controller),
    }
}

fn handle_niche_key(key: KeyEvent, ui: &mut TuiState, controller: &mut MissionController) -> Action {
    match key.code {
        KeyCode::Enter => Action::Launch,
        KeyCode::Esc => {
            ui.focus = Focus::Drafts;
            Action::NextPanel
        }
        KeyCode::Backspace => {
            let mut niche = controller.state().mission.niche.clone();
            niche.pop();
            controller.set_niche(niche);
            Action::Edit
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut niche = controller.state().mission.niche.clone();
            niche.push(c);
            controller.set_niche(niche);
            Action::Edit
        }
        _ => Action::None,
    }
}

fn handle_count_key(key: KeyEvent, controller: &mut MissionController) -> Action {
    let count = controller.state().mission.count;
    let next = match key.code {
        KeyCode::Enter => return Action::Launch,
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Up | KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('k') => count + 1,
        KeyCode::Down | KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('j') => {
            count.saturating_sub(1)
        }
        KeyCode::Char('0') => MAX_COUNT,
        KeyCode::Char(c) if c.is_ascii_digit() => c.to_digit(10).unwrap_or(count),
        _ => return Action::None,
    };
    controller.set_count(clamp_count(next));
    Action::Edit
}

fn handle_panel_key(key: KeyEvent, ui: &mut TuiState, controller: &mut MissionController) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('l') => Action::Launch,
        KeyCode::Char('?') => {
            ui.show_help = !ui.show_help;
            Action::Help
        }
        KeyCode::Up | KeyCode::Char('k') => {
            match ui.focus {
                Focus::Log => ui.scroll_log_up(controller.state().log.len()),
                _ => controller.select_relative(-1),
            }
            Action::ScrollUp
        }
        KeyCode::Down | KeyCode::Char('j') => {
            match ui.focus {
                Focus::Log => ui.scroll_log_down(),
                _ => controller.select_relative(1),
            }
            Action::ScrollDown
        }
        KeyCode::End | KeyCode::Char('G') => {
            ui.follow_log();
            Action::ScrollDown
        }
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::LeadRecord;
    use crate::mission::{ConsoleState, ScriptedTransport};

    fn controller() -> MissionController {
        MissionController::new(ConsoleState::new("Agencies", 1), Box::new(ScriptedTransport::default()))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_c_quit() {
        let mut ui = TuiState::default();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key, &mut ui, &mut controller()), Action::Quit);
    }

    #[test]
    fn test_q_types_into_niche() {
        let mut ui = TuiState {
            focus: Focus::Niche,
            ..TuiState::default()
        };
        let mut controller = controller();

        assert_eq!(handle_key_event(press(KeyCode::Char('q')), &mut ui, &mut controller), Action::Edit);
        assert_eq!(controller.state().mission.niche, "Agenciesq");

        handle_key_event(press(KeyCode::Backspace), &mut ui, &mut controller);
        assert_eq!(controller.state().mission.niche, "Agencies");
    }

    #[test]
    fn test_q_quits_outside_niche() {
        let mut ui = TuiState::default();
        assert_eq!(
            handle_key_event(press(KeyCode::Char('q')), &mut ui, &mut controller()),
            Action::Quit
        );
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut ui = TuiState::default();
        assert_eq!(ui.focus, Focus::Drafts);

        handle_key_event(press(KeyCode::Tab), &mut ui, &mut controller());
        assert_eq!(ui.focus, Focus::Log);
    }

    #[test]
    fn test_count_stays_in_bounds() {
        let mut ui = TuiState {
            focus: Focus::Count,
            ..TuiState::default()
        };
        let mut controller = controller();

        handle_key_event(press(KeyCode::Down), &mut ui, &mut controller);
        assert_eq!(controller.state().mission.count, 1);

        handle_key_event(press(KeyCode::Char('7')), &mut ui, &mut controller);
        assert_eq!(controller.state().mission.count, 7);

        for _ in 0..5 {
            handle_key_event(press(KeyCode::Char('+')), &mut ui, &mut controller);
        }
        assert_eq!(controller.state().mission.count, 10);
    }

    #[test]
    fn test_enter_launches_from_inputs() {
        let mut ui = TuiState {
            focus: Focus::Count,
            ..TuiState::default()
        };
        assert_eq!(
            handle_key_event(press(KeyCode::Enter), &mut ui, &mut controller()),
            Action::Launch
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('l')), &mut TuiState::default(), &mut controller()),
            Action::Launch
        );
    }

    #[test]
    fn test_arrows_move_draft_selection() {
        let mut ui = TuiState::default();
        let mut controller = controller();
        controller.load_history(vec![LeadRecord::new("A", "a"), LeadRecord::new("B", "b")]);

        handle_key_event(press(KeyCode::Up), &mut ui, &mut controller);
        assert_eq!(controller.state().leads.selected_index(), Some(0));
        handle_key_event(press(KeyCode::Char('j')), &mut ui, &mut controller);
        assert_eq!(controller.state().leads.selected_index(), Some(1));
    }

    #[test]
    fn test_help_toggle() {
        let mut ui = TuiState::default();
        let mut controller = controller();
        handle_key_event(press(KeyCode::Char('?')), &mut ui, &mut controller);
        assert!(ui.show_help);
        handle_key_event(press(KeyCode::Esc), &mut ui, &mut controller);
        assert!(!ui.show_help);
    }
}
