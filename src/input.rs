use crossterm::event::KeyCode;

use crate::grid::Dir;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Move(Dir),
    Hint,
    Start,
    Reset,
    SelectLevel(u32),
    Quit,
}

pub fn action_for(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Action::Move(Dir::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Action::Move(Dir::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Action::Move(Dir::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Action::Move(Dir::Right),
        KeyCode::Char('h' | 'H') => Action::Hint,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Start,
        KeyCode::Char('r' | 'R') => Action::Reset,
        KeyCode::Char(c @ '1'..='4') => Action::SelectLevel(c as u32 - '0' as u32),
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd_move() {
        assert_eq!(action_for(KeyCode::Up), Some(Action::Move(Dir::Up)));
        assert_eq!(action_for(KeyCode::Char('a')), Some(Action::Move(Dir::Left)));
        assert_eq!(action_for(KeyCode::Char('D')), Some(Action::Move(Dir::Right)));
    }

    #[test]
    fn digits_pick_levels() {
        assert_eq!(action_for(KeyCode::Char('1')), Some(Action::SelectLevel(1)));
        assert_eq!(action_for(KeyCode::Char('4')), Some(Action::SelectLevel(4)));
        assert_eq!(action_for(KeyCode::Char('5')), None);
    }

    #[test]
    fn other_keys() {
        assert_eq!(action_for(KeyCode::Char('h')), Some(Action::Hint));
        assert_eq!(action_for(KeyCode::Enter), Some(Action::Start));
        assert_eq!(action_for(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(action_for(KeyCode::Tab), None);
    }
}
