//! Keyboard mapping
//!
//! Physical keys map onto a handful of logical actions. Whether an action is
//! legal right now is decided by the simulation, not here.

/// Logical player action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Jump,
    Boost,
    TogglePause,
}

/// Map a `KeyboardEvent.code` to an action.
///
/// A `Some` result means the host should also suppress the browser default
/// for that key (Space scrolls the page, Shift selects, ...).
pub fn action_for_code(code: &str) -> Option<Action> {
    match code {
        "Space" | "ArrowUp" => Some(Action::Jump),
        "ShiftLeft" | "ShiftRight" => Some(Action::Boost),
        "Escape" => Some(Action::TogglePause),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_keys() {
        assert_eq!(action_for_code("Space"), Some(Action::Jump));
        assert_eq!(action_for_code("ArrowUp"), Some(Action::Jump));
    }

    #[test]
    fn test_boost_keys() {
        assert_eq!(action_for_code("ShiftLeft"), Some(Action::Boost));
        assert_eq!(action_for_code("ShiftRight"), Some(Action::Boost));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(action_for_code("KeyA"), None);
        assert_eq!(action_for_code("ArrowDown"), None);
        // Codes are case-sensitive, `key` values are not accepted
        assert_eq!(action_for_code(" "), None);
        assert_eq!(action_for_code("space"), None);
    }
}
