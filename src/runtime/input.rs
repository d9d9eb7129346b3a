//! Key presses to messages

use crate::keys::{KeyAction, KeyLayout};
use crate::messages::{Direction, EditorMsg, Msg};

/// Message for a pressed key symbol
///
/// Symbols naming an action (`left`, `backspace`, `expand`, ...) or bound to
/// an action key in the layout trigger that action; anything else is inserted.
pub fn msg_for_symbol(keys: &KeyLayout, symbol: &str) -> Msg {
    let action = action_for_name(symbol).or_else(|| {
        keys.find(symbol)
            .map(|key| key.action)
            .filter(|action| *action != KeyAction::Insert)
    });

    match action {
        Some(action) => msg_for_action(action, symbol),
        None => Msg::Editor(EditorMsg::Insert(symbol.to_string())),
    }
}

/// Message triggered by a key action
pub fn msg_for_action(action: KeyAction, symbol: &str) -> Msg {
    let msg = match action {
        KeyAction::Insert => EditorMsg::Insert(symbol.to_string()),
        KeyAction::Delete => EditorMsg::Backspace,
        KeyAction::Clear => EditorMsg::Clear,
        KeyAction::Left => EditorMsg::Move(Direction::Left),
        KeyAction::Right => EditorMsg::Move(Direction::Right),
        KeyAction::Up => EditorMsg::Move(Direction::Up),
        KeyAction::Down => EditorMsg::Move(Direction::Down),
        KeyAction::Execute => EditorMsg::Execute,
        KeyAction::ExpandSelection => EditorMsg::ExpandSelection,
        KeyAction::Undo => EditorMsg::Undo,
        KeyAction::Redo => EditorMsg::Redo,
    };
    Msg::Editor(msg)
}

fn action_for_name(name: &str) -> Option<KeyAction> {
    Some(match name {
        "left" => KeyAction::Left,
        "right" => KeyAction::Right,
        "up" => KeyAction::Up,
        "down" => KeyAction::Down,
        "backspace" => KeyAction::Delete,
        "expand" => KeyAction::ExpandSelection,
        "undo" => KeyAction::Undo,
        "redo" => KeyAction::Redo,
        "clear" => KeyAction::Clear,
        "execute" => KeyAction::Execute,
        _ => return None,
    })
}
