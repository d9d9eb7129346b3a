//! Editor update functions for insertion, deletion, navigation and history.

use crate::commands::Cmd;
use crate::messages::EditorMsg;
use crate::model::{AppModel, KeyDescription};

use super::evaluation::{execute, schedule_evaluation};

/// Handle editor messages
pub fn update_editor(model: &mut AppModel, msg: EditorMsg) -> Option<Cmd> {
    let changed = match msg {
        EditorMsg::Insert(symbol) => {
            let Some(key) = resolve_key(model, symbol) else {
                return None;
            };
            model.editor.insert(&key)
        }
        EditorMsg::Backspace => model.editor.backspace(),
        EditorMsg::Clear => model.editor.clear(),
        EditorMsg::Undo => model.editor.undo(),
        EditorMsg::Redo => model.editor.redo(),

        EditorMsg::Move(direction) => {
            if let Some(horizontal) = direction.horizontal() {
                model.editor.move_horizontal(horizontal);
            } else if let Some(vertical) = direction.vertical() {
                model.editor.move_vertical(vertical);
            }
            return Some(Cmd::Redraw);
        }
        EditorMsg::ExpandSelection => {
            model.editor.expand_selection();
            return Some(Cmd::Redraw);
        }
        EditorMsg::Execute => return Some(execute(model)),
    };

    if !changed {
        // Selection may still have been cleared
        return Some(Cmd::Redraw);
    }

    model.revision += 1;
    if model.config.realtime_evaluation {
        Some(Cmd::batch(vec![Cmd::Redraw, schedule_evaluation(model)]))
    } else {
        Some(Cmd::Redraw)
    }
}

/// Key description for a symbol: the layout's entry, else a classified flat key
fn resolve_key(model: &AppModel, symbol: String) -> Option<KeyDescription> {
    match model.keys.find(&symbol) {
        Some(key) => {
            if key.description.is_none() {
                tracing::debug!("Key '{}' is not an insert key", symbol);
            }
            key.description.clone()
        }
        None => Some(KeyDescription::classified(symbol)),
    }
}
