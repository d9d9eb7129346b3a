//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod editor;
mod evaluation;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::StateSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use editor::update_editor;
pub use evaluation::{schedule_evaluation, update_evaluation};

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Editor(m) => editor::update_editor(model, m),
        Msg::Evaluation(m) => evaluation::update_evaluation(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after editor state, logs the diff and checks invariants.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = StateSnapshot::from_editor(&model.editor);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = StateSnapshot::from_editor(&model.editor);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "editor", %diff, "state changed");
    }

    model.editor.assert_invariants();
    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Editor::Move(Left)`
/// - `Editor::Insert("\\frac")`
/// - `Evaluation::Completed { revision: 3, .. }`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Editor(m) => format!("Editor::{:?}", m),
        Msg::Evaluation(m) => format!("Evaluation::{:?}", m),
    }
}
