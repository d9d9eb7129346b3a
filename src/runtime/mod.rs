//! Runtime module - drives the update loop and its side effects
//!
//! - `app` - the [`Runtime`] owning the model, evaluator worker and analysis hand-off
//! - `input` - key symbol to message mapping

mod app;
pub mod input;

pub use app::Runtime;
pub use input::{msg_for_action, msg_for_symbol};
