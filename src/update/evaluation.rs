//! Evaluation scheduling and result handling.

use crate::commands::Cmd;
use crate::error::ServiceError;
use crate::messages::EvaluationMsg;
use crate::model::{AppModel, EvaluationStatus};
use crate::render::source_markup;
use crate::translate::{translate, NotTranslatable};

/// Command evaluating the current formula, updating the status to match
pub fn schedule_evaluation(model: &mut AppModel) -> Cmd {
    let revision = model.revision;
    match translate(&model.editor.tokens, model.config.angle_mode) {
        Ok(translation) => {
            model.status = EvaluationStatus::Pending { revision };
            Cmd::Evaluate {
                revision,
                expression: translation.expression,
                scope: translation.scope,
            }
        }
        Err(NotTranslatable::Empty) => {
            model.status = EvaluationStatus::Idle;
            Cmd::None
        }
        Err(NotTranslatable::Denylisted(_)) => {
            model.status = EvaluationStatus::NotEvaluable;
            Cmd::None
        }
    }
}

/// Explicit execute: evaluate, or send formulas that do not linearize to analysis
pub(super) fn execute(model: &mut AppModel) -> Cmd {
    let revision = model.revision;
    match translate(&model.editor.tokens, model.config.angle_mode) {
        Ok(_) => Cmd::batch(vec![Cmd::Redraw, schedule_evaluation(model)]),
        Err(NotTranslatable::Denylisted(_)) => {
            model.status = EvaluationStatus::Pending { revision };
            Cmd::batch(vec![
                Cmd::Redraw,
                Cmd::Analyze {
                    revision,
                    markup: source_markup(&model.editor.tokens),
                },
            ])
        }
        Err(NotTranslatable::Empty) => {
            model.status = EvaluationStatus::Idle;
            Cmd::Redraw
        }
    }
}

/// Handle results from the evaluator and the analysis service
pub fn update_evaluation(model: &mut AppModel, msg: EvaluationMsg) -> Option<Cmd> {
    match msg {
        EvaluationMsg::Completed { revision, result } => {
            if !is_current(model, revision) {
                return None;
            }
            model.status = match result {
                Ok(value) => EvaluationStatus::Value(value),
                // Real-time evaluation is best effort
                Err(ServiceError::Evaluation(detail)) => {
                    tracing::debug!("Evaluation failed: {}", detail);
                    EvaluationStatus::NotEvaluable
                }
                Err(e) => EvaluationStatus::Failed(e.user_message()),
            };
        }
        EvaluationMsg::AnalysisCompleted { revision, result } => {
            if !is_current(model, revision) {
                return None;
            }
            model.status = match result {
                Ok(report) => EvaluationStatus::Analysis(report),
                Err(e) => EvaluationStatus::Failed(e.user_message()),
            };
        }
    }
    Some(Cmd::Redraw)
}

fn is_current(model: &AppModel, revision: u64) -> bool {
    if revision != model.revision {
        tracing::debug!(
            "Discarding stale result for revision {} (current {})",
            revision,
            model.revision
        );
        return false;
    }
    true
}
