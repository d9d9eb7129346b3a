use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Instant;

use crate::analysis::AnalysisService;
use crate::commands::Cmd;
use crate::error::ServiceError;
use crate::evaluation::{EvaluationWorker, Evaluator};
use crate::messages::{EvaluationMsg, Msg};
use crate::model::AppModel;
use crate::update::update;

use super::input::msg_for_symbol;

/// Drives `update` and performs the side effects its commands ask for
///
/// Evaluations go to a single [`EvaluationWorker`]; analyses run on a
/// short-lived thread each and report back through the message channel.
pub struct Runtime {
    model: AppModel,
    evaluator: EvaluationWorker,
    analysis: Arc<dyn AnalysisService>,
    /// Revision the outstanding evaluation was requested for
    evaluation_revision: Option<u64>,
    /// Revision the outstanding analysis was requested for
    analysis_revision: Option<u64>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
}

impl Runtime {
    pub fn new(
        model: AppModel,
        evaluator: Arc<dyn Evaluator>,
        analysis: Arc<dyn AnalysisService>,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            evaluator: EvaluationWorker::spawn(evaluator),
            analysis,
            evaluation_revision: None,
            analysis_revision: None,
            msg_tx,
            msg_rx,
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn into_model(self) -> AppModel {
        self.model
    }

    /// Run one message through the update loop; returns whether to redraw
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        match update(&mut self.model, msg) {
            Some(cmd) => {
                let needs_redraw = cmd.needs_redraw();
                self.process_cmd(cmd);
                needs_redraw
            }
            None => false,
        }
    }

    /// Dispatch the message for a pressed key symbol
    pub fn press(&mut self, symbol: &str) -> bool {
        let msg = msg_for_symbol(&self.model.keys, symbol);
        self.dispatch(msg)
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => {}
            Cmd::Evaluate {
                revision,
                expression,
                scope,
            } => {
                self.evaluator.submit(expression, scope);
                self.evaluation_revision = Some(revision);
            }
            Cmd::Analyze { revision, markup } => {
                self.analysis_revision = Some(revision);
                let tx = self.msg_tx.clone();
                let service = Arc::clone(&self.analysis);
                std::thread::spawn(move || {
                    let result = service.analyze(&markup);
                    let _ = tx.send(Msg::Evaluation(EvaluationMsg::AnalysisCompleted {
                        revision,
                        result,
                    }));
                });
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }

    /// Feed finished work back into the model without blocking
    pub fn process_async_messages(&mut self) -> bool {
        let mut needs_redraw = false;

        if let Some(response) = self.evaluator.poll() {
            if let Some(revision) = self.evaluation_revision.take() {
                let msg = Msg::Evaluation(EvaluationMsg::Completed {
                    revision,
                    result: response.result,
                });
                needs_redraw |= self.dispatch(msg);
            }
        }

        while let Ok(msg) = self.msg_rx.try_recv() {
            if matches!(msg, Msg::Evaluation(EvaluationMsg::AnalysisCompleted { .. })) {
                self.analysis_revision = None;
            }
            needs_redraw |= self.dispatch(msg);
        }
        needs_redraw
    }

    /// Block until the outstanding evaluation answers or times out
    pub fn wait_for_evaluation(&mut self) -> bool {
        let Some(revision) = self.evaluation_revision.take() else {
            return false;
        };
        let timeout = self.model.config.evaluation_timeout();
        let result = self
            .evaluator
            .wait(timeout)
            .and_then(|response| response.result);
        self.dispatch(Msg::Evaluation(EvaluationMsg::Completed { revision, result }))
    }

    /// Block until the outstanding analysis answers or times out
    ///
    /// Answers to older analyses that arrive first are fed through `update`,
    /// which discards them, and the wait goes on.
    pub fn wait_for_analysis(&mut self) -> bool {
        let Some(revision) = self.analysis_revision.take() else {
            return false;
        };
        let timeout = self.model.config.analysis_timeout();
        let deadline = Instant::now() + timeout;
        let mut needs_redraw = false;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let msg = match self.msg_rx.recv_timeout(remaining) {
                Ok(msg) => msg,
                Err(RecvTimeoutError::Timeout) => {
                    tracing::debug!("Analysis for revision {} timed out", revision);
                    Msg::Evaluation(EvaluationMsg::AnalysisCompleted {
                        revision,
                        result: Err(ServiceError::Timeout),
                    })
                }
                Err(RecvTimeoutError::Disconnected) => return needs_redraw,
            };

            let answers_latest = matches!(
                &msg,
                Msg::Evaluation(EvaluationMsg::AnalysisCompleted { revision: r, .. }) if *r == revision
            );
            needs_redraw |= self.dispatch(msg);
            if answers_latest {
                return needs_redraw;
            }
        }
    }
}
