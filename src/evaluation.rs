//! Background hand-off of translated expressions to an evaluator
//!
//! One worker thread, fed through an mpsc channel. Every request carries a
//! monotonic [`RequestId`]; only the response to the most recent request is
//! ever surfaced, older ones are dropped on arrival.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::error::ServiceError;
use crate::translate::Scope;

/// Identity of one submitted evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// Evaluates an expression against a scope, producing a formatted value
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, expression: &str, scope: &Scope) -> Result<String, ServiceError>;
}

impl<F> Evaluator for F
where
    F: Fn(&str, &Scope) -> Result<String, ServiceError> + Send + Sync,
{
    fn evaluate(&self, expression: &str, scope: &Scope) -> Result<String, ServiceError> {
        self(expression, scope)
    }
}

struct EvaluationRequest {
    id: RequestId,
    expression: String,
    scope: Scope,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResponse {
    pub id: RequestId,
    pub result: Result<String, ServiceError>,
}

pub struct EvaluationWorker {
    requests: Option<Sender<EvaluationRequest>>,
    responses: Receiver<EvaluationResponse>,
    next_id: u64,
    latest: Option<RequestId>,
    handle: Option<JoinHandle<()>>,
}

impl EvaluationWorker {
    /// Start the worker thread
    pub fn spawn(evaluator: Arc<dyn Evaluator>) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<EvaluationRequest>();
        let (response_tx, response_rx) = mpsc::channel();

        let handle = std::thread::spawn(move || {
            // Exits once the worker (and its sender) is dropped
            while let Ok(request) = request_rx.recv() {
                let result = evaluator.evaluate(&request.expression, &request.scope);
                let response = EvaluationResponse {
                    id: request.id,
                    result,
                };
                if response_tx.send(response).is_err() {
                    break;
                }
            }
        });

        Self {
            requests: Some(request_tx),
            responses: response_rx,
            next_id: 0,
            latest: None,
            handle: Some(handle),
        }
    }

    /// Queue an expression; it becomes the only request whose answer counts
    pub fn submit(&mut self, expression: impl Into<String>, scope: Scope) -> RequestId {
        self.next_id += 1;
        let id = RequestId(self.next_id);
        self.latest = Some(id);

        let request = EvaluationRequest {
            id,
            expression: expression.into(),
            scope,
        };
        if let Some(requests) = &self.requests {
            if requests.send(request).is_err() {
                tracing::warn!("Evaluation worker stopped, request {:?} not delivered", id);
            }
        }
        id
    }

    /// Id of the outstanding request, if its answer has not been taken yet
    pub fn latest(&self) -> Option<RequestId> {
        self.latest
    }

    pub fn is_pending(&self) -> bool {
        self.latest.is_some()
    }

    /// Non-blocking: the latest response if it has arrived
    pub fn poll(&mut self) -> Option<EvaluationResponse> {
        while let Ok(response) = self.responses.try_recv() {
            if let Some(response) = self.accept(response) {
                return Some(response);
            }
        }
        None
    }

    /// Block until the latest response arrives or `timeout` passes
    pub fn wait(&mut self, timeout: Duration) -> Result<EvaluationResponse, ServiceError> {
        if self.latest.is_none() {
            return Err(ServiceError::Evaluation("no request outstanding".to_string()));
        }

        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.responses.recv_timeout(remaining) {
                Ok(response) => {
                    if let Some(response) = self.accept(response) {
                        return Ok(response);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    tracing::debug!("Evaluation {:?} timed out after {:?}", self.latest, timeout);
                    self.latest = None;
                    return Err(ServiceError::Timeout);
                }
                Err(RecvTimeoutError::Disconnected) => {
                    self.latest = None;
                    return Err(ServiceError::Evaluation("evaluator stopped".to_string()));
                }
            }
        }
    }

    /// Keep a response only if it answers the latest request
    fn accept(&mut self, response: EvaluationResponse) -> Option<EvaluationResponse> {
        if Some(response.id) == self.latest {
            self.latest = None;
            Some(response)
        } else {
            tracing::debug!(
                "Discarding stale evaluation {:?} (latest {:?})",
                response.id,
                self.latest
            );
            None
        }
    }
}

impl Drop for EvaluationWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop once the current
        // evaluation returns
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.is_finished() {
                let _ = handle.join();
            } else {
                tracing::debug!("Detaching busy evaluation worker");
            }
        }
    }
}
