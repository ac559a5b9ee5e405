use std::{cell::RefCell, collections::VecDeque};

use serde_json::Value;

use crate::api::ClientTransport;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub method: String,
    pub route: String,
    pub body: Option<Value>,
}

#[derive(thiserror::Error, Debug)]
#[error("connection refused")]
pub(crate) struct ConnectionRefused;

enum Scripted {
    Ok(Value),
    Err(Value),
    Down,
}

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    script: RefCell<VecDeque<Scripted>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_ok(&self, body: Value) {
        self.script.borrow_mut().push_back(Scripted::Ok(body));
    }

    pub fn respond_err(&self, body: Value) {
        self.script.borrow_mut().push_back(Scripted::Err(body));
    }

    pub fn fail_connection(&self) {
        self.script.borrow_mut().push_back(Scripted::Down);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl ClientTransport for ScriptedTransport {
    type Error = ConnectionRefused;

    async fn send_request(
        &self,
        method: &str,
        route: &str,
        body: Option<Value>,
    ) -> Result<Result<Value, Value>, ConnectionRefused> {
        self.calls.borrow_mut().push(RecordedCall {
            method: method.to_owned(),
            route: route.to_owned(),
            body,
        });

        match self.script.borrow_mut().pop_front() {
            Some(Scripted::Ok(body)) => Ok(Ok(body)),
            Some(Scripted::Err(body)) => Ok(Err(body)),
            Some(Scripted::Down) | None => Err(ConnectionRefused),
        }
    }
}
