//! Request lifecycle shared by the chat widget and every generator tool.
//!
//! A [`Controller`] owns one [`Tool`] and walks it through
//! `Idle -> Submitting -> Succeeded | Failed`. Only `Submitting` blocks a new
//! submission; the two outcome phases accept the next prompt like `Idle`.
//! `begin` and `finish` are split out so callers that cannot hold `&mut`
//! across the network call (UI event handlers) can still use the lifecycle;
//! [`Controller::submit`] drives both ends in one call.

use std::fmt::Display;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::{
    api::{post_json, ClientTransport},
    notify::{Notification, Notifier},
};

/// Per-tool behavior plugged into a [`Controller`].
pub trait Tool {
    type Request: Serialize;
    type Response: DeserializeOwned;

    const ROUTE: &'static str;
    const FAILURE_TITLE: &'static str = "Error";
    const FAILURE_DESCRIPTION: &'static str;
    /// Whether an accepted draft is cleared from the input.
    const CLEARS_DRAFT: bool = false;

    fn request(&self, prompt: &str) -> Self::Request;

    /// Runs when a submission is accepted, before the request goes out.
    fn on_submit(&mut self, _prompt: &str) {}

    fn on_success(&mut self, response: Self::Response);
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    #[error("prompt is empty")]
    Empty,
    #[error("a request is already in flight")]
    InFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skipped(Rejected),
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct Controller<T> {
    tool: T,
    phase: Phase,
    draft: String,
}

impl<T: Tool> Controller<T> {
    pub fn new(tool: T) -> Self {
        Self {
            tool,
            phase: Phase::Idle,
            draft: String::new(),
        }
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// Access to the tool's options (content type, subject, ...).
    pub fn tool_mut(&mut self) -> &mut T {
        &mut self.tool
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// Accepts `prompt` and returns the one request to send for it.
    ///
    /// Blank prompts and prompts arriving while a request is outstanding are
    /// rejected without touching any state.
    pub fn begin(&mut self, prompt: &str) -> Result<T::Request, Rejected> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(Rejected::Empty);
        }
        if self.is_in_flight() {
            return Err(Rejected::InFlight);
        }

        self.tool.on_submit(prompt);
        self.phase = Phase::Submitting;

        Ok(self.tool.request(prompt))
    }

    /// Same as [`Controller::begin`] using the current draft.
    pub fn begin_draft(&mut self) -> Result<T::Request, Rejected> {
        let draft = std::mem::take(&mut self.draft);
        let begun = self.begin(&draft);

        if begun.is_err() || !T::CLEARS_DRAFT {
            self.draft = draft;
        }

        begun
    }

    /// Settles the outstanding request.
    pub fn finish<E, N>(&mut self, result: Result<T::Response, E>, notifier: &N) -> Outcome
    where
        E: Display,
        N: Notifier + ?Sized,
    {
        if !self.is_in_flight() {
            tracing::warn!(route = T::ROUTE, "ignoring result with no request in flight");
            return Outcome::Skipped(Rejected::InFlight);
        }

        match result {
            Ok(response) => {
                self.tool.on_success(response);
                self.phase = Phase::Succeeded;
                Outcome::Succeeded
            }
            Err(err) => {
                let message = err.to_string();
                tracing::error!(route = T::ROUTE, error = %message, "submission failed");
                notifier.notify(Notification::destructive(
                    T::FAILURE_TITLE,
                    T::FAILURE_DESCRIPTION,
                ));
                self.phase = Phase::Failed(message.clone());
                Outcome::Failed(message)
            }
        }
    }

    /// Runs one full submission: guard, single request, settle.
    pub async fn submit<Tr, N>(&mut self, prompt: &str, transport: &Tr, notifier: &N) -> Outcome
    where
        Tr: ClientTransport + ?Sized,
        N: Notifier + ?Sized,
    {
        match self.begin(prompt) {
            Ok(request) => self.dispatch(request, transport, notifier).await,
            Err(rejected) => Outcome::Skipped(rejected),
        }
    }

    pub async fn submit_draft<Tr, N>(&mut self, transport: &Tr, notifier: &N) -> Outcome
    where
        Tr: ClientTransport + ?Sized,
        N: Notifier + ?Sized,
    {
        match self.begin_draft() {
            Ok(request) => self.dispatch(request, transport, notifier).await,
            Err(rejected) => Outcome::Skipped(rejected),
        }
    }

    async fn dispatch<Tr, N>(&mut self, request: T::Request, transport: &Tr, notifier: &N) -> Outcome
    where
        Tr: ClientTransport + ?Sized,
        N: Notifier + ?Sized,
    {
        let result = post_json::<Tr, T::Request, T::Response>(transport, T::ROUTE, &request).await;
        self.finish(result, notifier)
    }
}
