use gloo_net::http::{Method, Request};
use shared::{
    api::{post_json, CallError, ClientTransport},
    notify::{Notification, Notifier},
    submission::{Controller, Tool},
};
use std::{cell::RefCell, rc::Rc};
use thiserror::Error;
use web_sys::RequestCredentials;
use yew::Callback;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("unsupported method `{0}`")]
    UnknownMethod(String),
    #[error(transparent)]
    Http(#[from] gloo_net::Error),
}

fn method_for(name: &str) -> Result<Method, TransportError> {
    match name.to_lowercase().as_str() {
        "get" => Ok(Method::GET),
        "post" => Ok(Method::POST),
        "put" => Ok(Method::PUT),
        "delete" => Ok(Method::DELETE),
        other => Err(TransportError::UnknownMethod(other.to_owned())),
    }
}

/// Same-origin JSON calls through the browser's fetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct Client;

#[async_trait::async_trait(?Send)]
impl ClientTransport for Client {
    type Error = TransportError;

    async fn send_request(
        &self,
        method: &str,
        route: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Result<serde_json::Value, serde_json::Value>, TransportError> {
        let method = method_for(method)?;

        let req = Request::new(route)
            .method(method)
            .credentials(RequestCredentials::SameOrigin);
        let req = if let Some(body) = body {
            req.json(&body)?
        } else {
            req
        };

        let resp = req.send().await?;

        let text = resp.text().await?;
        let json = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);

        if resp.ok() {
            Ok(Ok(json))
        } else {
            Ok(Err(json))
        }
    }
}

/// Forwards notifications to the app's toast.
pub struct CallbackNotifier(pub Callback<Notification>);

impl Notifier for CallbackNotifier {
    fn notify(&self, notification: Notification) {
        self.0.emit(notification);
    }
}

/// A controller shared between a component and its in-flight request.
pub struct ControllerHandle<T> {
    inner: Rc<RefCell<Controller<T>>>,
    update: Rc<dyn Fn()>,
}

impl<T> Clone for ControllerHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            update: self.update.clone(),
        }
    }
}

impl<T> ControllerHandle<T>
where
    T: Tool + 'static,
    T::Request: 'static,
    T::Response: 'static,
{
    pub fn new(inner: Rc<RefCell<Controller<T>>>, update: Rc<dyn Fn()>) -> Self {
        Self { inner, update }
    }

    pub fn read<R>(&self, f: impl FnOnce(&Controller<T>) -> R) -> R {
        f(&self.inner.borrow())
    }

    pub fn set_draft(&self, draft: String) {
        self.inner.borrow_mut().set_draft(draft);
        (self.update)();
    }

    pub fn update_tool(&self, f: impl FnOnce(&mut T)) {
        f(self.inner.borrow_mut().tool_mut());
        (self.update)();
    }

    /// Submits the current draft; blank drafts and re-submits while in flight do nothing.
    pub fn submit(&self, notify: Callback<Notification>) {
        let begun = self.inner.borrow_mut().begin_draft();
        let request = match begun {
            Ok(request) => request,
            Err(rejected) => {
                tracing::debug!(%rejected, route = T::ROUTE, "submission skipped");
                return;
            }
        };
        (self.update)();

        let handle = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result: Result<T::Response, CallError<Client>> =
                post_json(&Client, T::ROUTE, &request).await;

            handle
                .inner
                .borrow_mut()
                .finish(result, &CallbackNotifier(notify));
            (handle.update)();
        });
    }
}
