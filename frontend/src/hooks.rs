use shared::submission::{Controller, Tool};
use yew::prelude::*;
use yew_hooks::use_update;

use crate::rpc::ControllerHandle;

#[hook]
pub fn use_controller<T, F>(init: F) -> ControllerHandle<T>
where
    T: Tool + 'static,
    T::Request: 'static,
    T::Response: 'static,
    F: FnOnce() -> T,
{
    let inner = use_mut_ref(|| Controller::new(init()));
    let update = use_update();

    ControllerHandle::new(inner, update)
}
