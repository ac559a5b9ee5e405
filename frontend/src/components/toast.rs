use shared::notify::{Notification, Variant, TOAST_DURATION_MS};
use yew::prelude::*;
use yew_hooks::use_timeout;

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub notification: Notification,
    pub on_dismiss: Callback<()>,
}

/// Dismisses itself after [`TOAST_DURATION_MS`]. Give it a fresh `key` per
/// notification so the timer restarts.
#[function_component]
pub fn Toast(props: &ToastProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_timeout(move || on_dismiss.emit(()), TOAST_DURATION_MS);
    }

    let onclick = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(()))
    };
    let class = match props.notification.variant {
        Variant::Default => "toast",
        Variant::Destructive => "toast toast-destructive",
    };

    html! {
        <div {class} role="status" {onclick}>
            <strong>{ props.notification.title.clone() }</strong>
            if let Some(description) = &props.notification.description {
                <p>{ description.clone() }</p>
            }
        </div>
    }
}
