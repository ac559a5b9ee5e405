use shared::{notify::Notification, tools::ChatTool, Role};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_controller;

#[derive(Properties, PartialEq)]
pub struct ChatWidgetProps {
    pub on_notify: Callback<Notification>,
}

#[function_component]
pub fn ChatWidget(props: &ChatWidgetProps) -> Html {
    let chat = use_controller(ChatTool::with_greeting);
    let list_ref = use_node_ref();

    let revision = chat.read(|c| c.tool().transcript().revision());
    {
        let list_ref = list_ref.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(list) = list_ref.cast::<web_sys::Element>() {
                    list.set_scroll_top(list.scroll_height());
                }
            },
            revision,
        );
    }

    let oninput = {
        let chat = chat.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            chat.set_draft(input.value());
        })
    };

    let onsubmit = {
        let chat = chat.clone();
        let on_notify = props.on_notify.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            chat.submit(on_notify.clone());
        })
    };

    let (messages, draft, in_flight) = chat.read(|c| {
        (
            c.tool().transcript().messages().to_vec(),
            c.draft().to_owned(),
            c.is_in_flight(),
        )
    });

    html! {
        <section class="chat-widget">
            <ul class="chat-transcript" ref={list_ref}>
                { for messages.iter().map(|m| {
                    let class = match m.role {
                        Role::User => "message message-user",
                        Role::Assistant => "message message-assistant",
                    };
                    html! {
                        <li key={m.id.to_string()} {class}>
                            <p>{ m.content.clone() }</p>
                            <time>{ m.timestamp.format("%H:%M").to_string() }</time>
                        </li>
                    }
                }) }
                if in_flight {
                    <li class="message message-assistant message-pending">{ "Thinking..." }</li>
                }
            </ul>
            <form class="chat-input" {onsubmit}>
                <input
                    type="text"
                    placeholder="Type your message..."
                    value={draft.clone()}
                    {oninput}
                    disabled={in_flight}
                />
                <button type="submit" disabled={in_flight || draft.trim().is_empty()}>
                    { "Send" }
                </button>
            </form>
        </section>
    }
}
