use shared::{
    notify::{LatestToast, Notification, Notifier},
    session::{Session, User},
};
use yew::prelude::*;
use yew_hooks::use_update;

mod components;
mod hooks;
mod rpc;

use components::{Account, BuilderPanel, ChatWidget, MarketerPanel, TeacherPanel, Toast, WriterPanel};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Chat,
    Writer,
    Teacher,
    Marketer,
    Builder,
}

impl Tab {
    const ALL: [Tab; 5] = [Tab::Chat, Tab::Writer, Tab::Teacher, Tab::Marketer, Tab::Builder];

    fn label(self) -> &'static str {
        match self {
            Tab::Chat => "Chat",
            Tab::Writer => "Writer",
            Tab::Teacher => "Teacher",
            Tab::Marketer => "Marketer",
            Tab::Builder => "Builder",
        }
    }
}

#[function_component]
fn App() -> Html {
    let session = use_state(Session::anonymous);
    let tab = use_state(|| Tab::Chat);
    let toast = use_mut_ref(LatestToast::new);
    let toast_seq = use_mut_ref(|| 0u64);
    let update = use_update();

    let on_notify = {
        let toast = toast.clone();
        let toast_seq = toast_seq.clone();
        let update = update.clone();
        Callback::from(move |notification: Notification| {
            toast.borrow().notify(notification);
            *toast_seq.borrow_mut() += 1;
            update();
        })
    };
    let on_dismiss = {
        let toast = toast.clone();
        let update = update.clone();
        Callback::from(move |_| {
            toast.borrow().dismiss();
            update();
        })
    };

    let on_sign_in = {
        let session = session.clone();
        let on_notify = on_notify.clone();
        Callback::from(move |user: User| {
            let mut next = (*session).clone();
            next.sign_in(user);
            on_notify.emit(Notification::info(format!("Welcome back, {}", next.display_name())));
            session.set(next);
        })
    };
    let on_sign_out = {
        let session = session.clone();
        Callback::from(move |_| {
            let mut next = (*session).clone();
            next.sign_out();
            session.set(next);
        })
    };

    let panel = match *tab {
        Tab::Chat => html! { <ChatWidget on_notify={on_notify.clone()} /> },
        Tab::Writer => html! { <WriterPanel on_notify={on_notify.clone()} /> },
        Tab::Teacher => html! { <TeacherPanel on_notify={on_notify.clone()} /> },
        Tab::Marketer => html! { <MarketerPanel on_notify={on_notify.clone()} /> },
        Tab::Builder => html! { <BuilderPanel on_notify={on_notify.clone()} /> },
    };
    let current_toast = toast.borrow().current();
    let toast_key = *toast_seq.borrow();

    html! {
        <div class="app">
            <header>
                <h1>{ "Echoverse" }</h1>
                <nav>
                    { for Tab::ALL.iter().map(|t| {
                        let tab = tab.clone();
                        let t = *t;
                        let class = if *tab == t { "tab tab-active" } else { "tab" };
                        html! {
                            <button {class} onclick={move |_| tab.set(t)}>{ t.label() }</button>
                        }
                    }) }
                </nav>
                <Account
                    session={(*session).clone()}
                    {on_sign_in}
                    {on_sign_out}
                    on_notify={on_notify.clone()}
                />
            </header>
            <main>{ panel }</main>
            if let Some(notification) = current_toast {
                <Toast key={toast_key.to_string()} {notification} {on_dismiss} />
            }
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
