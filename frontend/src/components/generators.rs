use std::str::FromStr;

use shared::{
    notify::Notification,
    submission::{Phase, Tool},
    tools::{ContentWriter, Marketer, ResultStore, Teacher, WebsiteBuilder},
    ContentType, EducationalType, MarketingType,
};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::{hooks::use_controller, rpc::ControllerHandle};

#[derive(Properties, PartialEq)]
pub struct GeneratorProps {
    pub on_notify: Callback<Notification>,
}

#[derive(Properties, PartialEq)]
struct PromptFormProps {
    placeholder: &'static str,
    draft: String,
    in_flight: bool,
    on_input: Callback<String>,
    on_submit: Callback<()>,
    #[prop_or_default]
    children: Children,
}

#[function_component]
fn PromptForm(props: &PromptFormProps) -> Html {
    let oninput = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            on_input.emit(textarea.value());
        })
    };
    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };
    let label = if props.in_flight { "Generating..." } else { "Generate" };

    html! {
        <form class="generator-form" {onsubmit}>
            { for props.children.iter() }
            <textarea
                rows="4"
                placeholder={props.placeholder}
                value={props.draft.clone()}
                {oninput}
            />
            <button type="submit" disabled={props.in_flight || props.draft.trim().is_empty()}>
                { label }
            </button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct KindSelectProps {
    options: Vec<(&'static str, &'static str)>,
    selected: &'static str,
    on_change: Callback<String>,
}

#[function_component]
fn KindSelect(props: &KindSelectProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(select.value());
        })
    };

    html! {
        <select {onchange}>
            { for props.options.iter().map(|(value, label)| html! {
                <option value={*value} selected={*value == props.selected}>{ *label }</option>
            }) }
        </select>
    }
}

/// Updates the tool option parsed from a select value; unknown values are ignored.
fn kind_setter<T, K>(handle: &ControllerHandle<T>, apply: fn(&mut T, K)) -> Callback<String>
where
    T: Tool + 'static,
    T::Request: 'static,
    T::Response: 'static,
    K: FromStr + 'static,
{
    let handle = handle.clone();
    Callback::from(move |value: String| {
        if let Ok(kind) = value.parse::<K>() {
            handle.update_tool(|tool| apply(tool, kind));
        }
    })
}

fn form_callbacks<T>(
    handle: &ControllerHandle<T>,
    on_notify: &Callback<Notification>,
) -> (Callback<String>, Callback<()>)
where
    T: Tool + 'static,
    T::Request: 'static,
    T::Response: 'static,
{
    let on_input = {
        let handle = handle.clone();
        Callback::from(move |draft: String| handle.set_draft(draft))
    };
    let on_submit = {
        let handle = handle.clone();
        let on_notify = on_notify.clone();
        Callback::from(move |_| handle.submit(on_notify.clone()))
    };

    (on_input, on_submit)
}

fn render_result(result: &ResultStore, phase: &Phase) -> Html {
    match (result.content(), phase) {
        (Some(content), _) => html! {
            <article class="generator-result">
                <pre>{ content }</pre>
                if let Some(at) = result.generated_at() {
                    <footer>{ format!("Generated at {}", at.format("%H:%M:%S")) }</footer>
                }
            </article>
        },
        (None, Phase::Submitting) => html! { <p class="generator-pending">{ "Generating..." }</p> },
        (None, _) => html! {},
    }
}

#[function_component]
pub fn WriterPanel(props: &GeneratorProps) -> Html {
    let writer = use_controller(ContentWriter::default);
    let (on_input, on_submit) = form_callbacks(&writer, &props.on_notify);
    let on_kind = kind_setter(&writer, |tool: &mut ContentWriter, kind: ContentType| tool.kind = kind);
    let on_context = {
        let writer = writer.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            writer.update_tool(|tool| tool.context = Some(input.value()));
        })
    };

    writer.read(|c| {
        let tool = c.tool();
        html! {
            <section class="generator generator-writer">
                <h2>{ "Content writer" }</h2>
                <PromptForm
                    placeholder="What should we write about?"
                    draft={c.draft().to_owned()}
                    in_flight={c.is_in_flight()}
                    {on_input}
                    {on_submit}
                >
                    <KindSelect
                        options={ContentType::ALL.iter().map(|k| (k.as_str(), k.label())).collect::<Vec<_>>()}
                        selected={tool.kind.as_str()}
                        on_change={on_kind}
                    />
                    <input
                        type="text"
                        placeholder="Context (optional)"
                        value={tool.context.clone().unwrap_or_default()}
                        oninput={on_context}
                    />
                </PromptForm>
                { render_result(&tool.result, c.phase()) }
            </section>
        }
    })
}

#[function_component]
pub fn TeacherPanel(props: &GeneratorProps) -> Html {
    let teacher = use_controller(Teacher::default);
    let (on_input, on_submit) = form_callbacks(&teacher, &props.on_notify);
    let on_kind = kind_setter(&teacher, |tool: &mut Teacher, kind: EducationalType| tool.kind = kind);
    let on_subject = {
        let teacher = teacher.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            teacher.update_tool(|tool| tool.subject = input.value());
        })
    };

    teacher.read(|c| {
        let tool = c.tool();
        html! {
            <section class="generator generator-teacher">
                <h2>{ "Teacher" }</h2>
                <PromptForm
                    placeholder="Which topic are you teaching?"
                    draft={c.draft().to_owned()}
                    in_flight={c.is_in_flight()}
                    {on_input}
                    {on_submit}
                >
                    <KindSelect
                        options={EducationalType::ALL.iter().map(|k| (k.as_str(), k.label())).collect::<Vec<_>>()}
                        selected={tool.kind.as_str()}
                        on_change={on_kind}
                    />
                    <input type="text" placeholder="Subject" value={tool.subject.clone()} oninput={on_subject} />
                </PromptForm>
                { render_result(&tool.result, c.phase()) }
            </section>
        }
    })
}

#[function_component]
pub fn MarketerPanel(props: &GeneratorProps) -> Html {
    let marketer = use_controller(Marketer::default);
    let (on_input, on_submit) = form_callbacks(&marketer, &props.on_notify);
    let on_kind = kind_setter(&marketer, |tool: &mut Marketer, kind: MarketingType| tool.kind = kind);

    marketer.read(|c| {
        let tool = c.tool();
        html! {
            <section class="generator generator-marketer">
                <h2>{ "Marketer" }</h2>
                <PromptForm
                    placeholder="Describe your product or campaign"
                    draft={c.draft().to_owned()}
                    in_flight={c.is_in_flight()}
                    {on_input}
                    {on_submit}
                >
                    <KindSelect
                        options={MarketingType::ALL.iter().map(|k| (k.as_str(), k.label())).collect::<Vec<_>>()}
                        selected={tool.kind.as_str()}
                        on_change={on_kind}
                    />
                </PromptForm>
                { render_result(&tool.result, c.phase()) }
            </section>
        }
    })
}

#[function_component]
pub fn BuilderPanel(props: &GeneratorProps) -> Html {
    let builder = use_controller(WebsiteBuilder::default);
    let (on_input, on_submit) = form_callbacks(&builder, &props.on_notify);

    builder.read(|c| {
        let result = &c.tool().result;
        html! {
            <section class="generator generator-builder">
                <h2>{ "Website builder" }</h2>
                <PromptForm
                    placeholder="Describe the website you want"
                    draft={c.draft().to_owned()}
                    in_flight={c.is_in_flight()}
                    {on_input}
                    {on_submit}
                />
                if let Some(html) = result.content() {
                    <iframe class="website-preview" title="Generated website" srcdoc={html.to_owned()} />
                }
                { render_result(result, c.phase()) }
            </section>
        }
    })
}
