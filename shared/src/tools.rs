use chrono::{DateTime, Utc};

use crate::{
    routes,
    submission::{Controller, Tool},
    transcript::Transcript,
    ChatRequest, ChatResponse, ContentResponse, ContentType, EducationalRequest, EducationalType,
    GenerateRequest, MarketingRequest, MarketingType, Message, WebsiteRequest,
};

pub const CHAT_GREETING: &str = "Hi! I'm the Echoverse assistant. How can I help you today?";

pub type ChatController = Controller<ChatTool>;
pub type WriterController = Controller<ContentWriter>;
pub type TeacherController = Controller<Teacher>;
pub type MarketerController = Controller<Marketer>;
pub type BuilderController = Controller<WebsiteBuilder>;

/// Chat widget: echoes the user's message into the transcript right away and
/// appends the assistant reply once it arrives.
#[derive(Debug, Clone, Default)]
pub struct ChatTool {
    transcript: Transcript,
}

impl ChatTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_greeting() -> Self {
        Self {
            transcript: Transcript::with_greeting(CHAT_GREETING),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}

impl Tool for ChatTool {
    type Request = ChatRequest;
    type Response = ChatResponse;

    const ROUTE: &'static str = routes::CHAT;
    const FAILURE_DESCRIPTION: &'static str = "Failed to get a response. Please try again.";
    const CLEARS_DRAFT: bool = true;

    fn request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            message: prompt.to_owned(),
        }
    }

    fn on_submit(&mut self, prompt: &str) {
        self.transcript.push(Message::user(prompt));
    }

    fn on_success(&mut self, response: ChatResponse) {
        self.transcript.push(Message::assistant(response.response));
    }
}

/// The single latest output of a generator tool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultStore {
    content: Option<String>,
    generated_at: Option<DateTime<Utc>>,
}

impl ResultStore {
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }

    pub fn replace(&mut self, content: String) {
        self.content = Some(content);
        self.generated_at = Some(Utc::now());
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContentWriter {
    pub kind: ContentType,
    /// Extra background folded into the prompt, if any.
    pub context: Option<String>,
    pub result: ResultStore,
}

impl Tool for ContentWriter {
    type Request = GenerateRequest;
    type Response = ContentResponse;

    const ROUTE: &'static str = routes::GENERATE;
    const FAILURE_DESCRIPTION: &'static str = "Failed to generate content. Please try again.";

    fn request(&self, prompt: &str) -> GenerateRequest {
        GenerateRequest {
            prompt: prompt.to_owned(),
            kind: self.kind,
            context: self
                .context
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_owned),
        }
    }

    fn on_success(&mut self, response: ContentResponse) {
        self.result.replace(response.content);
    }
}

#[derive(Debug, Clone)]
pub struct Teacher {
    pub kind: EducationalType,
    pub subject: String,
    pub result: ResultStore,
}

impl Default for Teacher {
    fn default() -> Self {
        Self {
            kind: EducationalType::LessonPlan,
            subject: "General".to_owned(),
            result: ResultStore::default(),
        }
    }
}

impl Tool for Teacher {
    type Request = EducationalRequest;
    type Response = ContentResponse;

    const ROUTE: &'static str = routes::GENERATE_EDUCATIONAL;
    const FAILURE_DESCRIPTION: &'static str =
        "Failed to generate educational content. Please try again.";

    fn request(&self, prompt: &str) -> EducationalRequest {
        EducationalRequest {
            prompt: prompt.to_owned(),
            kind: self.kind,
            subject: self.subject.trim().to_owned(),
        }
    }

    fn on_success(&mut self, response: ContentResponse) {
        self.result.replace(response.content);
    }
}

#[derive(Debug, Clone)]
pub struct Marketer {
    pub kind: MarketingType,
    pub result: ResultStore,
}

impl Default for Marketer {
    fn default() -> Self {
        Self {
            kind: MarketingType::AdCopy,
            result: ResultStore::default(),
        }
    }
}

impl Tool for Marketer {
    type Request = MarketingRequest;
    type Response = ContentResponse;

    const ROUTE: &'static str = routes::GENERATE_MARKETING;
    const FAILURE_DESCRIPTION: &'static str =
        "Failed to generate marketing content. Please try again.";

    fn request(&self, prompt: &str) -> MarketingRequest {
        MarketingRequest {
            prompt: prompt.to_owned(),
            kind: self.kind,
        }
    }

    fn on_success(&mut self, response: ContentResponse) {
        self.result.replace(response.content);
    }
}

#[derive(Debug, Clone, Default)]
pub struct WebsiteBuilder {
    pub result: ResultStore,
}

impl Tool for WebsiteBuilder {
    type Request = WebsiteRequest;
    type Response = ContentResponse;

    const ROUTE: &'static str = routes::GENERATE_WEBSITE;
    const FAILURE_DESCRIPTION: &'static str = "Failed to generate website. Please try again.";

    fn request(&self, prompt: &str) -> WebsiteRequest {
        WebsiteRequest {
            prompt: prompt.to_owned(),
        }
    }

    fn on_success(&mut self, response: ContentResponse) {
        self.result.replace(response.content);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        notify::RecordingNotifier,
        submission::{Outcome, Rejected},
        testing::ScriptedTransport,
        Role,
    };

    #[tokio::test]
    async fn chat_hello_appends_user_then_assistant() {
        let transport = ScriptedTransport::new();
        transport.respond_ok(json!({ "response": "Hi there" }));
        let notifier = RecordingNotifier::new();
        let mut chat = ChatController::new(ChatTool::with_greeting());
        let initial = chat.tool().transcript().len();

        let request = chat.begin("Hello").unwrap();
        let echoed = chat.tool().transcript().last().unwrap();
        assert_eq!(echoed.role, Role::User);
        assert_eq!(echoed.content, "Hello");
        assert_eq!(chat.tool().transcript().len(), initial + 1);

        let response = crate::api::post_json(&transport, ChatTool::ROUTE, &request).await;
        assert_eq!(chat.finish(response, &notifier), Outcome::Succeeded);

        let transcript = chat.tool().transcript();
        assert_eq!(transcript.len(), initial + 2);
        let reply = transcript.last().unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "Hi there");
        assert!(!chat.is_in_flight());
        assert_eq!(transport.calls()[0].body, Some(json!({ "message": "Hello" })));
    }

    #[tokio::test]
    async fn empty_chat_message_changes_nothing() {
        let transport = ScriptedTransport::new();
        let notifier = RecordingNotifier::new();
        let mut chat = ChatController::new(ChatTool::new());

        let outcome = chat.submit("", &transport, &notifier).await;

        assert_eq!(outcome, Outcome::Skipped(Rejected::Empty));
        assert!(chat.tool().transcript().is_empty());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn chat_network_failure_keeps_only_the_echo() {
        let transport = ScriptedTransport::new();
        transport.fail_connection();
        let notifier = RecordingNotifier::new();
        let mut chat = ChatController::new(ChatTool::with_greeting());
        let initial = chat.tool().transcript().len();

        chat.submit("Hello", &transport, &notifier).await;

        assert_eq!(chat.tool().transcript().len(), initial + 1);
        assert_eq!(chat.tool().transcript().last().unwrap().content, "Hello");
        assert_eq!(notifier.destructive_count(), 1);
        assert_eq!(notifier.notifications().len(), 1);
    }

    #[tokio::test]
    async fn writer_replaces_previous_result_and_keeps_it_on_failure() {
        let transport = ScriptedTransport::new();
        transport.respond_ok(json!({ "content": "first draft" }));
        transport.respond_ok(json!({ "content": "second draft" }));
        transport.respond_err(json!({ "error": "upstream unavailable" }));
        let notifier = RecordingNotifier::new();
        let mut writer = WriterController::new(ContentWriter {
            kind: ContentType::Email,
            context: Some("  ".to_owned()),
            ..Default::default()
        });

        writer.submit("welcome email", &transport, &notifier).await;
        assert_eq!(writer.tool().result.content(), Some("first draft"));

        writer.submit("welcome email", &transport, &notifier).await;
        assert_eq!(writer.tool().result.content(), Some("second draft"));

        writer.submit("welcome email", &transport, &notifier).await;
        assert_eq!(writer.tool().result.content(), Some("second draft"));
        assert_eq!(notifier.destructive_count(), 1);

        // Blank context is dropped from the body.
        assert_eq!(
            transport.calls()[0].body,
            Some(json!({ "prompt": "welcome email", "type": "email" }))
        );
    }

    #[tokio::test]
    async fn teacher_sends_subject_and_type() {
        let transport = ScriptedTransport::new();
        transport.respond_ok(json!({ "content": "Quiz: ..." }));
        let notifier = RecordingNotifier::new();
        let mut teacher = TeacherController::new(Teacher {
            kind: EducationalType::Quiz,
            subject: " Chemistry ".to_owned(),
            ..Default::default()
        });

        teacher.submit("acids and bases", &transport, &notifier).await;

        let call = &transport.calls()[0];
        assert_eq!(call.route, routes::GENERATE_EDUCATIONAL);
        assert_eq!(
            call.body,
            Some(json!({ "prompt": "acids and bases", "type": "quiz", "subject": "Chemistry" }))
        );
        assert_eq!(teacher.tool().result.content(), Some("Quiz: ..."));
    }

    #[tokio::test]
    async fn marketer_and_builder_hit_their_routes() {
        let transport = ScriptedTransport::new();
        transport.respond_ok(json!({ "content": "Bake it till you make it" }));
        transport.respond_ok(json!({ "content": "<html></html>" }));
        let notifier = RecordingNotifier::new();

        let mut marketer = MarketerController::new(Marketer {
            kind: MarketingType::Slogan,
            ..Default::default()
        });
        marketer.submit("bakery", &transport, &notifier).await;

        let mut builder = BuilderController::new(WebsiteBuilder::default());
        builder.submit("bakery landing page", &transport, &notifier).await;

        let calls = transport.calls();
        assert_eq!(calls[0].route, routes::GENERATE_MARKETING);
        assert_eq!(calls[0].body, Some(json!({ "prompt": "bakery", "type": "slogan" })));
        assert_eq!(calls[1].route, routes::GENERATE_WEBSITE);
        assert_eq!(builder.tool().result.content(), Some("<html></html>"));
        assert!(builder.tool().result.generated_at().is_some());
    }
}
