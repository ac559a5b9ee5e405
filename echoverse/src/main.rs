use clap::{Args, Parser, Subcommand};
use echoverse::HttpTransport;
use miette::{IntoDiagnostic, Result};
use shared::{
    api::{Api, ClientError},
    notify::{Notification, Notifier},
    session::{Session, User},
    submission::{Controller, Outcome, Rejected, Tool},
    tools::{
        BuilderController, ChatController, ChatTool, ContentWriter, Marketer, Teacher,
        WebsiteBuilder,
    },
    validation::{check, LoginRequest, RegisterRequest, ValidationErrors},
    ContentType, EducationalType, MarketingType, Role,
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(author, version, about = "Talk to an Echoverse server from the terminal")]
struct Cli {
    /// Base URL of the Echoverse server
    #[arg(long, env = "ECHOVERSE_SERVER", default_value = "http://localhost:3000", global = true)]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive chat with the assistant
    Chat,
    /// Write general content
    Generate(GenerateArgs),
    /// Create educational material
    Teach(TeachArgs),
    /// Write marketing copy
    Market(MarketArgs),
    /// Generate a single-page website
    Website(WebsiteArgs),
    Register(RegisterArgs),
    Login(LoginArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long = "type", default_value_t = ContentType::BlogPost)]
    kind: ContentType,
    #[arg(long)]
    context: Option<String>,
    prompt: String,
}

#[derive(Args, Debug)]
struct TeachArgs {
    #[arg(long = "type", default_value_t = EducationalType::LessonPlan)]
    kind: EducationalType,
    #[arg(long, default_value = "General")]
    subject: String,
    prompt: String,
}

#[derive(Args, Debug)]
struct MarketArgs {
    #[arg(long = "type", default_value_t = MarketingType::AdCopy)]
    kind: MarketingType,
    prompt: String,
}

#[derive(Args, Debug)]
struct WebsiteArgs {
    /// Write the HTML here instead of stdout
    #[arg(long)]
    out: Option<std::path::PathBuf>,
    prompt: String,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
}

/// Prints notifications to stderr.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match notification.description {
            Some(description) => eprintln!("{}: {}", notification.title, description),
            None => eprintln!("{}", notification.title),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    echoverse::init_tracing("warn");

    let cli = Cli::parse();
    let transport = HttpTransport::new(&cli.server).into_diagnostic()?;
    let mut session = Session::anonymous();

    match cli.command {
        Command::Chat => chat(&transport).await,
        Command::Generate(args) => {
            let writer = ContentWriter {
                kind: args.kind,
                context: args.context,
                ..Default::default()
            };
            let writer = run_once(Controller::new(writer), &args.prompt, &transport).await?;
            print_result(writer.tool().result.content());
            Ok(())
        }
        Command::Teach(args) => {
            let teacher = Teacher {
                kind: args.kind,
                subject: args.subject,
                ..Default::default()
            };
            let teacher = run_once(Controller::new(teacher), &args.prompt, &transport).await?;
            print_result(teacher.tool().result.content());
            Ok(())
        }
        Command::Market(args) => {
            let marketer = Marketer {
                kind: args.kind,
                ..Default::default()
            };
            let marketer = run_once(Controller::new(marketer), &args.prompt, &transport).await?;
            print_result(marketer.tool().result.content());
            Ok(())
        }
        Command::Website(args) => {
            let builder: BuilderController =
                run_once(Controller::new(WebsiteBuilder::default()), &args.prompt, &transport)
                    .await?;
            match (args.out, builder.tool().result.content()) {
                (Some(out), Some(html)) => {
                    tokio::fs::write(&out, html).await.into_diagnostic()?;
                    println!("Wrote {}", out.display());
                }
                (None, content) => print_result(content),
                (Some(_), None) => {}
            }
            Ok(())
        }
        Command::Register(args) => register(args, &transport).await,
        Command::Login(args) => login(args, &transport, &mut session).await,
    }
}

async fn register(args: RegisterArgs, transport: &HttpTransport) -> Result<()> {
    const FIELDS: &[&str] = &["name", "email", "password"];

    let req = RegisterRequest {
        name: args.name,
        email: args.email.trim().to_owned(),
        password: args.password,
    };
    if let Err(errors) = check(&req) {
        print_field_errors(&errors, FIELDS);
        return Err(miette::miette!("registration details are invalid"));
    }

    match transport.register(&req).await {
        Ok(resp) => {
            println!("{}", resp.message);
            Ok(())
        }
        Err(err) => report_account_error(err, FIELDS),
    }
}

async fn login(args: LoginArgs, transport: &HttpTransport, session: &mut Session) -> Result<()> {
    const FIELDS: &[&str] = &["email", "password"];

    let req = LoginRequest {
        email: args.email.trim().to_owned(),
        password: args.password,
    };
    if let Err(errors) = check(&req) {
        print_field_errors(&errors, FIELDS);
        return Err(miette::miette!("login details are invalid"));
    }

    match transport.login(&req).await {
        Ok(resp) => {
            let name = req.email.split('@').next().unwrap_or_default();
            session.sign_in(User::new(name, req.email.as_str()));
            println!("{} Signed in as {}.", resp.message, session.display_name());
            Ok(())
        }
        Err(err) => report_account_error(err, FIELDS),
    }
}

async fn chat(transport: &HttpTransport) -> Result<()> {
    let mut chat = ChatController::new(ChatTool::with_greeting());
    let notifier = TerminalNotifier;
    let mut printed = 0;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        for message in &chat.tool().transcript().messages()[printed..] {
            if message.role == Role::Assistant {
                println!("assistant> {}\n", message.content);
            }
        }
        printed = chat.tool().transcript().len();

        eprint!("you> ");
        let Some(line) = lines.next_line().await.into_diagnostic()? else {
            break;
        };
        if matches!(line.trim(), "/quit" | "/exit") {
            break;
        }

        chat.submit(&line, transport, &notifier).await;
    }

    Ok(())
}

async fn run_once<T: Tool>(
    mut controller: Controller<T>,
    prompt: &str,
    transport: &HttpTransport,
) -> Result<Controller<T>> {
    match controller.submit(prompt, transport, &TerminalNotifier).await {
        Outcome::Succeeded => Ok(controller),
        Outcome::Skipped(Rejected::Empty) => Err(miette::miette!("prompt must not be empty")),
        Outcome::Skipped(rejected) => Err(miette::miette!("{rejected}")),
        Outcome::Failed(reason) => Err(miette::miette!("generation failed: {reason}")),
    }
}

fn print_result(content: Option<&str>) {
    if let Some(content) = content {
        println!("{content}");
    }
}

fn print_field_errors(errors: &ValidationErrors, fields: &[&str]) {
    for field in fields {
        for message in errors.for_field(field) {
            eprintln!("  {field}: {message}");
        }
    }
}

/// Prints what the server rejected, then fails.
fn report_account_error<E>(err: ClientError<serde_json::Value, E>, fields: &[&str]) -> Result<()>
where
    E: std::error::Error + Send + Sync + 'static,
{
    match err {
        ClientError::Api(body) => {
            match serde_json::from_value::<ValidationErrors>(body.clone()) {
                Ok(errors) => print_field_errors(&errors, fields),
                Err(_) => eprintln!("Request rejected: {body}"),
            }
            Err(miette::miette!("the server rejected the request"))
        }
        other => Err(miette::miette!("{other}")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared::routes;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    fn login_args(email: &str, password: &str) -> LoginArgs {
        LoginArgs {
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }

    #[tokio::test]
    async fn invalid_login_fails_before_sending() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;
        let transport = HttpTransport::new(mock_server.uri()).unwrap();
        let mut session = Session::anonymous();

        let result = login(login_args("ada", ""), &transport, &mut session).await;

        assert!(result.is_err());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn rejected_register_fails() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(routes::REGISTER))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": [{ "field": "email", "message": "Email already registered" }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        let transport = HttpTransport::new(mock_server.uri()).unwrap();
        let args = RegisterArgs {
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "analytical".to_owned(),
        };

        assert!(register(args, &transport).await.is_err());
    }

    #[tokio::test]
    async fn accepted_login_signs_in() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(routes::LOGIN))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": "Login successful" })),
            )
            .mount(&mock_server)
            .await;
        let transport = HttpTransport::new(mock_server.uri()).unwrap();
        let mut session = Session::anonymous();

        login(login_args(" ada@example.com ", "analytical"), &transport, &mut session)
            .await
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.display_name(), "ada");
    }
}
