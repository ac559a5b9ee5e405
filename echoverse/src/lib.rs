use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use crate::openai::completion::{CompletionRequest, CompletionResponse};
pub use crate::openai::{Client as OpenAiClient, Config, OpenAiError};
pub use crate::responder::{Generate, Responder, ResponderError};
pub use crate::transport::{HttpTransport, TransportError};

pub mod openai;
pub mod prompts;
pub mod responder;
pub mod transport;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Installs the `fmt` subscriber filtered by `RUST_LOG`, falling back to `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
