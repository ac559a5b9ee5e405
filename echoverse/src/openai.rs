use miette::{Context, Diagnostic, IntoDiagnostic, Result};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use thiserror::Error;

use crate::APP_USER_AGENT;

pub mod completion;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Clone)]
pub struct Config {
    api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Error, Diagnostic, Debug)]
pub enum OpenAiError {
    #[error("request to the model API failed")]
    #[diagnostic(code(echoverse::openai::request))]
    Request(#[from] reqwest::Error),
    #[error("model API returned {status}: {body}")]
    #[diagnostic(code(echoverse::openai::status))]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("model API returned no choices")]
    #[diagnostic(code(echoverse::openai::empty))]
    NoChoices,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
        }
    }

    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .into_diagnostic()
            .wrap_err("Could not find OPENAI_API_KEY env var")?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn client(&self) -> Result<Client> {
        let mut headers = reqwest::header::HeaderMap::new();

        let value = format!("Bearer {}", self.api_key);
        let mut value = HeaderValue::from_str(&value)
            .into_diagnostic()
            .wrap_err("Could not create header value")?;
        value.set_sensitive(true);

        headers.insert(AUTHORIZATION, value);

        let http = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .default_headers(headers)
            .build()
            .into_diagnostic()
            .wrap_err("Could not build reqwest client")?;

        Ok(Client {
            http,
            base_url: self.base_url.trim_end_matches('/').to_owned(),
            model: self.model.clone(),
        })
    }
}

impl Client {
    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
