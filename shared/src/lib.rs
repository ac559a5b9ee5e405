use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::prompt_not_blank;

pub mod api;
pub mod message;
pub mod notify;
pub mod routes;
pub mod session;
pub mod submission;
pub mod tools;
pub mod transcript;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use message::{Message, Role};

/// Declares a kebab-case wire enum with a human label per variant.
macro_rules! wire_kind {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => ($wire:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownKind;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownKind {
                        kind: stringify!($name),
                        value: other.to_owned(),
                        expected: vec![$($wire),+],
                    }),
                }
            }
        }
    };
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} `{value}`, expected one of: {}", .expected.join(", "))]
pub struct UnknownKind {
    pub kind: &'static str,
    pub value: String,
    pub expected: Vec<&'static str>,
}

wire_kind! {
    /// Output formats of the general content writer.
    pub enum ContentType {
        BlogPost => ("blog-post", "Blog post"),
        Article => ("article", "Article"),
        SocialMedia => ("social-media", "Social media post"),
        Email => ("email", "Email"),
        ProductDescription => ("product-description", "Product description"),
        AdCopy => ("ad-copy", "Ad copy"),
    }
}

impl Default for ContentType {
    fn default() -> Self {
        ContentType::BlogPost
    }
}

wire_kind! {
    pub enum EducationalType {
        LessonPlan => ("lesson-plan", "Lesson plan"),
        Quiz => ("quiz", "Quiz"),
        Worksheet => ("worksheet", "Worksheet"),
        Explanation => ("explanation", "Explanation"),
        Summary => ("summary", "Summary"),
    }
}

wire_kind! {
    pub enum MarketingType {
        AdCopy => ("ad-copy", "Ad copy"),
        EmailCampaign => ("email-campaign", "Email campaign"),
        SocialPost => ("social-post", "Social post"),
        Slogan => ("slogan", "Slogan"),
        LandingPage => ("landing-page", "Landing page"),
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Validate)]
pub struct ChatRequest {
    #[validate(
        custom(function = "prompt_not_blank"),
        length(max = 4000, message = "Prompt must be at most 4000 characters")
    )]
    pub message: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Validate)]
pub struct GenerateRequest {
    #[validate(
        custom(function = "prompt_not_blank"),
        length(max = 4000, message = "Prompt must be at most 4000 characters")
    )]
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 4000, message = "Context must be at most 4000 characters"))]
    pub context: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Validate)]
pub struct EducationalRequest {
    #[validate(
        custom(function = "prompt_not_blank"),
        length(max = 4000, message = "Prompt must be at most 4000 characters")
    )]
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: EducationalType,
    #[validate(length(max = 50, message = "Subject must be at most 50 characters"))]
    pub subject: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Validate)]
pub struct MarketingRequest {
    #[validate(
        custom(function = "prompt_not_blank"),
        length(max = 4000, message = "Prompt must be at most 4000 characters")
    )]
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: MarketingType,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Validate)]
pub struct WebsiteRequest {
    #[validate(
        custom(function = "prompt_not_blank"),
        length(max = 4000, message = "Prompt must be at most 4000 characters")
    )]
    pub prompt: String,
}

/// Body returned by every generator route.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ContentResponse {
    pub content: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
