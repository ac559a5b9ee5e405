//! System instructions and user-turn assembly for each tool.

use indoc::{formatdoc, indoc};
use shared::{
    ContentType, EducationalRequest, EducationalType, GenerateRequest, MarketingRequest,
    MarketingType, WebsiteRequest,
};

pub const CHAT_SYSTEM: &str = indoc! {"
    You are the Echoverse assistant, a friendly helper inside a content
    creation platform. Answer clearly and concisely. When the user asks for
    content, produce it directly without preamble.
"};

pub const WEBSITE_SYSTEM: &str = indoc! {"
    You are an expert web designer. Produce a single, complete HTML5 document
    with embedded CSS and no external assets. Use semantic markup and a
    responsive layout. Reply with the HTML only, no explanations and no
    markdown fences.
"};

pub fn content_system(kind: ContentType) -> String {
    let guidance = match kind {
        ContentType::BlogPost => "Write an engaging blog post with a title, headed sections and a conclusion.",
        ContentType::Article => "Write a well-structured, informative article with an objective tone.",
        ContentType::SocialMedia => "Write a short social media post with a hook and relevant hashtags.",
        ContentType::Email => "Write a professional email with a subject line, greeting, body and sign-off.",
        ContentType::ProductDescription => "Write a persuasive product description that leads with benefits.",
        ContentType::AdCopy => "Write punchy ad copy with a headline and a clear call to action.",
    };

    formatdoc! {"
        You are a professional content writer.
        {guidance}
        Format the result in Markdown.
    "}
}

pub fn educational_system(kind: EducationalType, subject: &str) -> String {
    let guidance = match kind {
        EducationalType::LessonPlan => {
            "Create a lesson plan with objectives, materials, activities, timing and assessment."
        }
        EducationalType::Quiz => {
            "Create a quiz of ten questions mixing multiple choice and short answer, followed by an answer key."
        }
        EducationalType::Worksheet => {
            "Create a printable worksheet with instructions and graded practice exercises."
        }
        EducationalType::Explanation => {
            "Explain the topic step by step with examples suited to the learner's level."
        }
        EducationalType::Summary => "Summarize the topic into concise key points and a short recap.",
    };

    formatdoc! {"
        You are an experienced {subject} teacher.
        {guidance}
        Format the result in Markdown.
    "}
}

pub fn marketing_system(kind: MarketingType) -> String {
    let guidance = match kind {
        MarketingType::AdCopy => "Write three ad copy variants, each with a headline and call to action.",
        MarketingType::EmailCampaign => "Write a marketing email with a subject line, preview text and body.",
        MarketingType::SocialPost => "Write social posts tailored for Twitter, LinkedIn and Instagram.",
        MarketingType::Slogan => "Suggest ten short, memorable slogans.",
        MarketingType::LandingPage => {
            "Write landing page copy: hero headline, subheadline, benefits, social proof and call to action."
        }
    };

    formatdoc! {"
        You are a senior marketing copywriter.
        {guidance}
        Format the result in Markdown.
    "}
}

/// Returns the system instruction and user turn for a general content request.
pub fn content(req: &GenerateRequest) -> (String, String) {
    let prompt = match req.context.as_deref().map(str::trim) {
        Some(context) if !context.is_empty() => formatdoc! {"
            {prompt}

            Additional context:
            {context}
        ", prompt = req.prompt.trim()},
        _ => req.prompt.trim().to_owned(),
    };

    (content_system(req.kind), prompt)
}

pub fn educational(req: &EducationalRequest) -> (String, String) {
    let subject = match req.subject.trim() {
        "" => "general studies",
        subject => subject,
    };

    (
        educational_system(req.kind, subject),
        format!("Topic: {}", req.prompt.trim()),
    )
}

pub fn marketing(req: &MarketingRequest) -> (String, String) {
    (marketing_system(req.kind), req.prompt.trim().to_owned())
}

pub fn website(req: &WebsiteRequest) -> (String, String) {
    (
        WEBSITE_SYSTEM.to_owned(),
        format!("Build a website for: {}", req.prompt.trim()),
    )
}

/// Strips a surrounding markdown code fence, which models add despite instructions.
pub fn strip_code_fence(output: &str) -> &str {
    let trimmed = output.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    match body.split_once('\n') {
        Some((_lang, body)) => body.trim(),
        None => body.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_folds_in_context() {
        let (system, prompt) = content(&GenerateRequest {
            prompt: " Launch post ".to_owned(),
            kind: ContentType::BlogPost,
            context: Some("We sell handmade candles.".to_owned()),
        });

        assert!(system.contains("blog post"));
        assert!(prompt.starts_with("Launch post"));
        assert!(prompt.contains("Additional context:\nWe sell handmade candles."));
    }

    #[test]
    fn content_without_context_is_just_the_prompt() {
        let (_, prompt) = content(&GenerateRequest {
            prompt: "Launch post".to_owned(),
            kind: ContentType::Article,
            context: Some("   ".to_owned()),
        });

        assert_eq!(prompt, "Launch post");
    }

    #[test]
    fn educational_names_the_subject() {
        let (system, prompt) = educational(&EducationalRequest {
            prompt: "fractions".to_owned(),
            kind: EducationalType::Quiz,
            subject: "Math".to_owned(),
        });

        assert!(system.starts_with("You are an experienced Math teacher."));
        assert!(system.contains("answer key"));
        assert_eq!(prompt, "Topic: fractions");
    }

    #[test]
    fn blank_subject_falls_back() {
        let (system, _) = educational(&EducationalRequest {
            prompt: "fractions".to_owned(),
            kind: EducationalType::Summary,
            subject: " ".to_owned(),
        });

        assert!(system.contains("general studies teacher"));
    }

    #[test]
    fn code_fences_are_removed() {
        assert_eq!(strip_code_fence("```html\n<p>hi</p>\n```"), "<p>hi</p>");
        assert_eq!(strip_code_fence("  <p>hi</p> "), "<p>hi</p>");
        assert_eq!(strip_code_fence("```unterminated"), "```unterminated");
    }
}
