pub const CHAT: &str = "/api/ai/chat";
pub const GENERATE: &str = "/api/ai/generate";
pub const GENERATE_EDUCATIONAL: &str = "/api/ai/generate-educational";
pub const GENERATE_MARKETING: &str = "/api/ai/generate-marketing";
pub const GENERATE_WEBSITE: &str = "/api/ai/generate-website";
pub const REGISTER: &str = "/register";
pub const LOGIN: &str = "/login";
pub const HEALTH: &str = "/health";
