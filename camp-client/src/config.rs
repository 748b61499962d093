//! Client configuration

/// Default generative-AI endpoint
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Configuration shared by the collaborator clients
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Basket URL, e.g. `https://getpantry.cloud/apiv1/pantry/{id}`
    pub basket_url: Option<String>,

    /// API key for the generative-AI service
    pub gemini_api_key: Option<String>,

    /// Generative-AI base URL
    pub gemini_base_url: String,

    /// Model for text endpoints
    pub text_model: String,

    /// Model for the occupancy-sheet (vision) endpoint
    pub vision_model: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            basket_url: None,
            gemini_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            text_model: "gemini-3-flash-preview".to_string(),
            vision_model: "gemini-2.5-flash".to_string(),
            timeout: 30,
        }
    }
}

impl ClientConfig {
    pub fn with_basket_url(mut self, url: impl Into<String>) -> Self {
        self.basket_url = Some(url.into());
        self
    }

    pub fn with_gemini_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(key.into());
        self
    }

    pub fn with_gemini_base_url(mut self, url: impl Into<String>) -> Self {
        self.gemini_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = secs;
        self
    }
}
