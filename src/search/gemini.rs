// Gemini generateContent client
use crate::config::DEFAULT_API_BASE_URL;
use crate::model::{GeminiError, GenerationReply, GenerationRequest, ImagePayload};
use crate::search::traits::GenerativeSearch;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) ArkhosBot/0.1";

// ---- request body ----

#[derive(Debug, Serialize)]
struct GenerateContentBody<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    #[serde(rename_all = "camelCase")]
    InlineData { inline_data: InlineData<'a> },
    Text { text: &'a str },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

// ---- response body ----

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    uri: Option<String>,
}

fn build_body(req: &GenerationRequest) -> GenerateContentBody<'_> {
    let mut parts = Vec::with_capacity(2);
    if let Some(ImagePayload { mime_type, data }) = &req.image {
        parts.push(RequestPart::InlineData {
            inline_data: InlineData { mime_type, data },
        });
    }
    parts.push(RequestPart::Text { text: &req.prompt });

    let tools = if req.web_search {
        vec![Tool {
            google_search: GoogleSearch {},
        }]
    } else {
        Vec::new()
    };

    GenerateContentBody {
        contents: vec![RequestContent { role: "user", parts }],
        tools,
    }
}

/// Text of the first candidate plus its web citations. No candidate means an empty reply.
fn into_reply(response: GenerateContentResponse) -> GenerationReply {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return GenerationReply::default();
    };

    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .filter(|p| !p.thought)
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    let citation_uris = candidate
        .grounding_metadata
        .map(|m| {
            m.grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web.and_then(|w| w.uri))
                .collect()
        })
        .unwrap_or_default();

    GenerationReply {
        text,
        citation_uris,
    }
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str, timeout: Option<Duration>) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, model, timeout, DEFAULT_API_BASE_URL)
    }

    /// Same as [`GeminiClient::new`] but against another host (a mock server in tests).
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout: Option<Duration>,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        // Exactly one trailing slash so `join` appends instead of replacing the last segment.
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> Result<Url, GeminiError> {
        let path = format!("v1beta/models/{}:generateContent", self.model);
        Ok(self.base_url.join(&path)?)
    }
}

#[async_trait::async_trait]
impl GenerativeSearch for GeminiClient {
    async fn generate(&self, req: &GenerationRequest) -> Result<GenerationReply, GeminiError> {
        let url = self.endpoint()?;
        let body = build_body(req);
        info!(
            "Calling {} (image: {}, web search: {})",
            self.model,
            req.image.is_some(),
            req.web_search
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warn!("Gemini API responded [{}]", status);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
        let reply = into_reply(parsed);
        debug!(
            "Gemini reply: {} chars, {} citations",
            reply.text.len(),
            reply.citation_uris.len()
        );
        Ok(reply)
    }
}
