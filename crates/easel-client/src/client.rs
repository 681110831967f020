use std::time::Duration;

use async_trait::async_trait;
use easel_core::{
    Agent, AgentPatch, AgentStore, KnowledgeBase, McpInspector, PlatformError, SubTool, Tool,
};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::types::{InspectRequest, InspectResponse};

/// Async HTTP client for the agent platform API
#[derive(Clone)]
pub struct PlatformClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<SecretString>,
}

impl PlatformClient {
    /// Create a new platform client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(
        base_url: Url,
        api_key: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, PlatformError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    /// Fetch an agent's configuration
    ///
    /// GET `api/v1/agents/:agentId`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the platform rejects it
    pub async fn agent(&self, agent_id: i64) -> Result<Agent, PlatformError> {
        let url = self
            .base_url
            .join(&format!("api/v1/agents/{agent_id}"))
            .map_err(|e| PlatformError::Url(e.to_string()))?;

        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| PlatformError::Decode(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(PlatformError::Api { status, message })
        }
    }

    /// Replace one membership list on an agent
    ///
    /// PUT `api/v1/agents/:agentId`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the platform rejects it
    pub async fn update_agent(
        &self,
        agent_id: i64,
        patch: &AgentPatch,
    ) -> Result<Agent, PlatformError> {
        let url = self
            .base_url
            .join(&format!("api/v1/agents/{agent_id}"))
            .map_err(|e| PlatformError::Url(e.to_string()))?;

        let response = self
            .authorize(self.http.put(url))
            .json(patch)
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| PlatformError::Decode(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(PlatformError::Api { status, message })
        }
    }

    /// List the sub-tools an MCP server exposes
    ///
    /// POST `api/v1/mcp/inspect`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the platform rejects it
    pub async fn inspect_server(&self, server_url: &str) -> Result<Vec<SubTool>, PlatformError> {
        let url = self
            .base_url
            .join("api/v1/mcp/inspect")
            .map_err(|e| PlatformError::Url(e.to_string()))?;

        tracing::debug!(server = server_url, "inspecting MCP server");

        let body = InspectRequest {
            url: server_url.to_owned(),
        };
        let response = self
            .authorize(self.http.post(url))
            .json(&body)
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        if response.status().is_success() {
            let parsed: InspectResponse = response
                .json()
                .await
                .map_err(|e| PlatformError::Decode(e.to_string()))?;
            Ok(parsed.tools)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(PlatformError::Api { status, message })
        }
    }

    /// List the tool palette
    ///
    /// GET `api/v1/tools`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the platform rejects it
    pub async fn tools(&self) -> Result<Vec<Tool>, PlatformError> {
        let url = self
            .base_url
            .join("api/v1/tools")
            .map_err(|e| PlatformError::Url(e.to_string()))?;

        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| PlatformError::Decode(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(PlatformError::Api { status, message })
        }
    }

    /// List the knowledge-base palette
    ///
    /// GET `api/v1/knowledge-bases`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the platform rejects it
    pub async fn knowledge_bases(&self) -> Result<Vec<KnowledgeBase>, PlatformError> {
        let url = self
            .base_url
            .join("api/v1/knowledge-bases")
            .map_err(|e| PlatformError::Url(e.to_string()))?;

        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| PlatformError::Decode(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(PlatformError::Api { status, message })
        }
    }

    /// Attach the bearer credential when one is configured
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key.expose_secret()),
            None => request,
        }
    }
}

#[async_trait]
impl AgentStore for PlatformClient {
    async fn fetch_agent(&self, agent_id: i64) -> Result<Agent, PlatformError> {
        self.agent(agent_id).await
    }

    async fn update_agent(
        &self,
        agent_id: i64,
        patch: &AgentPatch,
    ) -> Result<Agent, PlatformError> {
        // Inherent method of the same name; resolution prefers it.
        Self::update_agent(self, agent_id, patch).await
    }

    async fn list_tools(&self) -> Result<Vec<Tool>, PlatformError> {
        self.tools().await
    }

    async fn list_knowledge_bases(&self) -> Result<Vec<KnowledgeBase>, PlatformError> {
        self.knowledge_bases().await
    }
}

#[async_trait]
impl McpInspector for PlatformClient {
    async fn inspect(&self, url: &str) -> Result<Vec<SubTool>, PlatformError> {
        self.inspect_server(url).await
    }
}

impl std::fmt::Debug for PlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
