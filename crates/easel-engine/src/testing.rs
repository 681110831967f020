//! Recording fakes shared by the session and discovery tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use easel_core::{
    Agent, AgentPatch, AgentStore, KnowledgeBase, McpInspector, PlatformError, SubTool, Tool,
    ToolType,
};

/// Starting agent: two knowledge bases and one MCP tool
pub(crate) fn agent_fixture() -> Agent {
    Agent {
        id: 1,
        name: "Support".to_owned(),
        tools: vec![mcp_tool(7, "https://x")],
        knowledge_bases: vec![
            KnowledgeBase {
                id: 1,
                name: "Docs".to_owned(),
            },
            KnowledgeBase {
                id: 2,
                name: "FAQ".to_owned(),
            },
        ],
        tool_ids: vec![7],
        knowledge_base_ids: vec![1, 2],
        provider: None,
        model: None,
    }
}

pub(crate) fn mcp_tool(id: i64, url: &str) -> Tool {
    Tool {
        id,
        name: format!("Tool {id}"),
        tool_type: ToolType::Mcp,
        mcp_server_url: Some(url.to_owned()),
    }
}

/// In-memory store that records calls and applies patches the way the
/// platform does: it replaces the id list and re-expands the object list
/// from its catalog
pub(crate) struct FakeStore {
    agent: Mutex<Agent>,
    tool_catalog: Mutex<Vec<Tool>>,
    knowledge_catalog: Mutex<Vec<KnowledgeBase>>,
    updates: Mutex<Vec<AgentPatch>>,
    fetches: AtomicU32,
    fail_updates: AtomicBool,
}

impl FakeStore {
    pub(crate) fn new(agent: Agent) -> Arc<Self> {
        Arc::new(Self {
            tool_catalog: Mutex::new(agent.tools.clone()),
            knowledge_catalog: Mutex::new(agent.knowledge_bases.clone()),
            agent: Mutex::new(agent),
            updates: Mutex::new(Vec::new()),
            fetches: AtomicU32::new(0),
            fail_updates: AtomicBool::new(false),
        })
    }

    /// Extra palette entries the store can expand ids against
    pub(crate) fn with_tool_catalog(self: Arc<Self>, tools: Vec<Tool>) -> Arc<Self> {
        self.tool_catalog.lock().unwrap().extend(tools);
        self
    }

    pub(crate) fn with_knowledge_catalog(self: Arc<Self>, kbs: Vec<KnowledgeBase>) -> Arc<Self> {
        self.knowledge_catalog.lock().unwrap().extend(kbs);
        self
    }

    pub(crate) fn updates(&self) -> Vec<AgentPatch> {
        self.updates.lock().unwrap().clone()
    }

    pub(crate) fn fetch_count(&self) -> u32 {
        self.fetches.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }

    /// Replace what the next fetch returns
    pub(crate) fn set_agent(&self, agent: Agent) {
        *self.agent.lock().unwrap() = agent;
    }
}

#[async_trait]
impl AgentStore for FakeStore {
    async fn fetch_agent(&self, _agent_id: i64) -> Result<Agent, PlatformError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.agent.lock().unwrap().clone())
    }

    async fn update_agent(
        &self,
        _agent_id: i64,
        patch: &AgentPatch,
    ) -> Result<Agent, PlatformError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(PlatformError::Api {
                status: 500,
                message: "update rejected".to_owned(),
            });
        }
        self.updates.lock().unwrap().push(patch.clone());

        let mut agent = self.agent.lock().unwrap();
        if let Some(ids) = &patch.tool_ids {
            agent.tool_ids.clone_from(ids);
            let catalog = self.tool_catalog.lock().unwrap();
            agent.tools = ids
                .iter()
                .filter_map(|id| catalog.iter().find(|t| t.id == *id).cloned())
                .collect();
        }
        if let Some(ids) = &patch.knowledge_base_ids {
            agent.knowledge_base_ids.clone_from(ids);
            let catalog = self.knowledge_catalog.lock().unwrap();
            agent.knowledge_bases = ids
                .iter()
                .filter_map(|id| catalog.iter().find(|kb| kb.id == *id).cloned())
                .collect();
        }
        Ok(agent.clone())
    }

    async fn list_tools(&self) -> Result<Vec<Tool>, PlatformError> {
        Ok(self.tool_catalog.lock().unwrap().clone())
    }

    async fn list_knowledge_bases(&self) -> Result<Vec<KnowledgeBase>, PlatformError> {
        Ok(self.knowledge_catalog.lock().unwrap().clone())
    }
}

/// Inspector with programmed per-URL responses; unprogrammed URLs answer
/// with an empty tool list
#[derive(Default)]
pub(crate) struct FakeInspector {
    responses: Mutex<HashMap<String, Result<Vec<SubTool>, String>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeInspector {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn with_tools(self: Arc<Self>, url: &str, names: &[&str]) -> Arc<Self> {
        let tools = names
            .iter()
            .map(|name| SubTool {
                name: (*name).to_owned(),
            })
            .collect();
        self.responses.lock().unwrap().insert(url.to_owned(), Ok(tools));
        self
    }

    pub(crate) fn with_failure(self: Arc<Self>, url: &str, message: &str) -> Arc<Self> {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_owned(), Err(message.to_owned()));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl McpInspector for FakeInspector {
    async fn inspect(&self, url: &str) -> Result<Vec<SubTool>, PlatformError> {
        self.calls.lock().unwrap().push(url.to_owned());
        match self.responses.lock().unwrap().get(url) {
            Some(Ok(tools)) => Ok(tools.clone()),
            Some(Err(message)) => Err(PlatformError::Api {
                status: 502,
                message: message.clone(),
            }),
            None => Ok(Vec::new()),
        }
    }
}
