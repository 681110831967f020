use std::sync::Arc;

use easel_client::PlatformClient;
use easel_config::Config;
use easel_core::{AgentStore, DropPayload};
use easel_engine::{AttachOutcome, DetachOutcome, Session};

use crate::args::{AttachArgs, CatalogArgs, DetachArgs, InspectArgs, ShowArgs};
use crate::output;

pub async fn show(config: &Config, args: &ShowArgs) -> anyhow::Result<()> {
    let mut session = open_session(config, args.agent).await?;

    let report = if args.no_discovery {
        None
    } else {
        Some(session.discover().await)
    };

    if args.json {
        let doc = output::GraphDoc::new(session.agent(), session.graph(), report.as_ref());
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        output::print_graph(session.agent(), session.graph());
        if let Some(report) = &report {
            output::print_report(report);
        }
    }
    Ok(())
}

pub async fn attach(config: &Config, args: &AttachArgs) -> anyhow::Result<()> {
    let client = Arc::new(build_client(config)?);
    let payload = resolve_payload(&client, args).await?;

    let store: Arc<dyn AgentStore> = client.clone();
    let mut session = Session::open(store, client, args.agent).await?;
    match session.attach(&payload).await? {
        AttachOutcome::Saved => println!("attached {} to agent {}", payload.label, args.agent),
        AttachOutcome::Duplicate => println!("already on the canvas: {}", payload.label),
    }
    Ok(())
}

pub async fn detach(config: &Config, args: &DetachArgs) -> anyhow::Result<()> {
    let mut session = open_session(config, args.agent).await?;

    let outcome = if let Some(node) = &args.node {
        session.detach_node(node).await?
    } else if let Some(edge) = &args.edge {
        session.detach_edge(edge).await?
    } else {
        anyhow::bail!("one of --node or --edge is required");
    };

    match outcome {
        DetachOutcome::Saved => println!("removed and saved"),
        DetachOutcome::RemovedLocally => {
            println!("removed from the canvas; discovered sub-tools are never persisted");
        }
        DetachOutcome::Protected => println!("that element is fixed and cannot be removed"),
    }
    Ok(())
}

pub async fn catalog(config: &Config, args: &CatalogArgs) -> anyhow::Result<()> {
    let client = build_client(config)?;

    let tools = client.tools().await?;
    let knowledge_bases = client.knowledge_bases().await?;

    if args.json {
        let doc = output::CatalogDoc { tools, knowledge_bases };
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        output::print_catalog(&tools, &knowledge_bases);
    }
    Ok(())
}

pub async fn inspect(config: &Config, args: &InspectArgs) -> anyhow::Result<()> {
    let client = build_client(config)?;

    let sub_tools = client.inspect_server(&args.url).await?;
    if sub_tools.is_empty() {
        println!("no sub-tools reported");
    } else {
        for sub_tool in &sub_tools {
            println!("{}", sub_tool.name);
        }
    }
    Ok(())
}

async fn open_session(config: &Config, agent_id: i64) -> anyhow::Result<Session> {
    let client = Arc::new(build_client(config)?);
    let store: Arc<dyn AgentStore> = client.clone();
    let session = Session::open(store, client, agent_id).await?;
    Ok(session)
}

fn build_client(config: &Config) -> anyhow::Result<PlatformClient> {
    let client = PlatformClient::new(
        config.platform.base_url.clone(),
        config.platform.credential(),
        config.platform.timeout(),
    )?;
    Ok(client)
}

/// Map the attach flags onto the drop payload the canvas accepts.
async fn resolve_payload(client: &PlatformClient, args: &AttachArgs) -> anyhow::Result<DropPayload> {
    if let Some(id) = args.tool {
        let tools = client.tools().await?;
        let tool = tools
            .iter()
            .find(|tool| tool.id == id)
            .ok_or_else(|| anyhow::anyhow!("tool {id} is not in the catalog"))?;
        return Ok(DropPayload::from_tool(tool));
    }

    if let Some(id) = args.knowledge_base {
        let knowledge_bases = client.knowledge_bases().await?;
        let knowledge_base = knowledge_bases
            .iter()
            .find(|kb| kb.id == id)
            .ok_or_else(|| anyhow::anyhow!("knowledge base {id} is not in the catalog"))?;
        return Ok(DropPayload::from_knowledge_base(knowledge_base));
    }

    if let Some(json) = &args.payload {
        let payload = serde_json::from_str(json)
            .map_err(|e| anyhow::anyhow!("invalid drop payload: {e}"))?;
        return Ok(payload);
    }

    anyhow::bail!("one of --tool, --knowledge-base, or --payload is required")
}
