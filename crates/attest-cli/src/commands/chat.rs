use anyhow::Context;
use attest_check::{SearchScope, SourceQuery, SourceUsage, match_source_usage};
use attest_client::ApiClient;
use attest_config::AttestConfig;
use attest_core::ChatRequestPayload;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ChatArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ChatReport {
    session_id: i64,
    answer: String,
    citations: usize,
    chunks: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_usage: Option<SourceUsage>,
}

pub async fn handle(
    args: &ChatArgs,
    client: &ApiClient,
    config: &AttestConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let model = args
        .model
        .clone()
        .filter(|m| !m.is_empty())
        .or_else(|| config.chat.is_configured().then(|| config.chat.model.clone()))
        .context("no chat model: pass --model or set chat.model")?;

    let include_answer_log = config.chat.include_answer_log && !args.no_answer_log;
    let scope = SearchScope::from(args.scope);
    if !include_answer_log && scope.includes_chunks() && args.source.is_some() {
        tracing::warn!(%scope, "answerLog not requested; chunk matching will see no chunks");
    }

    let mut payload = ChatRequestPayload::new(&args.query, model).with_answer_log(include_answer_log);
    if let Some(session_id) = args.session_id {
        payload = payload.with_session_id(session_id);
    }

    let response = client.send_chat(&payload).await?;

    let usage = args.source.as_ref().map(|source| {
        let query = SourceQuery::new(source.as_str())
            .with_external_ids(args.external_ids.iter().cloned())
            .match_all(args.match_all)
            .with_scope(scope);
        match_source_usage(&response, &query)
    });

    let (source_usage, failure) = match usage {
        Some(Ok(usage)) => (Some(usage), None),
        Some(Err(error)) => (None, Some(error)),
        None => (None, None),
    };

    let report = ChatReport {
        session_id: response.session_id,
        answer: response.answer.clone(),
        citations: response.citations.len(),
        chunks: response.retrieval_chunks().len(),
        source_usage,
    };
    output(&report, flags.format)?;

    match failure {
        Some(error) => Err(error).context("source usage validation failed"),
        None => Ok(()),
    }
}
