//! Multi-source chat composition: web search first, completion second.
//!
//! A two-stage fallback chain, not a merge — exactly one of the two
//! sources supplies the final answer text. The web-search call, when
//! requested, strictly precedes and gates the completion call; they are
//! never issued concurrently. One shared implementation, parameterized
//! by citation mode, serves every caller.

use serde::Serialize;

use crate::normalize::APOLOGY;
use crate::upstream::{search, CompletionClient, SearchClient, UpstreamError};

const GENERAL_SYSTEM_PROMPT: &str = "You are an experienced UPSC mentor. Answer the \
    aspirant's question accurately and concisely, covering the dimensions a General \
    Studies answer would need. Say so plainly when you are not certain.";

const CITATION_SYSTEM_PROMPT: &str = "You are an experienced UPSC mentor. Answer the \
    aspirant's question accurately and concisely, covering the dimensions a General \
    Studies answer would need. Attribute every factual claim to its source in square \
    brackets, e.g. [The Hindu] or [PIB]. Say so plainly when you are not certain.";

/// Which stage of the chain supplied the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    WebSearch,
    Llm,
}

#[derive(Debug, Serialize)]
pub struct ComposedAnswer {
    pub answer: String,
    pub source: AnswerSource,
    pub sources_used: Vec<String>,
}

pub fn system_prompt(citations: bool) -> &'static str {
    if citations {
        CITATION_SYSTEM_PROMPT
    } else {
        GENERAL_SYSTEM_PROMPT
    }
}

/// Run the fallback chain for one question.
///
/// If `use_web_search` and the search upstream returns a usable
/// (non-blank) `answer`, that answer wins and the completion backend is
/// never invoked. A disabled, failed or empty search falls through to
/// the completion call.
pub async fn compose_answer(
    search_client: &SearchClient,
    llm: &CompletionClient,
    query: &str,
    use_web_search: bool,
    citations: bool,
) -> Result<ComposedAnswer, UpstreamError> {
    if use_web_search {
        match search_client
            .web_search(query, &search::default_sources())
            .await
        {
            Ok(result) => {
                let answer = result["answer"].as_str().unwrap_or_default();
                if !answer.trim().is_empty() {
                    let sources_used = result["sources_used"]
                        .as_array()
                        .map(|arr| {
                            arr.iter()
                                .filter_map(|v| v.as_str().map(str::to_string))
                                .collect()
                        })
                        .unwrap_or_default();

                    return Ok(ComposedAnswer {
                        answer: answer.to_string(),
                        source: AnswerSource::WebSearch,
                        sources_used,
                    });
                }
                tracing::debug!("web search returned no usable answer, falling back to LLM");
            }
            Err(e) => {
                tracing::warn!(error = %e, "web search failed, falling back to LLM");
            }
        }
    }

    let answer = llm.complete(system_prompt(citations), query).await?;
    let answer = if answer.trim().is_empty() {
        APOLOGY.to_string()
    } else {
        answer
    };

    Ok(ComposedAnswer {
        answer,
        source: AnswerSource::Llm,
        sources_used: Vec::new(),
    })
}
