//! Remote graph providers and the fallback to local generation.
//!
//! A provider is anything that can produce the JSON form of a [Graph], typically a remote service.
//! Its answer is never trusted: it is parsed, validated and recoloured, and any failure (an error,
//! a timeout or a malformed graph) falls back to the local [GraphGenerator].
use crate::config::Difficulty;
use crate::error::{GenerateError, GraphError, ProviderError};
use crate::generator::GraphGenerator;
use crate::graph::{default_color, Graph};
use log::{info, warn};
use rand::Rng;
use std::time::Duration;

/// Where a graph handed out by [fetch_or_generate] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphSource {
    Remote,
    Local,
}

#[allow(async_fn_in_trait)]
pub trait GraphProvider {
    /// Requests the raw text of a graph. The text may wrap the JSON in markdown code fences.
    async fn request(&self, difficulty: Difficulty) -> Result<String, ProviderError>;
}

/// Removes markdown code fences that text-generating services like to add around JSON.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_owned()
}

/// Parses and validates provider output. Colours are reassigned by label.
pub fn parse_response(text: &str) -> Result<Graph, GraphError> {
    let mut graph = Graph::from_json(&strip_code_fences(text))?;
    for (label, node) in graph.nodes.iter_mut() {
        node.color = default_color(label).to_owned();
    }
    Ok(graph)
}

/// Asks the provider for a graph, giving up after `timeout`.
pub async fn fetch<P>(
    provider: &P,
    difficulty: Difficulty,
    timeout: Duration,
) -> Result<Graph, ProviderError>
where
    P: GraphProvider,
{
    let text = tokio::time::timeout(timeout, provider.request(difficulty))
        .await
        .map_err(|_| ProviderError::Timeout(timeout))??;
    Ok(parse_response(&text)?)
}

/// Uses the provider if there is one and falls back to the local generator whenever it fails.
/// Only a broken generator invariant is reported as an error.
pub async fn fetch_or_generate<P, R>(
    provider: Option<&P>,
    difficulty: Difficulty,
    timeout: Duration,
    generator: &GraphGenerator,
    rng: &mut R,
) -> Result<(Graph, GraphSource), GenerateError>
where
    P: GraphProvider,
    R: Rng + ?Sized,
{
    match provider {
        Some(provider) => match fetch(provider, difficulty, timeout).await {
            Ok(graph) => {
                info!("Using {} graph from remote provider", difficulty);
                return Ok((graph, GraphSource::Remote));
            }
            Err(e) => warn!("Remote provider failed, generating locally: {}", e),
        },
        None => info!("No remote provider configured, generating locally"),
    }
    generator
        .generate(difficulty, rng)
        .map(|graph| (graph, GraphSource::Local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{NODE_COLOR, START_COLOR};

    const FENCED: &str = "```json\n{ \"nodes\": { \"S\": { \"x\": 100, \"y\": 250, \"h\": 1, \"color\": \"#000\" },\n\"Q\": { \"x\": 300, \"y\": 250, \"h\": 1 },\n\"Z\": { \"x\": 700, \"y\": 250, \"h\": 0 } },\n\"edges\": [ { \"from\": \"S\", \"to\": \"Q\", \"weight\": 1 }, { \"from\": \"Q\", \"to\": \"Z\", \"weight\": 2 } ] }\n```";

    #[test]
    fn strips_fences() {
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  {}  "), "{}");
    }

    #[test]
    fn parsed_graph_is_recoloured() {
        let graph = parse_response(FENCED).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.nodes["S"].color, START_COLOR);
        assert_eq!(graph.nodes["Q"].color, NODE_COLOR);
    }

    #[test]
    fn malformed_response_is_rejected() {
        let broken = FENCED.replace("\"weight\": 2", "\"weight\": -2");
        assert!(matches!(
            parse_response(&broken),
            Err(GraphError::InvalidWeight { .. })
        ));
    }
}
