// NCBI E-utilities client — unauthenticated HTTP against eutils.ncbi.nlm.nih.gov.
//
// Two endpoints are used: `esearch.fcgi` with usehistory=y to register a
// query on the NCBI history server (returning a WebEnv/query_key token pair
// plus the total hit count), and `efetch.fcgi` to page through the stored
// result set in retstart/retmax batches as FASTA text.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Protein database — the only Entrez db this tool queries.
const DB: &str = "protein";

/// A registered search on the NCBI history server.
///
/// The token pair addresses the server-side result set; `count` is the
/// total number of matching records, which drives pagination.
#[derive(Debug, Clone)]
pub struct SearchSession {
    pub web_env: String,
    pub query_key: String,
    pub count: usize,
}

/// Thin reqwest wrapper for the E-utilities endpoints.
///
/// Every request carries the configured contact email (NCBI policy) and
/// the API key when one is set.
pub struct EntrezClient {
    client: reqwest::Client,
    base_url: String,
    email: String,
    api_key: Option<String>,
}

impl EntrezClient {
    /// Create a client pointing at the given E-utilities base URL.
    pub fn new(base_url: &str, email: &str, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("capsid/0.1 (phage-dataset-builder)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            email: email.to_string(),
            api_key,
        })
    }

    /// Register a search on the history server and return its session.
    pub async fn esearch(&self, term: &str) -> Result<SearchSession> {
        let url = format!("{}/esearch.fcgi", self.base_url);

        debug!(term = term, "esearch request");

        let mut params = vec![
            ("db", DB.to_string()),
            ("term", term.to_string()),
            ("usehistory", "y".to_string()),
            ("idtype", "acc".to_string()),
            ("retmode", "json".to_string()),
            ("email", self.email.clone()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .context("esearch request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("esearch returned HTTP {status}: {body}");
        }

        let parsed: EsearchResponse = response
            .json()
            .await
            .context("Failed to deserialize esearch response")?;

        let result = parsed.esearchresult;
        let count: usize = result
            .count
            .parse()
            .with_context(|| format!("esearch count is not a number: {:?}", result.count))?;

        Ok(SearchSession {
            web_env: result
                .webenv
                .context("esearch response is missing WebEnv (usehistory not honored?)")?,
            query_key: result
                .querykey
                .context("esearch response is missing QueryKey")?,
            count,
        })
    }

    /// Fetch one batch of the session's result set as FASTA text.
    ///
    /// `retstart` is the zero-based record offset, `retmax` the batch size.
    /// Non-2xx statuses become errors carrying the HTTP status in the
    /// message, which the download retry loop classifies.
    pub async fn efetch_batch(
        &self,
        session: &SearchSession,
        retstart: usize,
        retmax: usize,
    ) -> Result<String> {
        let url = format!("{}/efetch.fcgi", self.base_url);

        debug!(retstart = retstart, retmax = retmax, "efetch request");

        let retstart_s = retstart.to_string();
        let retmax_s = retmax.to_string();
        let mut params = vec![
            ("db", DB),
            ("rettype", "fasta"),
            ("retmode", "text"),
            ("retstart", retstart_s.as_str()),
            ("retmax", retmax_s.as_str()),
            ("WebEnv", session.web_env.as_str()),
            ("query_key", session.query_key.as_str()),
            ("idtype", "acc"),
            ("email", self.email.as_str()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.as_str()));
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .context("efetch request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("efetch returned HTTP {status}: {body}");
        }

        response
            .text()
            .await
            .context("Failed to read efetch response body")
    }
}

// -- Serde types for the esearch JSON envelope --

#[derive(Debug, Deserialize)]
struct EsearchResponse {
    esearchresult: EsearchResult,
}

#[derive(Debug, Deserialize)]
struct EsearchResult {
    count: String,
    #[serde(default)]
    webenv: Option<String>,
    #[serde(default)]
    querykey: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esearch_response_parses() {
        let json = r#"{
            "header": {"type": "esearch", "version": "0.3"},
            "esearchresult": {
                "count": "12845",
                "retmax": "20",
                "retstart": "0",
                "querykey": "1",
                "webenv": "MCID_abc123",
                "idlist": ["WP_000001.1"]
            }
        }"#;

        let parsed: EsearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.esearchresult.count, "12845");
        assert_eq!(parsed.esearchresult.webenv.as_deref(), Some("MCID_abc123"));
        assert_eq!(parsed.esearchresult.querykey.as_deref(), Some("1"));
    }

    #[test]
    fn test_esearch_response_without_history_tokens() {
        // usehistory=y not honored — tokens absent, count still present
        let json = r#"{"esearchresult": {"count": "0", "idlist": []}}"#;
        let parsed: EsearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.esearchresult.count, "0");
        assert!(parsed.esearchresult.webenv.is_none());
        assert!(parsed.esearchresult.querykey.is_none());
    }
}
