//! GitHub REST client implementing the `DeliveryProvider` contract.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, LINK};
use tracing::info;

use dorapulse_core::{
    Commit, DeliveryProvider, DeploymentRun, ExporterError, ExporterResult, MetricsWindow,
};

use crate::model::{parse_next_link, CommitPayload, RunPayload, RunsPage};

const DEFAULT_API_BASE: &str = "https://api.github.com";
const PER_PAGE: &str = "100";

/// Delivery history from one GitHub repository.
pub struct GithubProvider {
    http: reqwest::Client,
    api_base: String,
    owner: String,
    repo: String,
}

impl GithubProvider {
    /// Build a provider for `owner/repo` authenticating with `token`.
    pub fn new(owner: &str, repo: &str, token: &str) -> ExporterResult<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("token {token}"))
            .map_err(|e| ExporterError::Configuration(format!("invalid token: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .user_agent(concat!("dorapulse/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| ExporterError::Provider(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            api_base: DEFAULT_API_BASE.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Override the API base URL (GitHub Enterprise, test servers).
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// GET one page and hand back the next-page URL alongside the body.
    async fn get_page(&self, url: &str) -> ExporterResult<(Option<String>, String)> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ExporterError::Provider(format!("request to {url} failed: {e}")))?
            .error_for_status()
            .map_err(|e| ExporterError::Provider(format!("GitHub rejected request: {e}")))?;

        let next = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_next_link);

        let body = response
            .text()
            .await
            .map_err(|e| ExporterError::Provider(format!("failed to read response body: {e}")))?;

        Ok((next, body))
    }
}

#[async_trait]
impl DeliveryProvider for GithubProvider {
    async fn fetch_commits(&self, window: &MetricsWindow) -> ExporterResult<Vec<Commit>> {
        let mut url = format!(
            "{}/repos/{}/{}/commits?per_page={}&since={}&until={}",
            self.api_base,
            self.owner,
            self.repo,
            PER_PAGE,
            window.start.to_rfc3339(),
            window.end.to_rfc3339(),
        );

        let mut commits = Vec::new();
        loop {
            let (next, body) = self.get_page(&url).await?;
            let page: Vec<CommitPayload> = serde_json::from_str(&body)
                .map_err(|e| ExporterError::Computation(format!("malformed commit listing: {e}")))?;
            commits.extend(page.into_iter().map(Commit::from));

            match next {
                Some(next_url) => url = next_url,
                None => break,
            }
        }

        info!(count = commits.len(), repo = %self.repo, "fetched commits");
        Ok(commits)
    }

    async fn fetch_deployment_runs(
        &self,
        window: &MetricsWindow,
    ) -> ExporterResult<Vec<DeploymentRun>> {
        let mut url = format!(
            "{}/repos/{}/{}/actions/runs?per_page={}&status=completed&event=push&created={}..{}",
            self.api_base,
            self.owner,
            self.repo,
            PER_PAGE,
            window.start.format("%Y-%m-%d"),
            window.end.format("%Y-%m-%d"),
        );

        let mut runs = Vec::new();
        loop {
            let (next, body) = self.get_page(&url).await?;
            let page: RunsPage = serde_json::from_str(&body)
                .map_err(|e| ExporterError::Computation(format!("malformed run listing: {e}")))?;
            runs.extend(page.workflow_runs.into_iter().filter_map(RunPayload::into_run));

            match next {
                Some(next_url) => url = next_url,
                None => break,
            }
        }

        info!(count = runs.len(), repo = %self.repo, "fetched deployment runs");
        Ok(runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_builds_with_token() {
        let provider = GithubProvider::new("acme", "api", "ghp_test").unwrap();
        assert_eq!(provider.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn api_base_override_strips_trailing_slash() {
        let provider = GithubProvider::new("acme", "api", "ghp_test")
            .unwrap()
            .with_api_base("https://ghe.example.com/api/v3/");
        assert_eq!(provider.api_base, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn token_with_control_characters_is_a_config_error() {
        let result = GithubProvider::new("acme", "api", "bad\ntoken");
        assert!(matches!(result, Err(ExporterError::Configuration(_))));
    }
}
