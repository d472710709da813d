use crate::app::ports::IdentityResolverPort;
use crate::constants::MLB_PEOPLE_SEARCH_URL;
use crate::error::{FirstPitchError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct PeopleSearchResponse {
    #[serde(default)]
    people: Vec<Person>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Person {
    id: u64,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    active: Option<bool>,
}

/// Resolves player names through the MLB Stats API people search.
pub struct PeopleSearchResolver {
    client: reqwest::Client,
    base_url: String,
}

impl PeopleSearchResolver {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: MLB_PEOPLE_SEARCH_URL.to_string(),
        })
    }
}

/// Prefer an exact (case-insensitive) name match, then an active player,
/// then whatever the search ranked first.
fn pick(people: &[Person], display_name: &str) -> Option<u64> {
    let wanted = display_name.trim().to_lowercase();
    people
        .iter()
        .find(|p| p.full_name.as_deref().map(str::to_lowercase).as_deref() == Some(wanted.as_str()))
        .or_else(|| people.iter().find(|p| p.active == Some(true)))
        .or_else(|| people.first())
        .map(|p| p.id)
}

#[async_trait]
impl IdentityResolverPort for PeopleSearchResolver {
    #[instrument(skip(self))]
    async fn resolve(&self, display_name: &str) -> Result<Option<u64>> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("names", display_name), ("sportIds", "1")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FirstPitchError::Status {
                status: status.as_u16(),
                url: self.base_url.clone(),
            });
        }

        let body = resp.text().await?;
        let parsed: PeopleSearchResponse = serde_json::from_str(&body)?;
        debug!(candidates = parsed.people.len(), "people search returned");
        Ok(pick(&parsed.people, display_name))
    }
}
