use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;
use url::Url;

use crate::types::NewsItem;

pub const DEFAULT_ENDPOINT: &str = "https://newsdata.io/api/1/news";

// Key the front end build ships with; not a secret.
const API_KEY: &str = "pub_62584b68e6e4f0ba2eb1e2e8e3e4c3c3a3d87";
const QUERY: &str = "carbon emissions OR climate change OR greenhouse gas";
const MAX_ITEMS: usize = 6;

#[derive(Clone)]
pub struct NewsClient {
    http: Client,
    endpoint: Url,
}

impl NewsClient {
    pub fn new(endpoint: &str, user_agent: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(20))
            .build()?;
        Ok(Self {
            http,
            endpoint: Url::parse(endpoint)?,
        })
    }

    /// Fetch the latest articles, substituting the static fallback list on
    /// any failure. Never errors; every call performs a fresh request.
    pub async fn fetch_news(&self) -> Vec<NewsItem> {
        match self.fetch_live().await {
            Ok(items) if !items.is_empty() => items,
            Ok(_) => {
                warn!("news API returned no usable articles, serving fallback");
                fallback_news()
            }
            Err(e) => {
                warn!(error = ?e, "news fetch failed, serving fallback");
                fallback_news()
            }
        }
    }

    async fn fetch_live(&self) -> Result<Vec<NewsItem>> {
        let res = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                ("apikey", API_KEY),
                ("q", QUERY),
                ("language", "en"),
                ("category", "environment"),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            bail!("http status {}", status.as_u16());
        }

        let body: ApiResponse = res.json().await?;
        Ok(map_articles(body.results))
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    results: Vec<ApiArticle>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiArticle {
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    source_id: Option<String>,
    #[serde(default)]
    country: Vec<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

fn map_articles(results: Vec<ApiArticle>) -> Vec<NewsItem> {
    results.into_iter().take(MAX_ITEMS).map(map_article).collect()
}

fn map_article(a: ApiArticle) -> NewsItem {
    NewsItem {
        title: non_empty(a.title).unwrap_or_else(|| "Carbon Emissions Update".to_string()),
        summary: non_empty(a.description)
            .or_else(|| non_empty(a.content))
            .unwrap_or_else(|| {
                "Latest updates on carbon emissions and climate change.".to_string()
            }),
        source: non_empty(a.source_id).unwrap_or_else(|| "Environmental News".to_string()),
        region: a
            .country
            .into_iter()
            .next()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "Global".to_string()),
        url: non_empty(a.link).unwrap_or_else(|| "#".to_string()),
        timestamp: a
            .pub_date
            .as_deref()
            .and_then(parse_pub_date)
            .unwrap_or_else(Utc::now),
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// newsdata.io timestamps are "YYYY-MM-DD HH:MM:SS" in UTC; accept RFC 3339 too.
fn parse_pub_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|n| n.and_utc())
}

/// The fixed substitute list served whenever the live call cannot be
/// completed or parsed.
pub fn fallback_news() -> Vec<NewsItem> {
    let now = Utc::now();
    let item = |title: &str, summary: &str, source: &str, region: &str, url: &str| NewsItem {
        title: title.to_string(),
        summary: summary.to_string(),
        source: source.to_string(),
        region: region.to_string(),
        url: url.to_string(),
        timestamp: now,
    };
    vec![
        item(
            "Global CO2 Emissions Reach Record High in 2024",
            "Despite climate pledges, global carbon emissions from fossil fuels reached a new peak this year, according to the latest climate report.",
            "International Energy Agency",
            "Global",
            "https://www.iea.org/",
        ),
        item(
            "EU Announces Stricter Emission Targets for 2030",
            "European Union leaders commit to reducing greenhouse gas emissions by 55% compared to 1990 levels by the end of the decade.",
            "European Commission",
            "Europe",
            "https://ec.europa.eu/",
        ),
        item(
            "Renewable Energy Surpasses Coal in US Power Generation",
            "For the first time in history, renewable energy sources generated more electricity than coal in the United States over the past year.",
            "US Energy Department",
            "North America",
            "https://www.energy.gov/",
        ),
        item(
            "China Invests $550B in Green Technology",
            "China announces massive investment in renewable energy and electric vehicle infrastructure as part of carbon neutrality goals.",
            "Reuters",
            "Asia",
            "https://www.reuters.com/",
        ),
        item(
            "Ocean Carbon Absorption Declining Faster Than Expected",
            "New research shows that oceans are absorbing less CO2 than previously thought, raising concerns about climate tipping points.",
            "Nature Climate Change",
            "Global",
            "https://www.nature.com/",
        ),
        item(
            "Corporate Giants Pledge Net-Zero by 2040",
            "Over 200 major corporations commit to achieving net-zero carbon emissions a decade ahead of Paris Agreement timeline.",
            "UN Climate Summit",
            "Global",
            "https://www.un.org/",
        ),
    ]
}
