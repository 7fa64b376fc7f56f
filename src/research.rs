//! Knowledge Hub fetchers
//!
//! Two independent read-only lookups: PubMed E-utilities and
//! ClinicalTrials.gov. Each call is best-effort with a short timeout and
//! degrades to a fixed placeholder; neither failure affects the other and
//! nothing is retried.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const PUBMED_BASE: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
const TRIALS_BASE: &str = "https://clinicaltrials.gov/api/query/study_fields";

const DEFAULT_PUBMED_QUERY: &str = "Wegovy AND Novo Nordisk AND obesity";
const DEFAULT_TRIALS_QUERY: &str = "Wegovy Novo Nordisk";
const MAX_RESULTS: usize = 3;

static ARTICLE_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<ArticleTitle[^>]*>(.*?)</ArticleTitle>").unwrap());

/// Client for the external literature/trials services
pub struct KnowledgeHub {
    client: reqwest::Client,
}

impl Default for KnowledgeHub {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeHub {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Recent PubMed article titles with links, or a placeholder line.
    pub async fn fetch_pubmed(&self) -> Vec<String> {
        let pmids = match self.search_pubmed_ids(DEFAULT_PUBMED_QUERY).await {
            Ok(ids) => ids,
            Err(err) => {
                warn!("PubMed search failed: {err}");
                return vec!["⚠️ PubMed fetch failed.".to_string()];
            }
        };

        let mut articles = Vec::new();
        for pmid in pmids.iter().take(MAX_RESULTS) {
            match self.fetch_article_title(pmid).await {
                Ok(Some(title)) => {
                    articles.push(format!(
                        "• {title}\n🔗 https://pubmed.ncbi.nlm.nih.gov/{pmid}/"
                    ));
                }
                Ok(None) => debug!("PubMed article {pmid} had no title"),
                Err(err) => debug!("PubMed efetch failed for {pmid}: {err}"),
            }
        }

        if articles.is_empty() {
            vec!["⚠️ No PubMed results.".to_string()]
        } else {
            articles
        }
    }

    async fn search_pubmed_ids(&self, query: &str) -> anyhow::Result<Vec<String>> {
        let url = format!("{PUBMED_BASE}/esearch.fcgi");
        let body: Value = self
            .client
            .get(&url)
            .query(&[
                ("db", "pubmed"),
                ("term", query),
                ("retmax", &MAX_RESULTS.to_string()),
                ("retmode", "json"),
            ])
            .send()
            .await?
            .json()
            .await?;

        let ids = body["esearchresult"]["idlist"]
            .as_array()
            .map(|list| {
                list.iter()
                    .filter_map(|id| id.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        Ok(ids)
    }

    async fn fetch_article_title(&self, pmid: &str) -> anyhow::Result<Option<String>> {
        let url = format!("{PUBMED_BASE}/efetch.fcgi");
        let xml = self
            .client
            .get(&url)
            .query(&[("db", "pubmed"), ("id", pmid), ("retmode", "xml")])
            .send()
            .await?
            .text()
            .await?;
        Ok(extract_article_title(&xml))
    }

    /// Matching clinical trials with condition/status, or a placeholder.
    pub async fn fetch_clinical_trials(&self) -> Vec<String> {
        let response = self
            .client
            .get(TRIALS_BASE)
            .query(&[
                ("expr", DEFAULT_TRIALS_QUERY),
                ("fields", "BriefTitle,Condition,OverallStatus,URL"),
                ("min_rnk", "1"),
                ("max_rnk", &MAX_RESULTS.to_string()),
                ("fmt", "json"),
            ])
            .send()
            .await;

        let body: Value = match response {
            Ok(resp) => match resp.json().await {
                Ok(body) => body,
                Err(err) => {
                    warn!("ClinicalTrials.gov response malformed: {err}");
                    return vec!["⚠️ ClinicalTrials.gov fetch failed.".to_string()];
                }
            },
            Err(err) => {
                warn!("ClinicalTrials.gov fetch failed: {err}");
                return vec!["⚠️ ClinicalTrials.gov fetch failed.".to_string()];
            }
        };

        let trials = format_trials(&body);
        if trials.is_empty() {
            vec!["⚠️ No clinical trials found.".to_string()]
        } else {
            trials
        }
    }
}

fn extract_article_title(xml: &str) -> Option<String> {
    ARTICLE_TITLE
        .captures(xml)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
}

fn format_trials(body: &Value) -> Vec<String> {
    let studies = body["StudyFieldsResponse"]["StudyFields"]
        .as_array()
        .cloned()
        .unwrap_or_default();

    studies
        .iter()
        .map(|study| {
            let first = |field: &str| {
                study[field]
                    .as_array()
                    .and_then(|values| values.first())
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string()
            };
            let title = {
                let t = first("BriefTitle");
                if t.is_empty() {
                    "No title".to_string()
                } else {
                    t
                }
            };
            format!(
                "• {title}\nCondition: {} | Status: {}\n🔗 {}",
                first("Condition"),
                first("OverallStatus"),
                first("URL")
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_title_extracted_from_xml() {
        let xml = r#"<PubmedArticle><Article><ArticleTitle>Semaglutide outcomes in adults.</ArticleTitle></Article></PubmedArticle>"#;
        assert_eq!(
            extract_article_title(xml).as_deref(),
            Some("Semaglutide outcomes in adults.")
        );
    }

    #[test]
    fn missing_title_yields_none() {
        assert!(extract_article_title("<PubmedArticle/>").is_none());
        assert!(extract_article_title("<ArticleTitle></ArticleTitle>").is_none());
    }

    #[test]
    fn trials_formatted_from_study_fields() {
        let body = serde_json::json!({
            "StudyFieldsResponse": {
                "StudyFields": [
                    {
                        "BriefTitle": ["A Study of Semaglutide"],
                        "Condition": ["Obesity"],
                        "OverallStatus": ["Recruiting"],
                        "URL": ["https://clinicaltrials.gov/study/NCT001"]
                    }
                ]
            }
        });
        let trials = format_trials(&body);
        assert_eq!(trials.len(), 1);
        assert!(trials[0].contains("A Study of Semaglutide"));
        assert!(trials[0].contains("Condition: Obesity | Status: Recruiting"));
    }

    #[test]
    fn empty_study_fields_formats_to_nothing() {
        let body = serde_json::json!({});
        assert!(format_trials(&body).is_empty());
    }

    #[test]
    fn untitled_study_gets_placeholder_title() {
        let body = serde_json::json!({
            "StudyFieldsResponse": { "StudyFields": [ { "Condition": ["Obesity"] } ] }
        });
        let trials = format_trials(&body);
        assert!(trials[0].contains("No title"));
    }
}
