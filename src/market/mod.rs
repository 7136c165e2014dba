//! Job-market signal: postings from an injected source and skill trend counts.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CmError, Result};

/// A job posting as returned by a market source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
}

impl JobPosting {
    pub fn new(title: impl Into<String>, skills: &[&str]) -> Self {
        Self {
            title: title.into(),
            required_skills: skills.iter().map(|skill| (*skill).to_string()).collect(),
        }
    }
}

/// Anything that can produce postings for a search.
pub trait JobMarketSource {
    fn fetch_postings(&self, keyword: &str, location: &str) -> Result<Vec<JobPosting>>;
}

/// Fixed catalog returned for every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedJobMarket {
    postings: Vec<JobPosting>,
}

impl Default for SimulatedJobMarket {
    fn default() -> Self {
        Self::new(vec![
            JobPosting::new(
                "Software Developer",
                &["python", "javascript", "git", "agile", "react", "django"],
            ),
            JobPosting::new(
                "Data Analyst",
                &["python", "sql", "data analysis", "statistics", "tableau", "excel"],
            ),
            JobPosting::new(
                "DevOps Engineer",
                &["linux", "aws", "docker", "kubernetes", "jenkins", "python"],
            ),
            JobPosting::new(
                "Full Stack Developer",
                &["javascript", "react", "node.js", "mongodb", "express", "git"],
            ),
            JobPosting::new(
                "Machine Learning Engineer",
                &["python", "tensorflow", "scikit-learn", "numpy", "pandas", "keras"],
            ),
        ])
    }
}

impl SimulatedJobMarket {
    pub const fn new(postings: Vec<JobPosting>) -> Self {
        Self { postings }
    }

    /// Load a catalog from a JSON or YAML list of postings.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            CmError::MarketCatalog(format!("read {}: {err}", path.display()))
        })?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        let postings: Vec<JobPosting> = match extension.as_deref() {
            Some("json") => serde_json::from_str(&raw)?,
            Some("yaml" | "yml") => serde_yaml::from_str(&raw)?,
            _ => {
                return Err(CmError::MarketCatalog(format!(
                    "unsupported catalog format: {} (expected .json, .yaml or .yml)",
                    path.display()
                )));
            }
        };
        debug!(path = %path.display(), postings = postings.len(), "loaded market catalog");
        Ok(Self::new(postings))
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }
}

impl JobMarketSource for SimulatedJobMarket {
    fn fetch_postings(&self, _keyword: &str, _location: &str) -> Result<Vec<JobPosting>> {
        Ok(self.postings.clone())
    }
}

/// How often a skill appears across postings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillTrend {
    pub skill: String,
    pub count: usize,
}

/// The `top_n` most frequent skills, ties in first-encountered order.
pub fn summarize_trends(postings: &[JobPosting], top_n: usize) -> Vec<SkillTrend> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut trends: Vec<SkillTrend> = Vec::new();

    for skill in postings.iter().flat_map(|posting| &posting.required_skills) {
        if let Some(&slot) = index.get(skill.as_str()) {
            trends[slot].count += 1;
        } else {
            index.insert(skill.as_str(), trends.len());
            trends.push(SkillTrend {
                skill: skill.clone(),
                count: 1,
            });
        }
    }

    // sort_by is stable, so equal counts keep encounter order
    trends.sort_by(|a, b| b.count.cmp(&a.count));
    trends.truncate(top_n);
    trends
}
