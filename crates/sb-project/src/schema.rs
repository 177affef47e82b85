//! Project schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_EVAL_QUERIES: [&str; 3] = [
    "chiller maintenance",
    "ahu sensor fault codes",
    "AHU filter replacement",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub stream: StreamDef,
    #[serde(default)]
    pub analytics: AnalyticsDef,
    #[serde(default)]
    pub retrieval: RetrievalDef,
    #[serde(default)]
    pub evaluation: EvaluationDef,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: name.into(),
            stream: StreamDef::default(),
            analytics: AnalyticsDef::default(),
            retrieval: RetrievalDef::default(),
            evaluation: EvaluationDef::default(),
        }
    }
}

/// Replay source for the live stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreamDef {
    pub sensors_dir: PathBuf,
    /// Delay between replayed rows, in seconds.
    pub interval_s: f64,
}

impl Default for StreamDef {
    fn default() -> Self {
        Self {
            sensors_dir: PathBuf::from("data/sensors"),
            interval_s: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyticsDef {
    pub window: usize,
    pub z_threshold: f64,
    /// Most recent anomalies shown on the dashboard.
    pub anomaly_tail: usize,
}

impl Default for AnalyticsDef {
    fn default() -> Self {
        Self {
            window: 50,
            z_threshold: 3.0,
            anomaly_tail: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetrievalDef {
    pub document_dirs: Vec<PathBuf>,
    pub chunk_words: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
}

impl Default for RetrievalDef {
    fn default() -> Self {
        Self {
            document_dirs: vec![PathBuf::from("data/manuals"), PathBuf::from("data/specs")],
            chunk_words: 500,
            chunk_overlap: 50,
            top_k: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EvaluationDef {
    pub queries: Vec<String>,
}

impl Default for EvaluationDef {
    fn default() -> Self {
        Self {
            queries: DEFAULT_EVAL_QUERIES.iter().map(|q| q.to_string()).collect(),
        }
    }
}
