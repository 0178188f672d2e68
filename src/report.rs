//! Scan report schema as emitted by `grype -o json`.
//!
//! Only `matches[].vulnerability.severity` feeds the tally. The remaining
//! fields are decoded so that a structurally wrong document is rejected,
//! while unknown fields are ignored and `null` is read as the empty value.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::AppError;

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScanReport {
    #[serde(deserialize_with = "nullable")]
    pub matches: Vec<Match>,
    #[serde(deserialize_with = "nullable")]
    pub source: Source,
}

impl ScanReport {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, AppError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Match {
    #[serde(deserialize_with = "nullable")]
    pub vulnerability: Vulnerability,
    #[serde(deserialize_with = "nullable")]
    pub related_vulnerabilities: Vec<RelatedVulnerability>,
    #[serde(deserialize_with = "nullable")]
    pub match_details: Vec<MatchDetail>,
    #[serde(deserialize_with = "nullable")]
    pub artifact: Artifact,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vulnerability {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub data_source: String,
    #[serde(deserialize_with = "nullable")]
    pub namespace: String,
    #[serde(deserialize_with = "nullable")]
    pub severity: String,
    #[serde(deserialize_with = "nullable")]
    pub urls: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub cvss: Vec<Cvss>,
    #[serde(deserialize_with = "nullable")]
    pub fix: Fix,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Cvss {
    #[serde(deserialize_with = "nullable")]
    pub source: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(deserialize_with = "nullable")]
    pub version: String,
    #[serde(deserialize_with = "nullable")]
    pub vector: String,
    #[serde(deserialize_with = "nullable")]
    pub metrics: CvssMetrics,
    #[serde(deserialize_with = "nullable")]
    pub vendor_metadata: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CvssMetrics {
    pub base_score: Option<f64>,
    pub exploitability_score: Option<f64>,
    pub impact_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelatedVulnerability {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub data_source: String,
    #[serde(deserialize_with = "nullable")]
    pub namespace: String,
    #[serde(deserialize_with = "nullable")]
    pub urls: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub cvss: Vec<Cvss>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Fix {
    #[serde(deserialize_with = "nullable")]
    pub versions: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub state: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchDetail {
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(deserialize_with = "nullable")]
    pub matcher: String,
    #[serde(deserialize_with = "nullable")]
    pub searched_by: SearchedBy,
    #[serde(deserialize_with = "nullable")]
    pub found: Found,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchedBy {
    #[serde(deserialize_with = "nullable")]
    pub language: String,
    #[serde(deserialize_with = "nullable")]
    pub namespace: String,
    #[serde(deserialize_with = "nullable")]
    pub package: Package,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Package {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Found {
    #[serde(rename = "versionConstraint", deserialize_with = "nullable")]
    pub version_constraint: String,
    #[serde(rename = "vulnerabilityID", deserialize_with = "nullable")]
    pub vulnerability_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Artifact {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub version: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(deserialize_with = "nullable")]
    pub locations: Vec<Location>,
    #[serde(deserialize_with = "nullable")]
    pub language: String,
    #[serde(deserialize_with = "nullable")]
    pub licenses: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub cpes: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub purl: String,
    #[serde(deserialize_with = "nullable")]
    pub upstreams: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "nullable")]
    pub path: String,
    #[serde(rename = "layerID", deserialize_with = "nullable")]
    pub layer_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Source {
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(deserialize_with = "nullable")]
    pub target: Target,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Target {
    #[serde(deserialize_with = "nullable")]
    pub user_input: String,
    #[serde(rename = "imageID", deserialize_with = "nullable")]
    pub image_id: String,
    #[serde(deserialize_with = "nullable")]
    pub manifest_digest: String,
    #[serde(deserialize_with = "nullable")]
    pub media_type: String,
    #[serde(deserialize_with = "nullable")]
    pub tags: Vec<String>,
    pub image_size: Option<u64>,
    #[serde(deserialize_with = "nullable")]
    pub layers: Vec<Layer>,
    #[serde(deserialize_with = "nullable")]
    pub manifest: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Layer {
    #[serde(deserialize_with = "nullable")]
    pub media_type: String,
    #[serde(deserialize_with = "nullable")]
    pub digest: String,
    pub size: Option<u64>,
}
