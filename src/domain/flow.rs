//! Flow - Medal flow graph (`/api/medal-flow`)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Node category; also decides the node color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Year,
    Sport,
    Country,
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Year => "Year",
            NodeKind::Sport => "Sport",
            NodeKind::Country => "Country",
        }
    }
}

/// Flow path ordering requested from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlowType {
    #[default]
    #[serde(rename = "year-sport-country")]
    YearSportCountry,
    #[serde(rename = "year-country-sport")]
    YearCountrySport,
}

impl FlowType {
    pub fn as_param(&self) -> &'static str {
        match self {
            FlowType::YearSportCountry => "year-sport-country",
            FlowType::YearCountrySport => "year-country-sport",
        }
    }
}

impl fmt::Display for FlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for FlowType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year-sport-country" => Ok(FlowType::YearSportCountry),
            "year-country-sport" => Ok(FlowType::YearCountrySport),
            other => Err(Error::Invalid {
                message: format!("Unknown flow type: {other}"),
            }),
        }
    }
}

/// Graph node as served
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    /// Optional stable id; links may reference nodes by id or by index
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub color: Option<String>,
}

/// Link endpoint: a node index or a node id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
    Index(usize),
    Id(String),
}

/// Weighted directed link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLink {
    pub source: NodeRef,
    pub target: NodeRef,
    pub value: f64,
}

/// Full flow response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub links: Vec<FlowLink>,
    #[serde(default)]
    pub years: Vec<i32>,
}
