//! Queries and Payloads
//!
//! A [`Query`] names what a chart needs from the backend; the matching
//! [`Payload`] variant carries the decoded answer back to the chart.

use crate::constants::{DEFAULT_COUNTRY_COUNT, DEFAULT_NODE_LIMIT};
use crate::domain::flow::{FlowGraph, FlowType};
use crate::domain::host::HostPerformance;
use crate::domain::matrix::{MatrixResponse, YearRange};
use crate::domain::medal::{CountryRef, GameRef, HostCity, MedalRecord, MedalType};
use crate::domain::sport::SportMedalRow;
use crate::error::{Error, Result};

/// Backend endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    SportCountryMatrix,
    MedalFlow,
    HostPerformance,
    Countries,
    Games,
    MedalTally,
    Sports,
    SportMedals,
    HostCities,
}

impl Endpoint {
    /// Path relative to the base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::SportCountryMatrix => "api/sport-country-matrix",
            Endpoint::MedalFlow => "api/medal-flow",
            Endpoint::HostPerformance => "api/host-performance",
            Endpoint::Countries => "api/countries",
            Endpoint::Games => "api/games",
            Endpoint::MedalTally => "api/medal-tally",
            Endpoint::Sports => "api/sports",
            Endpoint::SportMedals => "api/sport_medals",
            Endpoint::HostCities => "api/host_cities",
        }
    }
}

/// Query parameters as ordered key/value pairs
pub type QueryParams = Vec<(&'static str, String)>;

/// Parameters of the heatmap request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatrixParams {
    pub medal_type: MedalType,
    pub year_range: YearRange,
    pub country_count: u32,
}

impl Default for MatrixParams {
    fn default() -> Self {
        Self {
            medal_type: MedalType::Total,
            year_range: YearRange::Recent,
            country_count: DEFAULT_COUNTRY_COUNT,
        }
    }
}

impl MatrixParams {
    pub fn to_query(&self) -> QueryParams {
        vec![
            ("medal_type", self.medal_type.as_param().to_string()),
            ("year_range", self.year_range.as_param()),
            ("country_count", self.country_count.to_string()),
        ]
    }
}

/// Parameters of the flow diagram request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlowParams {
    pub medal_type: MedalType,
    pub flow_type: FlowType,
    pub node_limit: u32,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            medal_type: MedalType::Total,
            flow_type: FlowType::YearSportCountry,
            node_limit: DEFAULT_NODE_LIMIT,
        }
    }
}

impl FlowParams {
    pub fn to_query(&self) -> QueryParams {
        vec![
            ("medal_type", self.medal_type.as_param().to_string()),
            ("flow_type", self.flow_type.as_param().to_string()),
            ("node_limit", self.node_limit.to_string()),
        ]
    }
}

/// Medal tally plus the reference data the evolution page loads with it
#[derive(Debug, Clone, Default)]
pub struct EvolutionBundle {
    pub tally: Vec<MedalRecord>,
    pub countries: Vec<CountryRef>,
    pub games: Vec<GameRef>,
}

/// Host performance plus reference data
#[derive(Debug, Clone, Default)]
pub struct HostBundle {
    pub hosts: Vec<HostPerformance>,
    pub countries: Vec<CountryRef>,
    pub games: Vec<GameRef>,
    pub cities: Vec<HostCity>,
}

/// What a chart asks the backend for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Matrix(MatrixParams),
    Flow(FlowParams),
    /// `/api/medal-tally`, `/api/countries` and `/api/games` together
    Evolution,
    /// `/api/host-performance`, `/api/countries`, `/api/games`, `/api/host_cities`
    Host,
    Sports,
    SportMedals { sport: String },
}

impl Query {
    /// Short name for logs and task names
    pub fn name(&self) -> &'static str {
        match self {
            Query::Matrix(_) => "sport-country-matrix",
            Query::Flow(_) => "medal-flow",
            Query::Evolution => "evolution-bundle",
            Query::Host => "host-bundle",
            Query::Sports => "sports",
            Query::SportMedals { .. } => "sport-medals",
        }
    }
}

/// Decoded answer to a [`Query`]
#[derive(Debug, Clone)]
pub enum Payload {
    Matrix(MatrixResponse),
    Flow(FlowGraph),
    Evolution(EvolutionBundle),
    Host(HostBundle),
    Sports(Vec<String>),
    SportMedals(Vec<SportMedalRow>),
}

impl Payload {
    pub fn name(&self) -> &'static str {
        match self {
            Payload::Matrix(_) => "sport-country-matrix",
            Payload::Flow(_) => "medal-flow",
            Payload::Evolution(_) => "evolution-bundle",
            Payload::Host(_) => "host-bundle",
            Payload::Sports(_) => "sports",
            Payload::SportMedals(_) => "sport-medals",
        }
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::data_shape(format!("expected {expected} payload, got {}", self.name()))
    }

    pub fn into_matrix(self) -> Result<MatrixResponse> {
        match self {
            Payload::Matrix(matrix) => Ok(matrix),
            other => Err(other.mismatch("sport-country-matrix")),
        }
    }

    pub fn into_flow(self) -> Result<FlowGraph> {
        match self {
            Payload::Flow(graph) => Ok(graph),
            other => Err(other.mismatch("medal-flow")),
        }
    }

    pub fn into_evolution(self) -> Result<EvolutionBundle> {
        match self {
            Payload::Evolution(bundle) => Ok(bundle),
            other => Err(other.mismatch("evolution-bundle")),
        }
    }

    pub fn into_host(self) -> Result<HostBundle> {
        match self {
            Payload::Host(bundle) => Ok(bundle),
            other => Err(other.mismatch("host-bundle")),
        }
    }

    pub fn into_sports(self) -> Result<Vec<String>> {
        match self {
            Payload::Sports(sports) => Ok(sports),
            other => Err(other.mismatch("sports")),
        }
    }

    pub fn into_sport_medals(self) -> Result<Vec<SportMedalRow>> {
        match self {
            Payload::SportMedals(rows) => Ok(rows),
            other => Err(other.mismatch("sport-medals")),
        }
    }
}
