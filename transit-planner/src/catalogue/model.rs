//! DTOs for the schedule source's `stations_list` endpoint.
//!
//! The upstream payload is a deeply nested `countries -> regions ->
//! settlements -> stations` tree. We deserialize it as-is and flatten it
//! while building the in-memory catalogue, rather than fighting its shape
//! with custom `Deserialize` impls.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationsListResponse {
    #[serde(default)]
    pub countries: Vec<Country>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    #[serde(default)]
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    #[serde(default)]
    pub settlements: Vec<SettlementDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementDto {
    pub title: Option<String>,
    #[serde(default)]
    pub codes: Codes,
    #[serde(default)]
    pub stations: Vec<StationDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationDto {
    pub title: Option<String>,
    #[serde(default)]
    pub codes: Codes,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub transport_type: Option<String>,
    pub station_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Codes {
    pub yandex_code: Option<String>,
    pub esr_code: Option<String>,
}
