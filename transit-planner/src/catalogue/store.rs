//! In-memory index over the flattened station catalogue.

use std::collections::HashMap;

use crate::domain::{SettlementCode, StationCode};

use super::model::StationsListResponse;

/// A single station's catalogue entry, flattened out of the nested
/// country/region/settlement tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub code: StationCode,
    pub title: String,
    pub settlement: Option<SettlementCode>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub transport_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub code: SettlementCode,
    pub title: String,
}

/// Mean Earth radius in kilometres, matching the source's haversine constant.
const EARTH_RADIUS_KM: f64 = 6371.0;

fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_KM * c
}

/// In-memory view of the station catalogue, built once from a fetched or
/// cached [`StationsListResponse`] and queried many times by the search
/// core and the walk-edge materialiser.
pub struct StationCatalogue {
    stations: HashMap<StationCode, Station>,
    settlements: HashMap<SettlementCode, Settlement>,
    stations_by_settlement: HashMap<SettlementCode, Vec<StationCode>>,
}

impl StationCatalogue {
    pub fn from_response(response: &StationsListResponse) -> Self {
        let mut stations = HashMap::new();
        let mut settlements = HashMap::new();
        let mut stations_by_settlement: HashMap<SettlementCode, Vec<StationCode>> = HashMap::new();

        for country in &response.countries {
            for region in &country.regions {
                for settlement_dto in &region.settlements {
                    let settlement_code = settlement_dto
                        .codes
                        .yandex_code
                        .as_deref()
                        .and_then(|c| SettlementCode::parse(c).ok());

                    if let Some(ref code) = settlement_code {
                        settlements.insert(
                            code.clone(),
                            Settlement {
                                code: code.clone(),
                                title: settlement_dto.title.clone().unwrap_or_default(),
                            },
                        );
                    }

                    for station_dto in &settlement_dto.stations {
                        let Some(raw_code) = station_dto.codes.yandex_code.as_deref() else {
                            continue;
                        };
                        let Ok(code) = StationCode::parse(raw_code) else {
                            continue;
                        };
                        stations.insert(
                            code.clone(),
                            Station {
                                code: code.clone(),
                                title: station_dto.title.clone().unwrap_or_default(),
                                settlement: settlement_code.clone(),
                                latitude: station_dto.latitude,
                                longitude: station_dto.longitude,
                                transport_type: station_dto.transport_type.clone(),
                            },
                        );
                        if let Some(ref settlement_code) = settlement_code {
                            stations_by_settlement
                                .entry(settlement_code.clone())
                                .or_default()
                                .push(code);
                        }
                    }
                }
            }
        }

        Self {
            stations,
            settlements,
            stations_by_settlement,
        }
    }

    pub fn station(&self, code: &StationCode) -> Option<&Station> {
        self.stations.get(code)
    }

    pub fn settlement(&self, code: &SettlementCode) -> Option<&Settlement> {
        self.settlements.get(code)
    }

    /// All stations belonging to a settlement, in catalogue order.
    pub fn stations_in_settlement(&self, code: &SettlementCode) -> &[StationCode] {
        self.stations_by_settlement
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Case-insensitive substring search over station titles.
    pub fn search_stations(&self, query: &str) -> Vec<&Station> {
        let needle = query.to_lowercase();
        self.stations
            .values()
            .filter(|s| s.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Case-insensitive substring search over settlement titles.
    pub fn search_settlements(&self, query: &str) -> Vec<&Settlement> {
        let needle = query.to_lowercase();
        self.settlements
            .values()
            .filter(|s| s.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Stations within `radius_km` of the given station (excluding itself),
    /// paired with the great-circle distance.
    ///
    /// A degree bounding box is computed first (`dlat = r/111`,
    /// `dlon = r/(111 * cos(lat))`) so the haversine formula only runs on
    /// candidates that could plausibly be in range, instead of scanning
    /// the whole catalogue for every query.
    pub fn walkable_from(&self, origin: &StationCode, radius_km: f64) -> Vec<(&Station, f64)> {
        let Some(origin_station) = self.stations.get(origin) else {
            return Vec::new();
        };
        let (Some(lat), Some(lon)) = (origin_station.latitude, origin_station.longitude) else {
            return Vec::new();
        };

        let dlat = radius_km / 111.0;
        let cos_lat = lat.to_radians().cos();
        let dlon = if cos_lat.abs() < 1e-9 {
            180.0
        } else {
            radius_km / (111.0 * cos_lat)
        };
        let (lat_min, lat_max) = (lat - dlat, lat + dlat);
        let (lon_min, lon_max) = (lon - dlon, lon + dlon);

        self.stations
            .values()
            .filter(|candidate| candidate.code != *origin)
            .filter_map(|candidate| {
                let (clat, clon) = (candidate.latitude?, candidate.longitude?);
                if clat < lat_min || clat > lat_max || clon < lon_min || clon > lon_max {
                    return None;
                }
                let distance = haversine_km(lat, lon, clat, clon);
                (distance <= radius_km).then_some((candidate, distance))
            })
            .collect()
    }

    /// Every station in the catalogue, in no particular order.
    pub fn all_stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::model::{Codes, Country, Region, SettlementDto, StationDto};

    fn response() -> StationsListResponse {
        StationsListResponse {
            countries: vec![Country {
                regions: vec![Region {
                    settlements: vec![SettlementDto {
                        title: Some("Metro City".into()),
                        codes: Codes {
                            yandex_code: Some("c1".into()),
                            esr_code: None,
                        },
                        stations: vec![
                            StationDto {
                                title: Some("Central".into()),
                                codes: Codes {
                                    yandex_code: Some("s1".into()),
                                    esr_code: None,
                                },
                                latitude: Some(55.75),
                                longitude: Some(37.61),
                                transport_type: Some("train".into()),
                                station_type: Some("station".into()),
                            },
                            StationDto {
                                title: Some("Central Bus Terminal".into()),
                                codes: Codes {
                                    yandex_code: Some("s2".into()),
                                    esr_code: None,
                                },
                                latitude: Some(55.751),
                                longitude: Some(37.611),
                                transport_type: Some("bus".into()),
                                station_type: Some("station".into()),
                            },
                            StationDto {
                                title: Some("Far Away".into()),
                                codes: Codes {
                                    yandex_code: Some("s3".into()),
                                    esr_code: None,
                                },
                                latitude: Some(10.0),
                                longitude: Some(10.0),
                                transport_type: Some("train".into()),
                                station_type: Some("station".into()),
                            },
                        ],
                    }],
                }],
            }],
        }
    }

    #[test]
    fn builds_index_and_looks_up_station() {
        let catalogue = StationCatalogue::from_response(&response());
        assert_eq!(catalogue.len(), 3);
        let station = catalogue.station(&StationCode::parse("s1").unwrap()).unwrap();
        assert_eq!(station.title, "Central");
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let catalogue = StationCatalogue::from_response(&response());
        let results = catalogue.search_stations("central");
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn stations_in_settlement() {
        let catalogue = StationCatalogue::from_response(&response());
        let codes = catalogue.stations_in_settlement(&SettlementCode::parse("c1").unwrap());
        assert_eq!(codes.len(), 3);
    }

    #[test]
    fn walkable_from_finds_nearby_excludes_self_and_far() {
        let catalogue = StationCatalogue::from_response(&response());
        let nearby = catalogue.walkable_from(&StationCode::parse("s1").unwrap(), 1.0);
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].0.code, StationCode::parse("s2").unwrap());
    }

    #[test]
    fn walkable_from_unknown_station_is_empty() {
        let catalogue = StationCatalogue::from_response(&response());
        let nearby = catalogue.walkable_from(&StationCode::parse("nope").unwrap(), 1.0);
        assert!(nearby.is_empty());
    }
}
