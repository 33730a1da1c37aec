//! World map of diabetes case counts.
//!
//! Builds a renderer-agnostic choropleth description from a delimited dataset with at
//! least `Location` and `Value` columns (`Value` is the number of adults with diabetes,
//! in thousands). Each region is bucketed into one of six fixed bands with a fixed
//! colour. Building never fails the results screen: [`build_world_map`] yields `None`
//! and logs a warning when the dataset is unusable.

use crate::error::{MapError, MapResult};
use serde::Serialize;
use std::path::Path;

pub const MAP_TITLE: &str = "Estimated Number of Adults (20-79) with Diabetes in 2024";
pub const MAP_SOURCE_URL: &str = "https://diabetesatlas.org/data/en/world/";

const LOCATION_COLUMN: &str = "Location";
const VALUE_COLUMN: &str = "Value";

/// Case-count band, in thousands. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CaseBand {
    #[serde(rename = "<100 thousand")]
    Under100k,
    #[serde(rename = "100-500 thousand")]
    From100kTo500k,
    #[serde(rename = "500 thousand-1 million")]
    From500kTo1m,
    #[serde(rename = "1-10 million")]
    From1mTo10m,
    #[serde(rename = "10-20 million")]
    From10mTo20m,
    #[serde(rename = ">20 million")]
    Over20m,
}

impl CaseBand {
    pub const ALL: [CaseBand; 6] = [
        CaseBand::Under100k,
        CaseBand::From100kTo500k,
        CaseBand::From500kTo1m,
        CaseBand::From1mTo10m,
        CaseBand::From10mTo20m,
        CaseBand::Over20m,
    ];

    /// Band for a case count, or `None` for negative or non-finite values.
    pub fn for_value(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        Self::ALL
            .into_iter()
            .rev()
            .find(|band| value >= band.lower_bound())
    }

    pub fn lower_bound(self) -> f64 {
        match self {
            CaseBand::Under100k => 0.0,
            CaseBand::From100kTo500k => 100.0,
            CaseBand::From500kTo1m => 500.0,
            CaseBand::From1mTo10m => 1_000.0,
            CaseBand::From10mTo20m => 10_000.0,
            CaseBand::Over20m => 20_000.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CaseBand::Under100k => "<100 thousand",
            CaseBand::From100kTo500k => "100-500 thousand",
            CaseBand::From500kTo1m => "500 thousand-1 million",
            CaseBand::From1mTo10m => "1-10 million",
            CaseBand::From10mTo20m => "10-20 million",
            CaseBand::Over20m => ">20 million",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            CaseBand::Under100k => "#457B9D",
            CaseBand::From100kTo500k => "#1D3557",
            CaseBand::From500kTo1m => "#000000",
            CaseBand::From1mTo10m => "#E9C46D",
            CaseBand::From10mTo20m => "#F4A261",
            CaseBand::Over20m => "#E76F51",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRegion {
    pub location: String,
    /// Adults with diabetes, in thousands.
    pub value: f64,
    pub band: CaseBand,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldMap {
    pub title: &'static str,
    pub source_url: &'static str,
    pub legend: Vec<LegendEntry>,
    pub regions: Vec<MapRegion>,
}

/// Split one delimited record, honouring double-quoted fields and `""` escapes.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Build a world map from delimited text.
///
/// # Errors
///
/// Returns a `MapError` if the text has no header, lacks a `Location` or `Value`
/// column, or has no row with both a location and a usable value.
pub fn parse_world_map(text: &str) -> MapResult<WorldMap> {
    let mut lines = text
        .trim_start_matches('\u{feff}')
        .lines()
        .filter(|l| !l.trim().is_empty());

    let header = split_record(lines.next().ok_or(MapError::Empty)?);
    let column = |name: &'static str| {
        header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(MapError::MissingColumn(name))
    };
    let location_idx = column(LOCATION_COLUMN)?;
    let value_idx = column(VALUE_COLUMN)?;

    let mut regions = Vec::new();
    for line in lines {
        let record = split_record(line);
        let location = record.get(location_idx).map(|s| s.trim()).unwrap_or("");
        if location.is_empty() {
            continue;
        }
        let Some(value) = record
            .get(value_idx)
            .and_then(|s| s.trim().parse::<f64>().ok())
        else {
            continue;
        };
        let Some(band) = CaseBand::for_value(value) else {
            continue;
        };

        regions.push(MapRegion {
            location: location.to_string(),
            value,
            band,
            color: band.color(),
        });
    }

    if regions.is_empty() {
        return Err(MapError::NoRows);
    }

    Ok(WorldMap {
        title: MAP_TITLE,
        source_url: MAP_SOURCE_URL,
        legend: CaseBand::ALL
            .into_iter()
            .map(|band| LegendEntry {
                label: band.label(),
                color: band.color(),
            })
            .collect(),
        regions,
    })
}

/// Read and build a world map from a dataset file.
pub fn load_world_map(path: &Path) -> MapResult<WorldMap> {
    let text = std::fs::read_to_string(path).map_err(|source| MapError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_world_map(&text)
}

/// Build the world map, or `None` when no visualization is available.
pub fn build_world_map(path: &Path) -> Option<WorldMap> {
    match load_world_map(path) {
        Ok(map) => Some(map),
        Err(e) => {
            tracing::warn!("world map unavailable: {}", e);
            None
        }
    }
}
