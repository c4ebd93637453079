//! Placemark sources: GeoJSON point features, a built-in sample set and
//! synthetic fields for benchmarking.

use crate::hash::{hash2, rand_simple};
use crate::placemark::{Category, Placemark, MAX_POPULARITY_RANK};
use anyhow::{Context, Result};
use geojson::{Feature, GeoJson, JsonObject, Value};
use std::fs;
use std::path::Path;

/// Popularity rank for a city of `population` inhabitants
pub fn rank_for_population(population: u64) -> u8 {
    match population {
        p if p >= 10_000_000 => 0,
        p if p >= 5_000_000 => 2,
        p if p >= 1_000_000 => 4,
        p if p >= 200_000 => 6,
        p if p >= 50_000 => 8,
        _ => 10,
    }
}

/// Category named by a feature's `category` or `featurecla` property
pub fn parse_category(name: &str) -> Option<Category> {
    let name = name.to_ascii_lowercase();
    let category = match name.as_str() {
        "city" | "populated place" | "admin-0 capital" | "admin-1 capital" => Category::City,
        "terrain" | "mountain" | "range/mtn" | "plateau" => Category::Terrain,
        "landing site" | "landing_site" => Category::LandingSite,
        "crater" => Category::Crater,
        "mare" | "maria" => Category::Mare,
        "other" | "other place" => Category::OtherPlace,
        _ => return None,
    };
    Some(category)
}

/// Load every point feature of a GeoJSON file as a placemark
pub fn load_placemarks(path: &Path) -> Result<Vec<Placemark>> {
    let mut bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let placemarks = parse_placemarks(&mut bytes).with_context(|| format!("parsing {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = placemarks.len(), "loaded placemarks");
    Ok(placemarks)
}

/// Parse GeoJSON text in place. Features without a point geometry are skipped.
pub fn parse_placemarks(bytes: &mut [u8]) -> Result<Vec<Placemark>> {
    let json: geojson::JsonValue = simd_json::serde::from_slice(bytes).context("invalid JSON")?;
    let geojson = GeoJson::from_json_value(json).context("invalid GeoJSON")?;

    let placemarks = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features.iter().filter_map(feature_placemark).collect(),
        GeoJson::Feature(f) => feature_placemark(&f).into_iter().collect(),
        GeoJson::Geometry(_) => Vec::new(),
    };
    Ok(placemarks)
}

fn feature_placemark(feature: &Feature) -> Option<Placemark> {
    let coords = match &feature.geometry.as_ref()?.value {
        Value::Point(coords) if coords.len() >= 2 => coords,
        _ => return None,
    };
    let props = feature.properties.as_ref();

    let name = props
        .and_then(|p| p.get("name"))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    let population = props.and_then(population_of);

    let category = props
        .and_then(|p| p.get("category").or_else(|| p.get("featurecla")))
        .and_then(|v| v.as_str())
        .and_then(parse_category)
        .unwrap_or(if population.is_some() {
            Category::City
        } else {
            Category::Unclassified
        });

    let explicit = props
        .and_then(|p| p.get("rank"))
        .and_then(|v| v.as_u64())
        .map(|r| r.min(MAX_POPULARITY_RANK as u64) as u8);

    let rank = explicit.unwrap_or_else(|| match population {
        Some(pop) if is_flagged(props, "adm0cap") || is_flagged(props, "megacity") => {
            rank_for_population(pop).saturating_sub(1)
        }
        Some(pop) => rank_for_population(pop),
        None => category.default_rank(),
    });

    Some(
        Placemark::new(name, coords[0], coords[1])
            .with_category(category)
            .with_rank(rank),
    )
}

fn population_of(props: &JsonObject) -> Option<u64> {
    props
        .get("pop_max")
        .or_else(|| props.get("pop_min"))
        .or_else(|| props.get("population"))
        .and_then(|v| v.as_f64())
        .filter(|v| *v >= 0.0)
        .map(|v| v as u64)
}

fn is_flagged(props: Option<&JsonObject>, key: &str) -> bool {
    props
        .and_then(|p| p.get(key))
        .and_then(|v| v.as_f64())
        .is_some_and(|v| v >= 1.0)
}

/// Major world cities, used when no data file is available
pub fn sample_placemarks() -> Vec<Placemark> {
    let cities: [(&str, f64, f64, u64, bool); 20] = [
        ("New York", -74.0, 40.7, 18_800_000, false),
        ("London", -0.1, 51.5, 9_000_000, true),
        ("Paris", 2.3, 48.9, 11_000_000, true),
        ("Tokyo", 139.7, 35.7, 37_400_000, true),
        ("Sydney", 151.2, -33.9, 5_300_000, false),
        ("Rio", -43.2, -22.9, 13_500_000, false),
        ("Moscow", 37.6, 55.8, 12_500_000, true),
        ("Beijing", 116.4, 39.9, 21_500_000, true),
        ("Delhi", 77.2, 28.6, 32_900_000, true),
        ("Los Angeles", -118.2, 34.0, 12_400_000, false),
        ("Washington", -77.0, 38.9, 5_300_000, true),
        ("Mexico City", -99.1, 19.4, 21_800_000, true),
        ("Buenos Aires", -58.4, -34.6, 15_000_000, true),
        ("Cairo", 31.2, 30.0, 21_300_000, true),
        ("Lagos", 3.4, 6.5, 15_400_000, false),
        ("Berlin", 13.4, 52.5, 3_600_000, true),
        ("Madrid", -3.7, 40.4, 6_600_000, true),
        ("Lyon", 4.8, 45.8, 1_700_000, false),
        ("Geneva", 6.1, 46.2, 600_000, false),
        ("Auckland", 174.8, -36.8, 1_700_000, false),
    ];

    let mut placemarks: Vec<Placemark> = cities
        .iter()
        .map(|&(name, lon, lat, population, capital)| {
            let rank = rank_for_population(population);
            Placemark::new(name, lon, lat)
                .with_category(Category::City)
                .with_rank(if capital { rank.saturating_sub(1) } else { rank })
        })
        .collect();

    let features = [
        ("Everest", 86.9, 28.0, Category::Terrain),
        ("Kilimanjaro", 37.4, -3.1, Category::Terrain),
        ("Aconcagua", -70.0, -32.7, Category::Terrain),
        ("Barringer Crater", -111.0, 35.0, Category::Crater),
        ("Vredefort", 27.5, -27.0, Category::Crater),
        ("Point Nemo", -123.4, -48.9, Category::OtherPlace),
        ("Huygens", 167.5, -10.6, Category::LandingSite),
    ];
    placemarks.extend(features.iter().map(|&(name, lon, lat, category)| {
        Placemark::new(name, lon, lat)
            .with_category(category)
            .with_rank(category.default_rank())
    }));

    placemarks
}

/// Deterministic field of `count` placemarks spread over the globe
pub fn synthetic_placemarks(count: usize, seed: u64) -> Vec<Placemark> {
    (0..count as u64)
        .map(|i| {
            let lon = rand_simple(hash2(seed, i * 3)) * 360.0 - 180.0;
            let lat = rand_simple(hash2(seed, i * 3 + 1)) * 160.0 - 80.0;
            let rank = (rand_simple(hash2(seed, i * 3 + 2)) * (MAX_POPULARITY_RANK as f64 + 1.0)) as u8;
            Placemark::new(format!("Site {i}"), lon, lat).with_rank(rank)
        })
        .collect()
}
