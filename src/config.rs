use crate::index::MAX_TILE_LEVEL;
use crate::placemark::{Category, MAX_POPULARITY_RANK};

/// Globe radius breakpoints in pixels, from building-level zoom down to
/// the whole planet. A viewport hides one more popularity rank for every
/// breakpoint larger than its radius.
pub const RADIUS_BREAKPOINTS: [f64; 21] = [
    12_000_000.0,
    6_000_000.0,
    3_000_000.0,
    1_500_000.0,
    750_000.0,
    380_000.0,
    190_000.0,
    95_000.0,
    48_000.0,
    24_000.0,
    12_000.0,
    6_000.0,
    3_000.0,
    1_600.0,
    1_000.0,
    700.0,
    500.0,
    350.0,
    250.0,
    180.0,
    120.0,
];

/// Level-of-detail policy: which popularity ranks a zoom level admits and
/// how ranks map onto tile levels
#[derive(Debug, Clone, PartialEq)]
pub struct PopularityPolicy {
    /// Strictly descending
    pub radius_breakpoints: Vec<f64>,
    pub max_rank: u8,
}

impl PopularityPolicy {
    /// Stock table with every breakpoint multiplied by `factor`, for
    /// displays whose pixels are coarser than a desktop screen
    pub fn scaled(factor: f64) -> Self {
        Self {
            radius_breakpoints: RADIUS_BREAKPOINTS.iter().map(|r| r * factor).collect(),
            max_rank: MAX_POPULARITY_RANK,
        }
    }

    /// Least important rank still shown at `radius`
    pub fn threshold(&self, radius: f64) -> u8 {
        let hidden = self
            .radius_breakpoints
            .iter()
            .take_while(|&&breakpoint| radius < breakpoint)
            .count();
        let hidden = u8::try_from(hidden).unwrap_or(u8::MAX);
        self.max_rank.saturating_sub(hidden)
    }

    /// Tile level holding placemarks of `rank`; more important ranks live
    /// in shallower, larger tiles
    pub fn level_for_rank(&self, rank: u8) -> u8 {
        (rank.min(self.max_rank) / 2).min(MAX_TILE_LEVEL)
    }
}

impl Default for PopularityPolicy {
    fn default() -> Self {
        Self {
            radius_breakpoints: RADIUS_BREAKPOINTS.to_vec(),
            max_rank: MAX_POPULARITY_RANK,
        }
    }
}

/// Category visibility toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryFilter {
    pub show_cities: bool,
    pub show_terrain: bool,
    pub show_other_places: bool,
    pub show_landing_sites: bool,
    pub show_craters: bool,
    pub show_maria: bool,
}

impl CategoryFilter {
    pub fn allows(&self, category: Category) -> bool {
        match category {
            Category::City => self.show_cities,
            Category::Terrain => self.show_terrain,
            Category::OtherPlace => self.show_other_places,
            Category::LandingSite => self.show_landing_sites,
            Category::Crater => self.show_craters,
            Category::Mare => self.show_maria,
            Category::Unclassified => true,
        }
    }

    pub fn toggle(&mut self, category: Category) {
        match category {
            Category::City => self.show_cities = !self.show_cities,
            Category::Terrain => self.show_terrain = !self.show_terrain,
            Category::OtherPlace => self.show_other_places = !self.show_other_places,
            Category::LandingSite => self.show_landing_sites = !self.show_landing_sites,
            Category::Crater => self.show_craters = !self.show_craters,
            Category::Mare => self.show_maria = !self.show_maria,
            Category::Unclassified => {}
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            show_cities: true,
            show_terrain: true,
            show_other_places: true,
            show_landing_sites: true,
            show_craters: true,
            show_maria: true,
        }
    }
}

/// Layout engine settings
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// On-screen cap per frame
    pub max_visible: usize,
    /// Extra space around a glowing label, per side
    pub glow_margin: f64,
    /// Namespace tag stamped on every tile id
    pub namespace: u32,
    pub categories: CategoryFilter,
    pub popularity: PopularityPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_visible: 100,
            glow_margin: 2.0,
            namespace: 0,
            categories: CategoryFilter::default(),
            popularity: PopularityPolicy::default(),
        }
    }
}
