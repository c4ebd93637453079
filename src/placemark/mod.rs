//! Placemarks as the layout engine sees them: a read-only store with stable
//! ids, the user selection, and the per-placemark style descriptor.

mod style;

pub use style::{FontSpec, LabelAlignment, MonospaceMetrics, PlacemarkStyle, TextMeasurer};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::geo::GeoPoint;

/// Least important popularity rank. Rank 0 is the most important.
pub const MAX_POPULARITY_RANK: u8 = 20;

/// Stable placemark identity, assigned by [`PlacemarkStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlacemarkId(pub u64);

/// Category tag used by the visibility toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    City,
    Terrain,
    OtherPlace,
    LandingSite,
    Crater,
    Mare,
    /// Not covered by any toggle; always shown
    Unclassified,
}

impl Category {
    /// Rank used by loaders when a feature carries no explicit rank
    pub fn default_rank(self) -> u8 {
        match self {
            Category::City => 8,
            Category::Mare => 6,
            Category::Terrain => 10,
            Category::Crater => 12,
            Category::LandingSite => 14,
            Category::OtherPlace => 16,
            Category::Unclassified => 18,
        }
    }
}

/// A position source whose value depends on something outside the
/// placemark, typically a clock. `None` means the source cannot tell.
pub trait TrackSource: Send + Sync {
    fn position(&self) -> Option<GeoPoint>;
}

#[derive(Clone)]
pub enum Coordinates {
    Fixed(GeoPoint),
    Tracked(Arc<dyn TrackSource>),
}

impl Coordinates {
    /// Current position, or `None` when it cannot be resolved
    pub fn resolve(&self) -> Option<GeoPoint> {
        let p = match self {
            Coordinates::Fixed(p) => *p,
            Coordinates::Tracked(track) => track.position()?,
        };
        p.is_finite().then_some(p)
    }
}

impl fmt::Debug for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinates::Fixed(p) => f.debug_tuple("Fixed").field(p).finish(),
            Coordinates::Tracked(_) => f.write_str("Tracked(..)"),
        }
    }
}

/// A named point of interest
#[derive(Debug, Clone)]
pub struct Placemark {
    pub name: String,
    pub coordinates: Coordinates,
    pub popularity_rank: u8,
    pub visible: bool,
    pub category: Category,
    pub style: PlacemarkStyle,
}

impl Placemark {
    pub fn new(name: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            name: name.into(),
            coordinates: Coordinates::Fixed(GeoPoint::new(lon, lat)),
            popularity_rank: Category::Unclassified.default_rank(),
            visible: true,
            category: Category::Unclassified,
            style: PlacemarkStyle::default(),
        }
    }

    pub fn tracked(name: impl Into<String>, track: Arc<dyn TrackSource>) -> Self {
        Self {
            coordinates: Coordinates::Tracked(track),
            ..Self::new(name, 0.0, 0.0)
        }
    }

    pub fn with_rank(mut self, rank: u8) -> Self {
        self.popularity_rank = rank.min(MAX_POPULARITY_RANK);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_style(mut self, style: PlacemarkStyle) -> Self {
        self.style = style;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// The placemark collection.
///
/// Every mutation bumps `generation`; the layout engine compares it at the
/// start of each pass to decide whether its caches are stale.
#[derive(Debug, Default)]
pub struct PlacemarkStore {
    entries: Vec<(PlacemarkId, Placemark)>,
    index: HashMap<PlacemarkId, usize>,
    next_id: u64,
    generation: u64,
}

impl PlacemarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, placemark: Placemark) -> PlacemarkId {
        let id = PlacemarkId(self.next_id);
        self.next_id += 1;
        self.index.insert(id, self.entries.len());
        self.entries.push((id, placemark));
        self.generation += 1;
        id
    }

    pub fn remove(&mut self, id: PlacemarkId) -> Option<Placemark> {
        let pos = self.index.remove(&id)?;
        let (_, placemark) = self.entries.remove(pos);
        for (i, (other, _)) in self.entries.iter().enumerate().skip(pos) {
            self.index.insert(*other, i);
        }
        self.generation += 1;
        Some(placemark)
    }

    /// Replace the whole collection. Ids are never reused.
    pub fn reset(&mut self, placemarks: impl IntoIterator<Item = Placemark>) -> Vec<PlacemarkId> {
        self.entries.clear();
        self.index.clear();
        let ids = placemarks
            .into_iter()
            .map(|p| {
                let id = PlacemarkId(self.next_id);
                self.next_id += 1;
                self.index.insert(id, self.entries.len());
                self.entries.push((id, p));
                id
            })
            .collect();
        self.generation += 1;
        ids
    }

    pub fn get(&self, id: PlacemarkId) -> Option<&Placemark> {
        self.index.get(&id).map(|&i| &self.entries[i].1)
    }

    /// Position of `id` in store order
    pub fn index_of(&self, id: PlacemarkId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn entry(&self, index: usize) -> Option<(PlacemarkId, &Placemark)> {
        self.entries.get(index).map(|(id, p)| (*id, p))
    }

    pub fn entries(&self) -> &[(PlacemarkId, Placemark)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlacemarkId, &Placemark)> {
        self.entries.iter().map(|(id, p)| (*id, p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Placemarks highlighted by the user, in selection order
#[derive(Debug, Default, Clone)]
pub struct Selection {
    ids: Vec<PlacemarkId>,
    generation: u64,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: PlacemarkId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
            self.generation += 1;
        }
    }

    pub fn deselect(&mut self, id: PlacemarkId) {
        let before = self.ids.len();
        self.ids.retain(|&other| other != id);
        if self.ids.len() != before {
            self.generation += 1;
        }
    }

    pub fn toggle(&mut self, id: PlacemarkId) {
        if self.contains(id) {
            self.deselect(id);
        } else {
            self.select(id);
        }
    }

    pub fn clear(&mut self) {
        if !self.ids.is_empty() {
            self.ids.clear();
            self.generation += 1;
        }
    }

    pub fn contains(&self, id: PlacemarkId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[PlacemarkId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
