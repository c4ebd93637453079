use std::collections::HashMap;

use crate::layout::geometry::{ScreenPoint, ScreenRect};
use crate::placemark::PlacemarkId;

/// Layout record of a placemark that is currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct VisiblePlacemark {
    id: PlacemarkId,
    serial: u64,
    added_at_radius: f64,
    /// Top-left corner of the symbol icon
    pub symbol_position: ScreenPoint,
    pub symbol_rect: ScreenRect,
    /// Empty when the placemark has no label text
    pub label_rect: ScreenRect,
}

impl VisiblePlacemark {
    pub fn id(&self) -> PlacemarkId {
        self.id
    }

    /// Distinct for every record ever created; a record kept across frames
    /// keeps its serial
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Viewport radius when the record was created
    pub fn added_at_radius(&self) -> f64 {
        self.added_at_radius
    }

    pub fn has_label(&self) -> bool {
        !self.label_rect.is_empty()
    }

    /// Whether `p` falls on the label or the symbol
    pub fn contains(&self, p: ScreenPoint) -> bool {
        self.label_rect.contains(p) || self.symbol_rect.contains(p)
    }
}

/// Identity-keyed store of layout records.
///
/// Mirrors the set of placemarks that are currently displayable; records
/// leave only through `release` or `retain`.
#[derive(Debug, Default)]
pub struct VisibleRegistry {
    records: HashMap<PlacemarkId, VisiblePlacemark>,
    next_serial: u64,
}

impl VisibleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: PlacemarkId) -> Option<&VisiblePlacemark> {
        self.records.get(&id)
    }

    pub fn get_or_create(&mut self, id: PlacemarkId, radius: f64) -> &mut VisiblePlacemark {
        let next_serial = &mut self.next_serial;
        self.records.entry(id).or_insert_with(|| {
            let serial = *next_serial;
            *next_serial += 1;
            VisiblePlacemark {
                id,
                serial,
                added_at_radius: radius,
                symbol_position: ScreenPoint::new(0.0, 0.0),
                symbol_rect: ScreenRect::new(0.0, 0.0, 0.0, 0.0),
                label_rect: ScreenRect::new(0.0, 0.0, 0.0, 0.0),
            }
        })
    }

    pub fn release(&mut self, id: PlacemarkId) -> Option<VisiblePlacemark> {
        self.records.remove(&id)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(PlacemarkId) -> bool) {
        self.records.retain(|&id, _| keep(id));
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
