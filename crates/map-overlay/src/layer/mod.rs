use std::collections::BTreeMap;
use std::fmt;

use crate::feature::Geometry;

/// Identifies a layer on a map. Ids are handed out in insertion order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(u64);

impl LayerId {
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The geometry layers on a map, drawn in id order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Layers {
    by_id: BTreeMap<LayerId, Geometry>,
    next_id: u64,
}

impl Layers {
    /// Adds a layer. It starts out dirty, so the next pass projects it.
    pub fn add<G: Into<Geometry>>(&mut self, geometry: G) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        let mut geometry = geometry.into();
        geometry.mark_dirty();

        debug!(message = "added layer", layer = %id, kind = ?geometry.kind());
        self.by_id.insert(id, geometry);
        id
    }

    /// Removes a layer, dropping any projected state it had.
    pub fn remove(&mut self, id: LayerId) -> Option<Geometry> {
        let mut geometry = self.by_id.remove(&id)?;
        geometry.detach();

        debug!(message = "removed layer", layer = %id, kind = ?geometry.kind());
        Some(geometry)
    }

    #[inline]
    pub fn get(&self, id: LayerId) -> Option<&Geometry> {
        self.by_id.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut Geometry> {
        self.by_id.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LayerId, &Geometry)> + '_ {
        self.by_id.iter().map(|(id, geom)| (*id, geom))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (LayerId, &mut Geometry)> + '_ {
        self.by_id.iter_mut().map(|(id, geom)| (*id, geom))
    }

    /// Marks every layer dirty, after the view changes.
    pub fn mark_all_dirty(&mut self) {
        for geometry in self.by_id.values_mut() {
            geometry.mark_dirty();
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use geo::{LatLng, Radii};

    use super::*;
    use crate::config::EllipseOptions;
    use crate::feature::{LayerState, ellipse};

    #[test]
    fn test_layers() {
        let mut layers = Layers::default();
        let center = LatLng::new_checked(0.0, 0.0).unwrap();

        let mut geometry: Geometry = ellipse(
            center,
            Some(Radii::new(10.0, 10.0)),
            None,
            EllipseOptions::default(),
        )
        .into();
        geometry.set_state(LayerState::Idle);

        let first = layers.add(geometry.clone());
        let second = layers.add(geometry);

        assert!(first < second);
        assert_eq!(layers.len(), 2);
        assert_eq!(layers.get(first).unwrap().state(), LayerState::Dirty);

        let removed = layers.remove(first).unwrap();
        assert_eq!(removed.state(), LayerState::Dirty);
        assert!(layers.remove(first).is_none());

        let third = layers.add(removed);
        assert!(third > second);
        assert_eq!(
            layers.iter().map(|(id, _)| id).collect::<Vec<_>>(),
            vec![second, third]
        );
    }
}
