use uuid::Uuid;

use crate::entities::{Coordinates, Route, Stop};
use crate::error::{invariant_violation_error, Error};

/// The single source of truth for route identity and order. Every other
/// component reads snapshots; nothing else holds a mutable alias of the
/// stop collection.
#[derive(Debug, Default)]
pub struct StopStore {
    stops: Vec<Stop>,
}

impl StopStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn snapshot(&self) -> Route {
        Route {
            stops: self.stops.clone(),
        }
    }

    pub fn find(&self, id: Uuid) -> Option<&Stop> {
        self.stops.iter().find(|stop| stop.id == id)
    }

    /// Appends a stop with a fresh id and a pending label. Label
    /// resolution is the caller's side effect and must land via
    /// `set_label`, never by position.
    pub fn add(&mut self, at: Coordinates) -> Stop {
        let stop = Stop::new(at);
        self.stops.push(stop.clone());
        stop
    }

    /// Silent no-op when the id is unknown.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.stops.len();
        self.stops.retain(|stop| stop.id != id);
        self.stops.len() < before
    }

    pub fn set_position(&mut self, id: Uuid, to: Coordinates) -> bool {
        match self.stops.iter_mut().find(|stop| stop.id == id) {
            Some(stop) => {
                stop.coordinates = to;
                true
            }
            None => false,
        }
    }

    /// Applies a resolved label by id. Returns false when the stop has
    /// been removed in the meantime; the label is discarded, the stop is
    /// never resurrected.
    pub fn set_label(&mut self, id: Uuid, label: String) -> bool {
        match self.stops.iter_mut().find(|stop| stop.id == id) {
            Some(stop) => {
                stop.label = Some(label);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.stops.clear();
    }

    /// Adopts a new visiting order. `order` must be a permutation of the
    /// current id set; anything else leaves the store untouched and fails,
    /// the store never silently drops or duplicates a stop.
    pub fn replace_order(&mut self, order: &[Uuid]) -> Result<(), Error> {
        if order.len() != self.stops.len() {
            return Err(invariant_violation_error());
        }

        let mut unclaimed = self.stops.clone();
        let mut reordered = Vec::with_capacity(order.len());

        for id in order {
            match unclaimed.iter().position(|stop| stop.id == *id) {
                Some(index) => reordered.push(unclaimed.swap_remove(index)),
                None => return Err(invariant_violation_error()),
            }
        }

        self.stops = reordered;
        Ok(())
    }
}

#[test]
fn ids_are_unique_across_adds_and_removes() {
    use std::collections::HashSet;

    let mut store = StopStore::new();

    let at = Coordinates {
        lat: 19.07,
        lng: 72.87,
    };

    let first = store.add(at);
    let second = store.add(at);
    let third = store.add(at);

    store.remove(second.id);
    let fourth = store.add(at);

    let ids: HashSet<Uuid> = store.snapshot().stops.iter().map(|stop| stop.id).collect();

    assert_eq!(store.len(), 3);
    assert_eq!(ids.len(), 3);
    assert!(ids.contains(&first.id));
    assert!(ids.contains(&third.id));
    assert!(ids.contains(&fourth.id));
}

#[test]
fn remove_unknown_id_is_a_noop() {
    let mut store = StopStore::new();

    store.add(Coordinates {
        lat: 19.07,
        lng: 72.87,
    });

    assert!(!store.remove(Uuid::new_v4()));
    assert_eq!(store.len(), 1);
}

#[test]
fn label_lands_by_id_not_position() {
    let mut store = StopStore::new();

    let first = store.add(Coordinates {
        lat: 19.07,
        lng: 72.87,
    });
    let second = store.add(Coordinates {
        lat: 19.08,
        lng: 72.88,
    });

    // first stop disappears before its label resolves
    store.remove(first.id);

    assert!(!store.set_label(first.id, "late".into()));
    assert!(store.set_label(second.id, "kept".into()));

    let route = store.snapshot();
    assert_eq!(route.len(), 1);
    assert_eq!(route.stops[0].label.as_deref(), Some("kept"));
}

#[test]
fn replace_order_accepts_any_permutation() {
    let mut store = StopStore::new();

    let a = store.add(Coordinates {
        lat: 1.0,
        lng: 1.0,
    });
    let b = store.add(Coordinates {
        lat: 2.0,
        lng: 2.0,
    });
    let c = store.add(Coordinates {
        lat: 3.0,
        lng: 3.0,
    });

    store.replace_order(&[c.id, a.id, b.id]).unwrap();

    let ids: Vec<Uuid> = store.snapshot().stops.iter().map(|stop| stop.id).collect();
    assert_eq!(ids, vec![c.id, a.id, b.id]);
}

#[test]
fn replace_order_rejects_non_permutations() {
    let mut store = StopStore::new();

    let a = store.add(Coordinates {
        lat: 1.0,
        lng: 1.0,
    });
    let b = store.add(Coordinates {
        lat: 2.0,
        lng: 2.0,
    });

    // wrong cardinality
    assert_eq!(store.replace_order(&[a.id]).unwrap_err().code, 10);

    // duplicated id
    assert_eq!(store.replace_order(&[a.id, a.id]).unwrap_err().code, 10);

    // foreign id
    assert_eq!(
        store
            .replace_order(&[a.id, Uuid::new_v4()])
            .unwrap_err()
            .code,
        10
    );

    // every failure leaves the store untouched
    let ids: Vec<Uuid> = store.snapshot().stops.iter().map(|stop| stop.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
}

#[test]
fn clear_empties_the_store() {
    let mut store = StopStore::new();

    store.add(Coordinates {
        lat: 1.0,
        lng: 1.0,
    });
    store.add(Coordinates {
        lat: 2.0,
        lng: 2.0,
    });

    store.clear();

    assert!(store.is_empty());
    assert!(store.snapshot().is_empty());
}
