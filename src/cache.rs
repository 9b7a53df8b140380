//! Identity caches mapping host records to their façades.
//!
//! Entries are keyed by the record's allocation and hold only weak handles,
//! so a cache never keeps a record or a façade alive. A façade keeps its
//! record alive, which means an entry stays valid for exactly as long as
//! someone holds the façade.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use msgcore::model::Record;

const MIN_SWEEP_AT: usize = 64;

struct Entry<R, F> {
    record: Weak<RefCell<R>>,
    facade: Weak<F>,
}

impl<R, F> Entry<R, F> {
    fn is_live(&self) -> bool {
        self.record.strong_count() > 0 && self.facade.strong_count() > 0
    }
}

/// One façade per record, compared by reference.
pub struct IdentityCache<R, F> {
    entries: HashMap<*const RefCell<R>, Entry<R, F>>,
    sweep_at: usize,
}

impl<R, F> Default for IdentityCache<R, F> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            sweep_at: MIN_SWEEP_AT,
        }
    }
}

impl<R, F> IdentityCache<R, F> {
    pub fn new() -> Self {
        Default::default()
    }

    /// The live façade registered for `record`, if any.
    pub fn get(&self, record: &Record<R>) -> Option<Rc<F>> {
        let entry = self.entries.get(&Rc::as_ptr(record))?;
        // the address may belong to a freed record that has since been reused
        match entry.record.upgrade() {
            Some(cached) if Rc::ptr_eq(&cached, record) => entry.facade.upgrade(),
            _ => None,
        }
    }

    /// Registers `facade` for `record`, replacing whatever was there.
    pub fn insert(&mut self, record: &Record<R>, facade: &Rc<F>) {
        if self.entries.len() >= self.sweep_at {
            self.sweep();
            self.sweep_at = (self.entries.len() * 2).max(MIN_SWEEP_AT);
        }

        self.entries.insert(Rc::as_ptr(record), Entry {
            record: Rc::downgrade(record),
            facade: Rc::downgrade(facade),
        });
    }

    /// Returns the façade for `record`, building and registering one with
    /// `make` on a miss. `make` is not called on a hit.
    pub fn wrap(&mut self, record: &Record<R>, make: impl FnOnce() -> F) -> Rc<F> {
        if let Some(facade) = self.get(record) {
            return facade;
        }

        let facade = Rc::new(make());
        self.insert(record, &facade);
        facade
    }

    /// Drops entries whose record or façade is gone.
    pub fn sweep(&mut self) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live());
        log::trace!("swept {} dead cache entries", before - self.entries.len());
    }

    /// Number of entries, including dead ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use msgcore::model::record;

    use super::*;

    struct Facade {
        record: Record<u32>,
        label: &'static str,
    }

    #[test]
    fn test_same_record_same_facade() {
        let mut cache = IdentityCache::new();
        let r = record(1u32);

        let a = cache.wrap(&r, || Facade { record: r.clone(), label: "first" });
        let b = cache.wrap(&r, || Facade { record: r.clone(), label: "second" });

        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(b.label, "first");
    }

    #[test]
    fn test_equal_records_distinct_facades() {
        let mut cache = IdentityCache::new();
        let r1 = record(1u32);
        let r2 = record(1u32);

        let a = cache.wrap(&r1, || Facade { record: r1.clone(), label: "a" });
        let b = cache.wrap(&r2, || Facade { record: r2.clone(), label: "b" });

        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_does_not_extend_lifetime() {
        let mut cache = IdentityCache::new();
        let r = record(7u32);
        let weak = Rc::downgrade(&r);

        let facade = cache.wrap(&r, || Facade { record: r.clone(), label: "x" });
        assert_eq!(Rc::strong_count(&r), 2);

        drop(facade);
        assert_eq!(Rc::strong_count(&r), 1);
        drop(r);
        assert!(weak.upgrade().is_none());

        cache.sweep();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_dead_facade_is_rebuilt() {
        let mut cache = IdentityCache::new();
        let r = record(7u32);

        drop(cache.wrap(&r, || Facade { record: r.clone(), label: "old" }));
        let again = cache.wrap(&r, || Facade { record: r.clone(), label: "new" });

        assert_eq!(again.label, "new");
        assert_eq!(*again.record.borrow(), 7);
    }

    #[test]
    fn test_insert_aliases_records() {
        let mut cache = IdentityCache::new();
        let old = record(1u32);
        let new = record(2u32);

        let facade = cache.wrap(&old, || Facade { record: old.clone(), label: "x" });
        cache.insert(&new, &facade);

        assert!(Rc::ptr_eq(&cache.get(&old).unwrap(), &facade));
        assert!(Rc::ptr_eq(&cache.get(&new).unwrap(), &facade));
    }

    #[test]
    fn test_sweeps_as_it_grows() {
        let mut cache = IdentityCache::new();
        for i in 0..(MIN_SWEEP_AT as u32 * 4) {
            let r = record(i);
            let _ = cache.wrap(&r, || Facade { record: r.clone(), label: "tmp" });
        }

        assert!(cache.len() <= MIN_SWEEP_AT + 1);
    }
}
