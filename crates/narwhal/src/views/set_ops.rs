//! Set capabilities shared by node, edge and neighbor views.
//!
//! [`SetAlgebra`] is derived from [`KeyedCollection`] alone (key iteration plus membership),
//! so every view that can enumerate and test its keys gets the full set vocabulary.

use crate::FxIndexSet;
use std::hash::Hash;

pub trait KeyedCollection {
    type Key: Clone + Eq + Hash;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains_key(&self, key: &Self::Key) -> bool;

    /// Owned keys in iteration order.
    fn keys_owned(&self) -> impl Iterator<Item = Self::Key> + '_;

    /// Canonical form of `key` when it is a member.
    ///
    /// Views where several spellings denote one member (undirected edges) return the stored
    /// spelling, so results built from foreign keys never contain the same member twice.
    fn resolve_key(&self, key: &Self::Key) -> Option<Self::Key> {
        self.contains_key(key).then(|| key.clone())
    }

    /// The other spelling of `key` when the collection treats it as an unordered pair.
    fn mirrored_key(&self, _key: &Self::Key) -> Option<Self::Key> {
        None
    }
}

pub trait SetAlgebra: KeyedCollection {
    fn union<I>(&self, other: I) -> FxIndexSet<Self::Key>
    where
        I: IntoIterator<Item = Self::Key>,
    {
        let mut out: FxIndexSet<Self::Key> = self.keys_owned().collect();
        for key in other {
            insert_resolved(self, &mut out, key);
        }
        out
    }

    fn intersection<I>(&self, other: I) -> FxIndexSet<Self::Key>
    where
        I: IntoIterator<Item = Self::Key>,
    {
        let other = resolve_all(self, other);
        self.keys_owned().filter(|key| other.contains(key)).collect()
    }

    fn difference<I>(&self, other: I) -> FxIndexSet<Self::Key>
    where
        I: IntoIterator<Item = Self::Key>,
    {
        let other = resolve_all(self, other);
        self.keys_owned().filter(|key| !other.contains(key)).collect()
    }

    fn symmetric_difference<I>(&self, other: I) -> FxIndexSet<Self::Key>
    where
        I: IntoIterator<Item = Self::Key>,
    {
        let other = resolve_all(self, other);
        let mut out: FxIndexSet<Self::Key> =
            self.keys_owned().filter(|key| !other.contains(key)).collect();
        out.extend(other.into_iter().filter(|key| !self.contains_key(key)));
        out
    }

    fn is_subset<I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = Self::Key>,
    {
        let other = resolve_all(self, other);
        self.keys_owned().all(|key| other.contains(&key))
    }

    fn is_superset<I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = Self::Key>,
    {
        other.into_iter().all(|key| self.contains_key(&key))
    }

    fn is_disjoint<I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = Self::Key>,
    {
        !other.into_iter().any(|key| self.contains_key(&key))
    }

    /// Set equality: same members, ignoring order and duplicates.
    fn set_eq<I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = Self::Key>,
    {
        let other = resolve_all(self, other);
        let mine: FxIndexSet<Self::Key> = self.keys_owned().collect();
        mine.len() == other.len() && mine.iter().all(|key| other.contains(key))
    }
}

impl<T: KeyedCollection + ?Sized> SetAlgebra for T {}

fn resolve_all<C, I>(collection: &C, keys: I) -> FxIndexSet<C::Key>
where
    C: KeyedCollection + ?Sized,
    I: IntoIterator<Item = C::Key>,
{
    let mut out = FxIndexSet::default();
    for key in keys {
        insert_resolved(collection, &mut out, key);
    }
    out
}

/// Inserts the stored spelling of a member, or the first-seen spelling of a non-member.
fn insert_resolved<C>(collection: &C, out: &mut FxIndexSet<C::Key>, key: C::Key)
where
    C: KeyedCollection + ?Sized,
{
    let key = collection.resolve_key(&key).unwrap_or(key);
    if collection
        .mirrored_key(&key)
        .is_some_and(|mirror| out.contains(&mirror))
    {
        return;
    }
    out.insert(key);
}
