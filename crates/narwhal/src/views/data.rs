//! Projections of a keyed source onto one value per key.

use crate::FxIndexMap;
use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;
use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;

/// Something a [`DataView`] can project: a keyed sequence of items.
pub trait DataSource<'g> {
    type Key: Clone + Eq + Hash;
    type Item;

    fn entries(&self) -> Box<dyn Iterator<Item = (Self::Key, Self::Item)> + 'g>;

    fn entry(&self, key: &Self::Key) -> Option<Self::Item>;
}

/// Lazily maps each item of a source through an extraction function.
///
/// Keys whose extraction yields `None` are absent from the view. Building the view does no
/// work; [`DataView::get`] evaluates a key once and remembers the result.
pub struct DataView<'g, S: DataSource<'g>, T> {
    source: S,
    extract: Box<dyn Fn(S::Item) -> Option<T> + 'g>,
    memo: RefCell<HashMap<S::Key, Option<T>, FxBuildHasher>>,
}

impl<'g, S, T> DataView<'g, S, T>
where
    S: DataSource<'g>,
    T: Clone,
{
    pub(crate) fn new(source: S, extract: impl Fn(S::Item) -> Option<T> + 'g) -> Self {
        Self {
            source,
            extract: Box::new(extract),
            memo: RefCell::new(HashMap::default()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn iter(&self) -> impl Iterator<Item = (S::Key, T)> + '_ {
        self.source
            .entries()
            .filter_map(|(key, item)| (self.extract)(item).map(|value| (key, value)))
    }

    pub fn keys(&self) -> impl Iterator<Item = S::Key> + '_ {
        self.iter().map(|(key, _)| key)
    }

    pub fn get(&self, key: &S::Key) -> Option<T> {
        if let Some(hit) = self.memo.borrow().get(key) {
            return hit.clone();
        }
        let value = self.source.entry(key).and_then(|item| (self.extract)(item));
        self.memo.borrow_mut().insert(key.clone(), value.clone());
        value
    }

    pub fn contains(&self, key: &S::Key) -> bool {
        self.get(key).is_some()
    }

    /// Number of present keys; walks the whole source.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn to_map(&self) -> FxIndexMap<S::Key, T> {
        self.iter().collect()
    }
}

impl<'g, S, T> fmt::Debug for DataView<'g, S, T>
where
    S: DataSource<'g>,
    S::Key: fmt::Debug,
    T: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
