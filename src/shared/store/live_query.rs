use parking_lot::Mutex;
use std::collections::HashMap;

use crate::log_debug;

use super::entity::Entity;
use super::entity_store::EntityStore;

/// How parents without matching children are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Parents with no matching children are omitted from the output.
    Inner,
    /// Every parent appears; a missing count defaults to zero.
    Left,
}

/// Read-only derived view joining a parent store against a per-key count
/// of a child store.
///
/// The view recomputes lazily: a read first checks the upstream version
/// counters and rebuilds the cached rows only when either store changed.
/// A single read always returns one coherent snapshot; a recomputation
/// that raced with a mutation is simply superseded on the next read.
pub struct AggregationView<P: Entity, C: Entity, R> {
    name: &'static str,
    parents: EntityStore<P>,
    children: EntityStore<C>,
    child_key: fn(&C) -> i64,
    filter: Option<fn(&C) -> bool>,
    join: JoinKind,
    project: fn(&P, u64) -> R,
    cache: Mutex<Option<Cached<R>>>,
}

struct Cached<R> {
    parent_version: u64,
    child_version: u64,
    rows: Vec<R>,
}

impl<P, C, R> AggregationView<P, C, R>
where
    P: Entity,
    C: Entity,
    R: Clone + Send,
{
    pub fn new(
        name: &'static str,
        parents: EntityStore<P>,
        children: EntityStore<C>,
        child_key: fn(&C) -> i64,
        join: JoinKind,
        project: fn(&P, u64) -> R,
    ) -> Self {
        Self {
            name,
            parents,
            children,
            child_key,
            filter: None,
            join,
            project,
            cache: Mutex::new(None),
        }
    }

    /// Restricts which children count toward their parent's total.
    pub fn with_filter(mut self, filter: fn(&C) -> bool) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn join_kind(&self) -> JoinKind {
        self.join
    }

    /// Current rows, recomputed first if any upstream store changed since
    /// the last read.
    pub fn read(&self) -> Vec<R> {
        let parent_version = self.parents.version();
        let child_version = self.children.version();

        {
            let cache = self.cache.lock();
            if let Some(cached) = cache.as_ref() {
                if cached.parent_version == parent_version
                    && cached.child_version == child_version
                {
                    return cached.rows.clone();
                }
            }
        }

        let rows = self.compute();
        *self.cache.lock() = Some(Cached {
            parent_version,
            child_version,
            rows: rows.clone(),
        });
        rows
    }

    fn compute(&self) -> Vec<R> {
        let children = self.children.snapshot();
        let mut counts: HashMap<i64, u64> = HashMap::new();
        for child in &children {
            if let Some(filter) = self.filter {
                if !filter(child) {
                    continue;
                }
            }
            *counts.entry((self.child_key)(child)).or_insert(0) += 1;
        }

        let parents = self.parents.snapshot();
        let mut rows = Vec::with_capacity(parents.len());
        for parent in &parents {
            match (self.join, counts.get(&parent.key())) {
                (JoinKind::Left, found) => {
                    rows.push((self.project)(parent, found.copied().unwrap_or(0)));
                }
                (JoinKind::Inner, Some(&count)) => {
                    rows.push((self.project)(parent, count));
                }
                (JoinKind::Inner, None) => {}
            }
        }

        log_debug!(
            "view {}: recomputed {} rows from {} parents / {} children",
            self.name,
            rows.len(),
            parents.len(),
            children.len()
        );
        rows
    }
}
