//! Reference-stable header groups across renders.
//!
//! The column layout pass rebuilds every [`VirtualHeaderGroup`] on each
//! render. Downstream consumers memoize on pointer identity, so
//! [`VirtualHeaderGroupCache`] folds the fresh values into the previous
//! output and hands back the old [`Arc`]s wherever nothing changed:
//!
//! - a header equal to the cached header with the same id is reused,
//! - a group whose scalars, header order and headers are all unchanged is
//!   reused,
//! - the whole result slice is reused when no group changed and the group
//!   id sequence is the same as last time.
//!
//! # Usage
//!
//! ```
//! use vgrid_headers::{VirtualHeader, VirtualHeaderGroup, VirtualHeaderGroupCache};
//!
//! let build = || {
//!     vec![VirtualHeaderGroup::new("row-0", "depth-0")
//!         .header(VirtualHeader::new("name", "name", 0.0, 120.0))]
//! };
//!
//! let mut cache = VirtualHeaderGroupCache::new();
//! let first = cache.update(build());
//! let second = cache.update(build());
//! assert!(first.changed);
//! assert!(!second.changed);
//! assert!(std::sync::Arc::ptr_eq(&first.groups, &second.groups));
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::header::{VirtualHeader, VirtualHeaderGroup};

/// Result of [`VirtualHeaderGroupCache::update`].
#[derive(Debug, Clone)]
pub struct HeaderGroupUpdate {
    /// The stabilized groups, in input order.
    pub groups: Arc<[Arc<VirtualHeaderGroup>]>,
    /// Whether `groups` differs from the slice returned by the previous call.
    pub changed: bool,
    /// Per group: whether `groups[i]` is a new reference.
    pub group_changes: Vec<bool>,
}

impl HeaderGroupUpdate {
    /// Number of groups that are new references.
    #[must_use]
    pub fn changed_groups(&self) -> usize {
        self.group_changes.iter().filter(|&&changed| changed).count()
    }
}

/// Cache of the last emitted header groups, keyed by group id.
///
/// Lives as long as the owning table instance.
#[derive(Debug, Default)]
pub struct VirtualHeaderGroupCache {
    groups: FxHashMap<String, Arc<VirtualHeaderGroup>>,
    last_result: Option<Arc<[Arc<VirtualHeaderGroup>]>>,
}

impl VirtualHeaderGroupCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Drop every cached group and the last result.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.last_result = None;
    }

    /// Fold `new_groups` into the cache and return the stabilized result.
    pub fn update(&mut self, new_groups: Vec<VirtualHeaderGroup>) -> HeaderGroupUpdate {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("header_cache.update", groups = new_groups.len()).entered();

        let mut any_changed = false;
        let mut group_changes = Vec::with_capacity(new_groups.len());
        let mut updated = Vec::with_capacity(new_groups.len());

        for group in new_groups {
            let (stable, changed) = self.stabilize(group);
            any_changed |= changed;
            group_changes.push(changed);
            updated.push(stable);
        }

        if !any_changed {
            if let Some(last) = &self.last_result {
                let same_ids = last.len() == updated.len()
                    && last.iter().zip(&updated).all(|(old, new)| old.id == new.id);
                if same_ids {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        message = "header_cache.result",
                        groups = last.len(),
                        changed_groups = 0usize,
                        reused_result = true,
                    );
                    return HeaderGroupUpdate {
                        groups: Arc::clone(last),
                        changed: false,
                        group_changes,
                    };
                }
            }
        }

        let groups: Arc<[Arc<VirtualHeaderGroup>]> = updated.into();
        self.last_result = Some(Arc::clone(&groups));
        let result = HeaderGroupUpdate {
            groups,
            changed: true,
            group_changes,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "header_cache.result",
            groups = result.groups.len(),
            changed_groups = result.changed_groups(),
            reused_result = false,
        );

        result
    }

    /// Reuse the cached version of `group` where possible.
    ///
    /// Returns the stable reference and whether it is new.
    fn stabilize(&mut self, group: VirtualHeaderGroup) -> (Arc<VirtualHeaderGroup>, bool) {
        let Some(cached) = self.groups.get(&group.id).cloned() else {
            let fresh = Arc::new(group);
            self.groups.insert(fresh.id.clone(), Arc::clone(&fresh));
            return (fresh, true);
        };

        let cached_headers: FxHashMap<&str, &Arc<VirtualHeader>> = cached
            .headers
            .iter()
            .map(|header| (header.header_id.as_str(), header))
            .collect();

        let mut headers_changed = false;
        let headers: Vec<Arc<VirtualHeader>> = group
            .headers
            .iter()
            .map(|header| match cached_headers.get(header.header_id.as_str()) {
                Some(&old) if old.same_layout(header) && old.dnd_style == header.dnd_style => {
                    Arc::clone(old)
                }
                _ => {
                    headers_changed = true;
                    Arc::clone(header)
                }
            })
            .collect();

        let same_order = cached.headers.len() == headers.len()
            && cached
                .headers
                .iter()
                .zip(&headers)
                .all(|(old, new)| old.header_id == new.header_id);

        if cached.same_frame(&group) && !headers_changed && same_order {
            return (cached, false);
        }

        let rebuilt = Arc::new(VirtualHeaderGroup {
            headers: if headers_changed || !same_order {
                headers
            } else {
                cached.headers.clone()
            },
            ..group
        });
        self.groups
            .insert(rebuilt.id.clone(), Arc::clone(&rebuilt));
        (rebuilt, true)
    }
}
