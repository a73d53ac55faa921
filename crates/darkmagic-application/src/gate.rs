//! Per-name production gates
//!
//! A producer runs while its branch holds the gate for its name, so
//! concurrent requests for one name produce it once. Waits are recorded as
//! edges `innermost in-flight producer → awaited name`; a wait that would
//! close a loop through the waiter's own lineage is refused as a circular
//! dependency instead of blocking forever.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, trace};

use darkmagic_domain::error::{Error, Result};

use crate::lineage::Lineage;

#[derive(Default)]
struct WaitGraph {
    edges: HashMap<String, HashMap<String, usize>>,
}

impl WaitGraph {
    fn add(&mut self, from: &str, to: &str) {
        *self
            .edges
            .entry(from.to_string())
            .or_default()
            .entry(to.to_string())
            .or_default() += 1;
    }

    fn remove(&mut self, from: &str, to: &str) {
        let Some(targets) = self.edges.get_mut(from) else {
            return;
        };
        if let Some(count) = targets.get_mut(to) {
            *count -= 1;
            if *count == 0 {
                targets.remove(to);
            }
        }
        if targets.is_empty() {
            self.edges.remove(from);
        }
    }

    /// Path from `start` to the first name in `lineage` it waits on
    fn path_into(&self, start: &str, lineage: &Lineage) -> Option<Vec<String>> {
        let mut visited = HashSet::new();
        let mut stack = vec![vec![start.to_string()]];

        while let Some(path) = stack.pop() {
            let Some(current) = path.last() else { continue };
            if lineage.contains(current) {
                return Some(path);
            }
            if !visited.insert(current.clone()) {
                continue;
            }
            for next in self.edges.get(current).into_iter().flat_map(|targets| targets.keys()) {
                let mut extended = path.clone();
                extended.push(next.clone());
                stack.push(extended);
            }
        }
        None
    }
}

/// Gate table shared by every resolution against one registry
#[derive(Default)]
pub struct ProductionGates {
    gates: DashMap<String, Arc<AsyncMutex<()>>>,
    waits: Arc<Mutex<WaitGraph>>,
}

impl ProductionGates {
    /// Enter the gate for `name` on behalf of a branch with `lineage`
    ///
    /// `lineage` is the requesting branch, not including `name` itself.
    pub async fn enter(&self, name: &str, lineage: &Lineage) -> Result<GatePass> {
        let gate = Arc::clone(
            self.gates
                .entry(name.to_string())
                .or_insert_with(Arc::default)
                .value(),
        );

        let edge = lineage.innermost().map(|from| WaitEdge::new(&self.waits, from, name));

        if let Ok(guard) = Arc::clone(&gate).try_lock_owned() {
            return Ok(GatePass {
                _guard: guard,
                _edge: edge,
            });
        }

        let loop_path = self
            .waits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .path_into(name, lineage);
        if let Some(path) = loop_path {
            debug!(dependency = name, ?path, "waiting would deadlock, refusing");
            let mut chain = lineage.names();
            chain.extend(path.into_iter().take_while(|entry| !lineage.contains(entry)));
            return Err(Error::circular_dependency(name, chain));
        }

        trace!(dependency = name, "production gate busy, waiting");
        let guard = gate.lock_owned().await;
        Ok(GatePass {
            _guard: guard,
            _edge: edge,
        })
    }

    /// Forget the gate of an evicted name unless a production holds it
    pub fn forget(&self, name: &str) {
        let removed = self
            .gates
            .remove_if(name, |_, gate| gate.try_lock().is_ok());
        if removed.is_none() {
            trace!(dependency = name, "gate busy, kept");
        }
    }
}

/// Recorded wait edge, removed on drop
struct WaitEdge {
    waits: Arc<Mutex<WaitGraph>>,
    from: String,
    to: String,
}

impl WaitEdge {
    fn new(waits: &Arc<Mutex<WaitGraph>>, from: &str, to: &str) -> Self {
        waits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add(from, to);
        Self {
            waits: Arc::clone(waits),
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

impl Drop for WaitEdge {
    fn drop(&mut self) {
        self.waits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.from, &self.to);
    }
}

/// Exclusive right to produce one name
pub struct GatePass {
    _guard: OwnedMutexGuard<()>,
    _edge: Option<WaitEdge>,
}
