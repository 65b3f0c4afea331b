//! Entity-type registry resource.
//!
//! Each [`ObjectKind`](crate::components::objectkind::ObjectKind) name maps
//! to an [`ObjectSpec`]: whether instances of the kind are solid, which other
//! kinds it checks collisions against, and the mask template new instances
//! start from.
//!
//! Collision eligibility is directional. [`ObjectRegistry::collision_eligible`]
//! answers one direction only; physical blocking requires both directions to
//! allow the pair, so a kind that stops checking another is still blocked by
//! it. Query sites perform the mutual check.

use bevy_ecs::prelude::Resource;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::components::collisionmask::CollisionMask;

/// Per-kind descriptor: solidity, eligibility filter, mask template.
#[derive(Clone, Debug)]
pub struct ObjectSpec {
    pub solid: bool,
    mask: CollisionMask,
    /// Kinds this one checks collisions against. `None` checks everything.
    checks: Option<FxHashSet<String>>,
}

impl ObjectSpec {
    /// A spec that checks collisions against every kind.
    pub fn new(solid: bool, mask: CollisionMask) -> Self {
        Self {
            solid,
            mask,
            checks: None,
        }
    }

    /// Restrict collision checks to the given kinds.
    pub fn check_only<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.checks = Some(kinds.into_iter().map(Into::into).collect());
        self
    }

    fn checks_kind(&self, other: &str) -> bool {
        match &self.checks {
            None => true,
            Some(set) => set.contains(other),
        }
    }
}

/// Registry of entity-type descriptors, keyed by kind name.
#[derive(Resource, Clone, Debug, Default)]
pub struct ObjectRegistry {
    specs: FxHashMap<String, ObjectSpec>,
}

impl ObjectRegistry {
    pub fn register(&mut self, name: impl Into<String>, spec: ObjectSpec) {
        self.specs.insert(name.into(), spec);
    }

    pub fn spec(&self, kind: &str) -> Option<&ObjectSpec> {
        self.specs.get(kind)
    }

    /// Whether instances of `kind` block movement. Unknown kinds do not.
    pub fn is_solid(&self, kind: &str) -> bool {
        self.specs.get(kind).is_some_and(|s| s.solid)
    }

    /// Whether `kind` checks collisions against `other`. Unknown kinds check
    /// everything, so unregistered entities still collide.
    pub fn collision_eligible(&self, kind: &str, other: &str) -> bool {
        self.specs
            .get(kind)
            .map(|s| s.checks_kind(other))
            .unwrap_or(true)
    }

    /// The mask template new instances of `kind` start from.
    pub fn mask_template(&self, kind: &str) -> Option<CollisionMask> {
        self.specs.get(kind).map(|s| s.mask.clone())
    }
}
