//! Venue registry
//!
//! Holds every venue literal with its parent link and resolves effective
//! descriptors by folding the chain from the root downward.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::VenueBuilder;
use crate::client::{HuobiSigner, SigningStrategy};
use crate::descriptor::{resolve_chain, Descriptor};
use crate::errors::{CcxtError, CcxtResult};

/// One venue literal and the parent it extends
#[derive(Debug, Clone)]
pub struct VenueSpec {
    pub id: String,
    pub extends: Option<String>,
    pub literal: Value,
}

impl VenueSpec {
    pub fn root(id: impl Into<String>, describe: fn() -> Value) -> Self {
        Self {
            id: id.into(),
            extends: None,
            literal: describe(),
        }
    }

    pub fn extending(id: impl Into<String>, parent: impl Into<String>, describe: fn() -> Value) -> Self {
        Self {
            id: id.into(),
            extends: Some(parent.into()),
            literal: describe(),
        }
    }

    pub fn new(id: impl Into<String>, extends: Option<&str>, literal: Value) -> Self {
        Self {
            id: id.into(),
            extends: extends.map(str::to_string),
            literal,
        }
    }
}

struct Entry {
    extends: Option<String>,
    descriptor: Descriptor,
}

/// 거래소 레지스트리
#[derive(Default)]
pub struct VenueRegistry {
    entries: HashMap<String, Entry>,
    signers: HashMap<String, Arc<dyn SigningStrategy>>,
}

impl fmt::Debug for VenueRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut venues: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        venues.sort_unstable();
        let mut signers: Vec<&str> = self.signers.keys().map(String::as_str).collect();
        signers.sort_unstable();
        f.debug_struct("VenueRegistry")
            .field("venues", &venues)
            .field("signers", &signers)
            .finish()
    }
}

impl VenueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in venues and signing strategies
    pub fn builtin() -> CcxtResult<Self> {
        let mut registry = Self::new();
        registry.register_signer("huobi", Arc::new(HuobiSigner));
        for spec in crate::exchanges::builtin() {
            registry.register(spec)?;
        }
        Ok(registry)
    }

    /// Validates and stores a literal. Parents are resolved lazily, so
    /// registration order does not matter. Re-registering an id replaces it.
    pub fn register(&mut self, spec: VenueSpec) -> CcxtResult<()> {
        let descriptor = Descriptor::from_value(spec.literal)?;
        if let Some(declared) = descriptor.id() {
            if declared != spec.id {
                return Err(CcxtError::malformed(
                    "id",
                    format!("literal declares `{declared}` but is registered as `{}`", spec.id),
                ));
            }
        }
        if self.entries.contains_key(&spec.id) {
            debug!(venue = %spec.id, "replacing registered venue");
        }
        self.entries.insert(
            spec.id,
            Entry {
                extends: spec.extends,
                descriptor,
            },
        );
        Ok(())
    }

    /// Signing strategies are referenced by name from `options.signer`.
    pub fn register_signer(&mut self, name: impl Into<String>, signer: Arc<dyn SigningStrategy>) {
        self.signers.insert(name.into(), signer);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Registered venue ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Venue ids from the root down to `id`
    pub fn chain(&self, id: &str) -> CcxtResult<Vec<&str>> {
        let mut chain: Vec<&str> = Vec::new();
        let mut seen = HashSet::new();
        let mut current = id;

        loop {
            let (key, entry) = match self.entries.get_key_value(current) {
                Some(found) => found,
                None => {
                    return Err(match chain.last() {
                        None => CcxtError::UnknownVenue { id: id.to_string() },
                        Some(child) => CcxtError::UnresolvedParent {
                            venue: child.to_string(),
                            parent: current.to_string(),
                        },
                    })
                },
            };
            if !seen.insert(key.as_str()) {
                chain.push(key.as_str());
                return Err(CcxtError::InheritanceCycle {
                    chain: chain.join(" -> "),
                });
            }
            chain.push(key.as_str());
            match &entry.extends {
                Some(parent) => current = parent.as_str(),
                None => break,
            }
        }

        chain.reverse();
        Ok(chain)
    }

    /// Effective descriptor: every literal on the chain merged root first.
    pub fn resolve(&self, id: &str) -> CcxtResult<Descriptor> {
        let chain = self.chain(id)?;
        Ok(resolve_chain(
            chain.iter().filter_map(|venue| self.entries.get(*venue)).map(|e| &e.descriptor),
        ))
    }

    /// Builder for `id` with the registry's signing strategies available.
    pub fn builder(&self, id: &str) -> CcxtResult<VenueBuilder> {
        let descriptor = self.resolve(id)?;
        Ok(VenueBuilder::new(descriptor).with_signers(self.signers.clone()))
    }
}
