//! Descriptor merge
//!
//! `merge(base, overlay)` walks `overlay` field by field: two mappings at the
//! same field are merged recursively, anything else (sequences included) is
//! replaced by the overlay's value. Fields only in `base` are kept.
//!
//! There is no deletion marker. A child venue can replace an inherited field
//! but cannot remove it.
//!
//! Folding a chain is associative as long as a field keeps its shape along the
//! chain. A field that goes map → scalar → map is not: folding root first drops
//! the root's entries at the scalar, while merging the two children first
//! leaves a map that still recurses into the root's. [`resolve_chain`] always
//! folds root first.

use std::collections::BTreeMap;

use super::{Descriptor, Node};

/// Merges `overlay` over `base`, returning the effective descriptor.
pub fn merge(base: &Descriptor, overlay: &Descriptor) -> Descriptor {
    Descriptor::from_map(merge_maps(base.fields(), overlay.fields()))
}

fn merge_maps(base: &BTreeMap<String, Node>, overlay: &BTreeMap<String, Node>) -> BTreeMap<String, Node> {
    let mut out = base.clone();
    for (key, value) in overlay {
        let merged = match (out.get(key), value) {
            (Some(Node::Map(inherited)), Node::Map(own)) => Node::Map(merge_maps(inherited, own)),
            _ => value.clone(),
        };
        out.insert(key.clone(), merged);
    }
    out
}

/// Folds a root-first chain into one effective descriptor.
pub fn resolve_chain<'a, I>(chain: I) -> Descriptor
where
    I: IntoIterator<Item = &'a Descriptor>,
{
    chain
        .into_iter()
        .fold(Descriptor::new(), |acc, next| merge(&acc, next))
}
