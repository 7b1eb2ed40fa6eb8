//! Endpoint binder
//!
//! Turns the `api` section of an effective descriptor into an operation table.
//! Identifiers follow the CCXT rule: section, capitalized verb, then every
//! alphanumeric run of the path capitalized and concatenated.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::warn;

use super::operation::{placeholders, AccessLevel, HttpMethod, Operation};
use crate::descriptor::{join_path, Descriptor, Node};
use crate::errors::{CcxtError, CcxtResult};

/// Splits a path template on every non-alphanumeric character, dropping empty pieces.
fn segments(path: &str) -> Vec<&str> {
    path.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect()
}

/// First letter upper-cased, the rest kept
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `public` + GET + `hadax/common/symbols` → `publicGetHadaxCommonSymbols`
pub fn camel_case_id(section: &str, method: HttpMethod, path: &str) -> String {
    let mut id = String::with_capacity(section.len() + path.len() + 8);
    id.push_str(section);
    id.push_str(method.title());
    for segment in segments(path) {
        id.push_str(&capitalize(segment));
    }
    id
}

/// `public` + GET + `hadax/common/symbols` → `public_get_hadax_common_symbols`
pub fn snake_case_id(section: &str, method: HttpMethod, path: &str) -> String {
    let mut parts = vec![section.to_string(), method.as_str().to_ascii_lowercase()];
    parts.extend(segments(path).into_iter().map(str::to_ascii_lowercase));
    parts.join("_")
}

/// Operation table of one venue
#[derive(Debug, Clone, Default)]
pub struct Operations {
    venue: String,
    by_id: BTreeMap<String, Arc<Operation>>,
    aliases: BTreeMap<String, String>,
}

impl Operations {
    /// Resolves an identifier (camelCase or snake_case alias).
    pub fn get(&self, identifier: &str) -> CcxtResult<&Operation> {
        self.find(identifier)
            .ok_or_else(|| CcxtError::OperationNotFound {
                venue: self.venue.clone(),
                identifier: identifier.to_string(),
            })
    }

    pub fn find(&self, identifier: &str) -> Option<&Operation> {
        self.by_id
            .get(identifier)
            .or_else(|| self.aliases.get(identifier).and_then(|id| self.by_id.get(id)))
            .map(Arc::as_ref)
    }

    /// Resolves an identifier stored under `options.<key>` (e.g. `fetchMarketsMethod`).
    pub fn resolve_option(&self, descriptor: &Descriptor, key: &str) -> CcxtResult<&Operation> {
        let identifier = descriptor.option_str(key).ok_or_else(|| {
            CcxtError::malformed(format!("options.{key}"), "option is not set to an operation identifier")
        })?;
        self.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.find(identifier).is_some()
    }

    /// Identifiers in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.by_id.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.by_id.values().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    fn insert(&mut self, op: Operation, alias: String) -> CcxtResult<()> {
        if let Some(existing) = self.by_id.get(&op.id) {
            if existing.section == op.section && existing.method == op.method && existing.path == op.path {
                warn!(venue = %self.venue, operation = %op.id, "duplicate endpoint declaration ignored");
                return Ok(());
            }
            return Err(CcxtError::IdentifierCollision {
                identifier: op.id.clone(),
                first: existing.declaration(),
                second: op.declaration(),
            });
        }
        if let Some(target) = self.aliases.get(&alias) {
            let first = self
                .by_id
                .get(target)
                .map(|existing| existing.declaration())
                .unwrap_or_else(|| target.clone());
            return Err(CcxtError::IdentifierCollision {
                identifier: alias,
                first,
                second: op.declaration(),
            });
        }
        self.aliases.insert(alias, op.id.clone());
        self.by_id.insert(op.id.clone(), Arc::new(op));
        Ok(())
    }
}

/// Binds every endpoint declared under `api.<section>.<verb>`.
///
/// An absent `api` field or an empty list binds nothing.
pub fn bind(descriptor: Arc<Descriptor>) -> CcxtResult<Operations> {
    let mut ops = Operations {
        venue: descriptor.id().unwrap_or("<anonymous>").to_string(),
        ..Default::default()
    };

    let sections = match descriptor.get("api") {
        None => return Ok(ops),
        Some(Node::Map(sections)) => sections,
        Some(other) => {
            return Err(CcxtError::malformed(
                "api",
                format!("expected mapping of sections, found {}", other.type_name()),
            ))
        },
    };

    for (section, verbs) in sections {
        let section_path = join_path("api", section);
        let verbs = verbs.as_map().ok_or_else(|| {
            CcxtError::malformed(&section_path, format!("expected mapping of verbs, found {}", verbs.type_name()))
        })?;
        if segments(section).concat() != *section {
            return Err(CcxtError::malformed(&section_path, "section names must be alphanumeric"));
        }

        for (verb, paths) in verbs {
            let verb_path = join_path(&section_path, verb);
            let method: HttpMethod = verb
                .parse()
                .map_err(|_| CcxtError::malformed(&verb_path, format!("unknown HTTP verb `{verb}`")))?;
            let paths = paths.as_list().ok_or_else(|| {
                CcxtError::malformed(&verb_path, format!("expected sequence of paths, found {}", paths.type_name()))
            })?;

            for path in paths {
                let path = path.trim();
                if segments(path).is_empty() {
                    return Err(CcxtError::malformed(&verb_path, format!("path `{path}` has no segments")));
                }
                let op = Operation {
                    id: camel_case_id(section, method, path),
                    section: section.clone(),
                    access: AccessLevel::for_section(section),
                    method,
                    path: path.to_string(),
                    placeholders: placeholders(path),
                    descriptor: Arc::clone(&descriptor),
                };
                ops.insert(op, snake_case_id(section, method, path))?;
            }
        }
    }

    Ok(ops)
}
