// crates/geocity-core/src/intern.rs

//! Append-only string interner for country and region codes.
//!
//! City records store `u32` ids instead of owned strings; two interner
//! instances (one for ISO-2 country codes, one for admin-1 region codes)
//! live inside the facade and are serialized with the city cache so that
//! cached ids stay consistent with runtime lookups.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Id 0 is always the empty string, so "no country"/"no region" needs no
/// sentinel handling anywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringInterner {
    entries: Vec<String>,
    #[serde(skip)]
    ids: HashMap<String, u32>,
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl StringInterner {
    pub fn new() -> Self {
        let mut interner = Self {
            entries: Vec::new(),
            ids: HashMap::new(),
        };
        interner.intern("");
        interner
    }

    /// Rebuild the reverse map after deserialization (the map is not
    /// serialized; the entry vector is authoritative).
    pub fn rehydrate(&mut self) {
        self.ids = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i as u32))
            .collect();
        if self.entries.is_empty() {
            self.intern("");
        }
    }

    /// Returns the id for `s`, creating one on first sight. Idempotent.
    pub fn intern(&mut self, s: &str) -> u32 {
        if let Some(&id) = self.ids.get(s) {
            return id;
        }
        let id = self.entries.len() as u32;
        self.entries.push(s.to_string());
        self.ids.insert(s.to_string(), id);
        id
    }

    /// The interned string for `id`, or `""` for unknown ids.
    pub fn get(&self, id: u32) -> &str {
        self.entries.get(id as usize).map(String::as_str).unwrap_or("")
    }

    /// Id for `s` if it was interned before.
    pub fn lookup(&self, s: &str) -> Option<u32> {
        self.ids.get(s).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
