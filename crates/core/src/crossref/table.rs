//! Indexed view over a snapshot of cross-reference records.

use std::collections::HashMap;

use super::types::{CrossRefRecord, IdSystem, IdValue};

/// Immutable-once-built table over one snapshot of the dataset.
///
/// The record sequence never mutates in place; a refresh replaces the
/// whole table. Per-system indexes are derived lazily on first lookup for
/// that system and live as long as the snapshot does. On duplicate IDs the
/// later record in sequence order wins.
#[derive(Debug, Default)]
pub struct CrossRefTable {
    records: Vec<CrossRefRecord>,
    indexes: HashMap<IdSystem, HashMap<IdValue, usize>>,
}

impl CrossRefTable {
    pub fn new(records: Vec<CrossRefRecord>) -> Self {
        Self {
            records,
            indexes: HashMap::new(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find the record whose `system` ID equals `id`.
    ///
    /// Builds the derived mapping for `system` on first use; subsequent
    /// lookups are pure map reads.
    pub fn lookup(&mut self, system: IdSystem, id: &IdValue) -> Option<&CrossRefRecord> {
        if !self.indexes.contains_key(&system) {
            let mut index = HashMap::new();
            for (position, record) in self.records.iter().enumerate() {
                if let Some(key) = record.id_for(system) {
                    index.insert(key, position);
                }
            }
            self.indexes.insert(system, index);
        }

        let position = *self.indexes.get(&system)?.get(id)?;
        self.records.get(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(anilist: u64, tmdb: u64) -> CrossRefRecord {
        CrossRefRecord {
            anilist_id: Some(anilist),
            tmdb_id: Some(tmdb),
            ..Default::default()
        }
    }

    #[test]
    fn test_lookup_finds_record_by_system_id() {
        let mut table = CrossRefTable::new(vec![record(17549, 66875), record(1209, 60843)]);

        let found = table
            .lookup(IdSystem::Tmdb, &IdValue::Numeric(60843))
            .unwrap();
        assert_eq!(found.anilist_id, Some(1209));
    }

    #[test]
    fn test_lookup_missing_id_returns_none() {
        let mut table = CrossRefTable::new(vec![record(17549, 66875)]);
        assert!(table.lookup(IdSystem::Tmdb, &IdValue::Numeric(42)).is_none());
    }

    #[test]
    fn test_duplicate_ids_resolve_to_last_record() {
        let mut first = record(100, 555);
        first.mal_id = Some(1);
        let mut second = record(200, 555);
        second.mal_id = Some(2);
        let mut table = CrossRefTable::new(vec![first, second]);

        let found = table
            .lookup(IdSystem::Tmdb, &IdValue::Numeric(555))
            .unwrap();
        assert_eq!(found.anilist_id, Some(200));
        assert_eq!(found.mal_id, Some(2));
    }

    #[test]
    fn test_records_without_the_system_id_are_skipped() {
        let mut no_tmdb = CrossRefRecord {
            anilist_id: Some(300),
            ..Default::default()
        };
        no_tmdb.kitsu_id = Some(9);
        let mut table = CrossRefTable::new(vec![no_tmdb, record(400, 777)]);

        assert!(table.lookup(IdSystem::Tmdb, &IdValue::Numeric(300)).is_none());
        let found = table
            .lookup(IdSystem::AniList, &IdValue::Numeric(300))
            .unwrap();
        assert_eq!(found.kitsu_id, Some(9));
    }

    #[test]
    fn test_empty_table() {
        let mut table = CrossRefTable::empty();
        assert!(table.is_empty());
        assert!(table.lookup(IdSystem::Imdb, &"tt123".into()).is_none());
    }
}
