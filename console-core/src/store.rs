use crate::model::Record;

/// Append-only ordered collection. Ids are handed out per instance, starting
/// at 1 and following insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionStore<T> {
    name: &'static str,
    records: Vec<T>,
}

impl<T: Record + Clone> CollectionStore<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            records: Vec::new(),
        }
    }

    /// Builds a store by appending every record in order, so incoming ids are
    /// replaced with the store's own sequence.
    pub fn from_records(name: &'static str, records: impl IntoIterator<Item = T>) -> Self {
        let mut store = Self::new(name);
        for record in records {
            store.append(record);
        }
        store
    }

    pub fn append(&mut self, mut record: T) -> T {
        let id = self.records.len() as u64 + 1;
        record.assign_id(id);
        self.records.push(record.clone());
        tracing::debug!(store = self.name, id, "record appended");
        record
    }

    pub fn snapshot(&self) -> &[T] {
        &self.records
    }

    /// Drops every record and restarts the id sequence. Used when the data
    /// service hands over a fresh initial sequence.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = T>) {
        self.records.clear();
        for record in records {
            self.append(record);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChatMessage, Participant};

    fn msg(text: &str) -> ChatMessage {
        ChatMessage::new(Participant::You, text, "10:00 AM")
    }

    #[test]
    fn append_assigns_sequential_ids() {
        let mut store = CollectionStore::new("chat");
        let ids: Vec<u64> = ["a", "b", "c", "d"]
            .into_iter()
            .map(|t| store.append(msg(t)).id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(store.snapshot().len(), 4);
        assert_eq!(store.snapshot()[2].message, "c");
    }

    #[test]
    fn incoming_ids_are_overwritten() {
        let mut stale = msg("stale");
        stale.id = 42;
        let mut store = CollectionStore::new("chat");
        assert_eq!(store.append(stale).id, 1);
    }

    #[test]
    fn stores_keep_separate_id_spaces() {
        let mut a = CollectionStore::new("a");
        let mut b = CollectionStore::new("b");
        a.append(msg("one"));
        a.append(msg("two"));
        assert_eq!(b.append(msg("first in b")).id, 1);
        assert_eq!(a.append(msg("three")).id, 3);
    }

    #[test]
    fn replace_all_restarts_sequence() {
        let mut store = CollectionStore::from_records("chat", vec![msg("a"), msg("b")]);
        store.replace_all(vec![msg("x")]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].id, 1);
        assert_eq!(store.append(msg("y")).id, 2);
    }
}
