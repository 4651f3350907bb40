use crate::collection::{compare_keys, CollectionError, OrderedCollection, Record};

/// Contiguous storage with a hard capacity fixed at construction.
///
/// Inserting past the capacity fails with `CapacityExceeded`; storage never
/// grows beyond it. Front and positional inserts shift later records.
#[derive(Debug, Clone)]
pub struct BoundedCollection<T> {
    records: Vec<T>,
    capacity: usize,
}

impl<T> BoundedCollection<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            capacity,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    fn ensure_room(&self) -> Result<(), CollectionError> {
        if self.records.len() >= self.capacity {
            return Err(CollectionError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

impl<T: Record> OrderedCollection<T> for BoundedCollection<T> {
    fn insert_end(&mut self, record: T) -> Result<(), CollectionError> {
        self.ensure_room()?;
        self.records.push(record);
        Ok(())
    }

    fn insert_front(&mut self, record: T) -> Result<(), CollectionError> {
        self.insert_at(record, 0)
    }

    fn insert_at(&mut self, record: T, position: usize) -> Result<(), CollectionError> {
        if position > self.records.len() {
            return Err(CollectionError::InvalidPosition {
                position,
                size: self.records.len(),
            });
        }
        self.ensure_room()?;
        self.records.insert(position, record);
        Ok(())
    }

    fn remove_by_id(&mut self, id: u32) -> bool {
        match self.records.iter().position(|r| r.id() == id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    fn find_by_field<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.records.iter().find(|r| predicate(r))
    }

    fn find_by_id_mut(&mut self, id: u32) -> Option<&mut T> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    fn sort_by<K, F>(&mut self, mut key_fn: F, ascending: bool)
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        // slice::sort_by is a stable merge sort.
        self.records
            .sort_by(|a, b| compare_keys(&key_fn(a), &key_fn(b), ascending));
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.records.get(index)
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.capacity)
    }

    fn clear(&mut self) {
        self.records.clear();
    }

    fn for_each_in_order<V>(&self, visitor: V)
    where
        V: FnMut(&T),
    {
        self.records.iter().for_each(visitor);
    }
}
