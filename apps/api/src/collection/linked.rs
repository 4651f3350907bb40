use crate::collection::{compare_keys, CollectionError, OrderedCollection, Record};

#[derive(Debug, Clone)]
struct Node<T> {
    record: T,
    next: Option<usize>,
}

/// Singly-linked storage without a capacity limit.
///
/// Nodes live in an arena and link to each other by slot index. Freed slots
/// are recycled. `head`/`tail` give O(1) front and end inserts; positional
/// inserts walk the chain to the predecessor link.
#[derive(Debug, Clone)]
pub struct LinkedCollection<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for LinkedCollection<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }
}

impl<T> LinkedCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            cursor: self.head,
        }
    }

    fn node(&self, index: usize) -> Option<&Node<T>> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, index: usize) -> Option<&mut Node<T>> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    fn next_of(&self, index: usize) -> Option<usize> {
        self.node(index).and_then(|n| n.next)
    }

    fn allocate(&mut self, node: Node<T>) -> usize {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                index
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn push_back(&mut self, record: T) {
        let index = self.allocate(Node { record, next: None });
        match self.tail {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(index);
                }
            }
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
    }

    fn push_front(&mut self, record: T) {
        let index = self.allocate(Node {
            record,
            next: self.head,
        });
        self.head = Some(index);
        if self.tail.is_none() {
            self.tail = Some(index);
        }
        self.len += 1;
    }

    /// Unlinks every node and hands back the records in chain order.
    fn drain_in_order(&mut self) -> Vec<T> {
        let mut records = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(index) = cursor {
            match self.slots.get_mut(index).and_then(Option::take) {
                Some(node) => {
                    cursor = node.next;
                    records.push(node.record);
                }
                None => break,
            }
        }
        self.reset();
        records
    }

    fn reset(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }
}

impl<T: Record> OrderedCollection<T> for LinkedCollection<T> {
    fn insert_end(&mut self, record: T) -> Result<(), CollectionError> {
        self.push_back(record);
        Ok(())
    }

    fn insert_front(&mut self, record: T) -> Result<(), CollectionError> {
        self.push_front(record);
        Ok(())
    }

    fn insert_at(&mut self, record: T, position: usize) -> Result<(), CollectionError> {
        if position > self.len {
            return Err(CollectionError::InvalidPosition {
                position,
                size: self.len,
            });
        }
        if position == 0 {
            self.push_front(record);
            return Ok(());
        }
        if position == self.len {
            self.push_back(record);
            return Ok(());
        }

        // Walk to the node that will precede the new one.
        let mut prev = self.head;
        for _ in 0..position - 1 {
            prev = prev.and_then(|index| self.next_of(index));
        }
        let Some(prev) = prev else {
            return Err(CollectionError::InvalidPosition {
                position,
                size: self.len,
            });
        };

        let next = self.next_of(prev);
        let index = self.allocate(Node { record, next });
        if let Some(node) = self.node_mut(prev) {
            node.next = Some(index);
        }
        self.len += 1;
        Ok(())
    }

    fn remove_by_id(&mut self, id: u32) -> bool {
        let mut prev: Option<usize> = None;
        let mut cursor = self.head;

        while let Some(index) = cursor {
            let Some(node) = self.node(index) else {
                return false;
            };
            let next = node.next;

            if node.record.id() == id {
                match prev {
                    Some(p) => {
                        if let Some(prev_node) = self.node_mut(p) {
                            prev_node.next = next;
                        }
                    }
                    None => self.head = next,
                }
                if self.tail == Some(index) {
                    self.tail = prev;
                }
                self.slots[index] = None;
                self.free.push(index);
                self.len -= 1;
                return true;
            }

            prev = Some(index);
            cursor = next;
        }
        false
    }

    fn find_by_field<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|r| predicate(r))
    }

    fn find_by_id_mut(&mut self, id: u32) -> Option<&mut T> {
        let mut cursor = self.head;
        let mut target = None;
        while let Some(index) = cursor {
            let node = self.node(index)?;
            if node.record.id() == id {
                target = Some(index);
                break;
            }
            cursor = node.next;
        }
        target
            .and_then(|index| self.node_mut(index))
            .map(|node| &mut node.record)
    }

    fn sort_by<K, F>(&mut self, mut key_fn: F, ascending: bool)
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        if self.len < 2 {
            return;
        }
        let mut records = self.drain_in_order();
        records.sort_by(|a, b| compare_keys(&key_fn(a), &key_fn(b), ascending));
        for record in records {
            self.push_back(record);
        }
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> Option<usize> {
        None
    }

    fn clear(&mut self) {
        self.reset();
    }

    fn for_each_in_order<V>(&self, visitor: V)
    where
        V: FnMut(&T),
    {
        self.iter().for_each(visitor);
    }
}

/// Follows `next` links from the head.
pub struct Iter<'a, T> {
    slots: &'a [Option<Node<T>>],
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        let node = slots.get(self.cursor?)?.as_ref()?;
        self.cursor = node.next;
        Some(&node.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row(u32);

    impl Record for Row {
        fn id(&self) -> u32 {
            self.0
        }
    }

    fn ids(c: &LinkedCollection<Row>) -> Vec<u32> {
        c.iter().map(|r| r.0).collect()
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut c = LinkedCollection::new();
        c.insert_end(Row(1)).unwrap();
        c.insert_end(Row(2)).unwrap();
        assert!(c.remove_by_id(1));
        c.insert_end(Row(3)).unwrap();
        assert_eq!(c.slots.len(), 2);
        assert_eq!(ids(&c), vec![2, 3]);
    }

    #[test]
    fn test_remove_tail_updates_tail() {
        let mut c = LinkedCollection::new();
        c.insert_end(Row(1)).unwrap();
        c.insert_end(Row(2)).unwrap();
        assert!(c.remove_by_id(2));
        assert_eq!(c.tail, c.head);
        c.insert_end(Row(3)).unwrap();
        assert_eq!(ids(&c), vec![1, 3]);
    }

    #[test]
    fn test_remove_head_of_single_clears_boundaries() {
        let mut c = LinkedCollection::new();
        c.insert_end(Row(1)).unwrap();
        assert!(c.remove_by_id(1));
        assert_eq!(c.head, None);
        assert_eq!(c.tail, None);
        assert_eq!(c.len(), 0);
    }

    #[test]
    fn test_insert_at_middle_links_correctly() {
        let mut c = LinkedCollection::new();
        c.insert_end(Row(1)).unwrap();
        c.insert_end(Row(3)).unwrap();
        c.insert_at(Row(2), 1).unwrap();
        assert_eq!(ids(&c), vec![1, 2, 3]);
        assert_eq!(c.get(2), Some(&Row(3)));
    }

    #[test]
    fn test_sort_rebuilds_compact_arena() {
        let mut c = LinkedCollection::new();
        for id in [5, 4, 3, 2, 1] {
            c.insert_end(Row(id)).unwrap();
        }
        assert!(c.remove_by_id(3));
        c.sort_by(|r| r.0, true);
        assert_eq!(ids(&c), vec![1, 2, 4, 5]);
        assert_eq!(c.slots.len(), 4);
        assert!(c.free.is_empty());
    }
}
