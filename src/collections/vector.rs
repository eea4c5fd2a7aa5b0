use std::ops::Index;

use crate::error::CollectionError;

pub const DEFAULT_CAPACITY: usize = 4;

// Slots 0..len are Some, the rest None. Capacity only changes in grow()
#[derive(Debug, Clone)]
pub struct GrowVec<T> {
    slots: Box<[Option<T>]>,
    len: usize,
}

fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    (0..capacity).map(|_| None).collect()
}

impl<T> GrowVec<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "GrowVec capacity must be > 0");
        Self {
            slots: empty_slots(capacity),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn check(&self, index: usize) -> Result<(), CollectionError> {
        if index < self.len {
            Ok(())
        } else {
            Err(CollectionError::OutOfRange {
                index,
                len: self.len,
            })
        }
    }

    pub fn get(&self, index: usize) -> Result<&T, CollectionError> {
        self.check(index)?;
        Ok(self.slots[index]
            .as_ref()
            .expect("GrowVec slot below len must be occupied"))
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<T, CollectionError> {
        self.check(index)?;
        Ok(self.slots[index]
            .replace(value)
            .expect("GrowVec slot below len must be occupied"))
    }

    pub fn push_back(&mut self, value: T) {
        if self.len == self.capacity() {
            self.grow();
        }
        self.slots[self.len] = Some(value);
        self.len += 1;
    }

    pub fn pop_back(&mut self) -> Result<T, CollectionError> {
        if self.len == 0 {
            return Err(CollectionError::Empty);
        }
        self.len -= 1;
        Ok(self.slots[self.len]
            .take()
            .expect("GrowVec slot below len must be occupied"))
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        assert!(
            i < self.len && j < self.len,
            "swap({i}, {j}) out of range for length {}",
            self.len
        );
        self.slots.swap(i, j);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots[..self.len].iter().flatten()
    }

    fn grow(&mut self) {
        let mut slots = empty_slots(self.capacity() * 2);
        for (dst, src) in slots.iter_mut().zip(self.slots.iter_mut()) {
            *dst = src.take();
        }
        self.slots = slots;
    }
}

impl<T> Default for GrowVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for GrowVec<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("GrowVec index: {err}"),
        }
    }
}
