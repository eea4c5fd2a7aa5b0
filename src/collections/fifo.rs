use crate::collections::vector::DEFAULT_CAPACITY;

// Element i lives at (head + i) % capacity. len is tracked on its own since
// head == tail both when empty and when full
#[derive(Debug, Clone)]
pub struct RingQueue<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<T> RingQueue<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "RingQueue capacity must be > 0");
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            tail: 0,
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

    pub fn enqueue(&mut self, value: T) {
        if self.len == self.capacity() {
            self.grow();
        }
        debug_assert!(self.slots[self.tail].is_none(), "tail slot occupied");
        self.slots[self.tail] = Some(value);
        self.tail = (self.tail + 1) % self.capacity();
        self.len += 1;
    }

    pub fn dequeue(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.slots[self.head].take();
        debug_assert!(value.is_some(), "head slot empty in non-empty queue");
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        value
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let cap = self.capacity();
        (0..self.len).filter_map(move |i| self.slots[(self.head + i) % cap].as_ref())
    }

    pub fn get_all(&self) -> Vec<&T> {
        self.iter().collect()
    }

    // Doubles capacity and relinearizes so the head lands at index 0.
    fn grow(&mut self) {
        let old_cap = self.capacity();
        let mut slots: Box<[Option<T>]> = (0..old_cap * 2).map(|_| None).collect();
        for (i, dst) in slots.iter_mut().take(self.len).enumerate() {
            *dst = self.slots[(self.head + i) % old_cap].take();
        }
        self.slots = slots;
        self.head = 0;
        self.tail = self.len;
    }
}

impl<T> Default for RingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
