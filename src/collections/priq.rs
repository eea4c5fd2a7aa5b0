use crate::collections::vector::GrowVec;
use crate::core::Task;

// One heap per scheduler, so the insertion counter is never shared or reset
#[derive(Debug, Clone, Default)]
pub struct ReadyHeap {
    slots: GrowVec<Task>,
    next_insertion: u64,
}

impl ReadyHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn insert(&mut self, mut task: Task) {
        task.insertion_order = self.next_insertion;
        self.next_insertion += 1;
        self.slots.push_back(task);
        self.sift_up(self.slots.len() - 1);
    }

    pub fn extract_min(&mut self) -> Option<Task> {
        if self.slots.is_empty() {
            return None;
        }
        let last = self
            .slots
            .pop_back()
            .expect("non-empty heap must pop its last slot");
        if self.slots.is_empty() {
            return Some(last);
        }
        let min = self
            .slots
            .set(0, last)
            .expect("non-empty heap must have a root");
        self.sift_down(0);
        Some(min)
    }

    pub fn peek(&self) -> Option<&Task> {
        self.slots.get(0).ok()
    }

    // Drains a scratch clone; the live heap keeps its layout and stamps
    pub fn get_all_sorted(&self) -> Vec<Task> {
        let mut scratch = self.clone();
        let mut sorted = Vec::with_capacity(scratch.len());
        while let Some(task) = scratch.extract_min() {
            sorted.push(task);
        }
        sorted
    }

    // Heap layout order, not sorted
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.slots.iter()
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.slots[index].runs_before(&self.slots[parent]) {
                break;
            }
            self.slots.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.slots.len();
        loop {
            let mut smallest = index;
            for child in [2 * index + 1, 2 * index + 2] {
                if child < len && self.slots[child].runs_before(&self.slots[smallest]) {
                    smallest = child;
                }
            }
            if smallest == index {
                break;
            }
            self.slots.swap(index, smallest);
            index = smallest;
        }
    }
}
