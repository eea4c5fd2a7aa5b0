pub mod fifo;
pub mod priq;
pub mod vector;

pub use fifo::RingQueue;
pub use priq::ReadyHeap;
pub use vector::GrowVec;
