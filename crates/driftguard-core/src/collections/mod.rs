//! Bounded collections shared by the detection, alerting, and feedback crates.

pub mod ring_buffer;

pub use ring_buffer::RingBuffer;
