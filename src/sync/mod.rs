//! Synchronization seam between the protected containers and the host OS
//! layer.

pub mod semaphore;

pub use semaphore::{RawSemaphore, SpinSemaphore};
