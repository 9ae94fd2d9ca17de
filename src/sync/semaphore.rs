use core::mem;

use spin::Mutex;

/// The binary-semaphore surface the protected lists require from a lock
/// provider.
///
/// `acquire` blocks the calling context until the semaphore is owned; no
/// timeout is offered. The semaphore is not reentrant: a second `acquire`
/// from the owning context deadlocks, and a `release` without a matching
/// `acquire` is a caller error.
pub trait RawSemaphore: Sized {
    /// Allocate the lock resource. `None` reports exhaustion.
    fn create() -> Option<Self>;

    /// Block until the semaphore is owned by the caller.
    fn acquire(&self);

    /// Hand the semaphore back.
    fn release(&self);

    /// Tear the resource down. Dropping the value is equivalent.
    fn destroy(self) {}
}

/// Spinlock-backed semaphore, the default when no richer OS primitive is
/// wired in through the type parameter of the protected lists.
pub struct SpinSemaphore {
    lock: Mutex<()>,
}

impl RawSemaphore for SpinSemaphore {
    fn create() -> Option<Self> {
        Some(Self {
            lock: Mutex::new(()),
        })
    }

    fn acquire(&self) {
        // Ownership is tracked manually; `release` undoes the forget.
        mem::forget(self.lock.lock());
    }

    fn release(&self) {
        unsafe { self.lock.force_unlock() }
    }
}
