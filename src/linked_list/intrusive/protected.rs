use core::cell::UnsafeCell;
use core::ptr::NonNull;

use crossbeam_utils::CachePadded;

use crate::sync::semaphore::{RawSemaphore, SpinSemaphore};

use super::double::{DoubleList, DoubleNode};
use super::single::{SingleList, SingleNode};

/// Lock discipline shared by the protected list variants.
///
/// The semaphore slot doubles as the validity flag: `None` means lock
/// creation failed (or the list was deinitialized) and every bracket runs
/// unguarded, with exclusivity falling back to the caller.
struct Guarded<L, S: RawSemaphore> {
    list: CachePadded<UnsafeCell<L>>,
    sem: Option<S>,
}

impl<L, S: RawSemaphore> Guarded<L, S> {
    fn new(list: L) -> Self {
        Self {
            list: CachePadded::new(UnsafeCell::new(list)),
            sem: S::create(),
        }
    }

    fn is_valid(&self) -> bool {
        self.sem.is_some()
    }

    fn lock(&self) -> bool {
        match &self.sem {
            Some(sem) => {
                sem.acquire();
                true
            }
            None => false,
        }
    }

    fn unlock(&self) -> bool {
        match &self.sem {
            Some(sem) => {
                sem.release();
                true
            }
            None => false,
        }
    }

    /// Runs `f` on the list with the lock held for the duration of the call.
    fn with<R>(&self, f: impl FnOnce(&mut L) -> R) -> R {
        let _guard = self.sem.as_ref().map(SemGuard::acquire);
        f(unsafe { &mut *self.list.get() })
    }

    /// Raw access without the bracket; exclusivity is the caller's problem.
    unsafe fn raw(&self) -> &mut L {
        unsafe { &mut *self.list.get() }
    }

    fn get_mut(&mut self) -> &mut L {
        self.list.get_mut()
    }

    fn destroy(&mut self) {
        if let Some(sem) = self.sem.take() {
            sem.destroy();
        }
    }
}

unsafe impl<L: Send, S: RawSemaphore + Send> Send for Guarded<L, S> {}
unsafe impl<L: Send, S: RawSemaphore + Sync> Sync for Guarded<L, S> {}

/// Releases the semaphore on every exit path, including unwinding.
struct SemGuard<'a, S: RawSemaphore>(&'a S);

impl<'a, S: RawSemaphore> SemGuard<'a, S> {
    fn acquire(sem: &'a S) -> Self {
        sem.acquire();
        Self(sem)
    }
}

impl<S: RawSemaphore> Drop for SemGuard<'_, S> {
    fn drop(&mut self) {
        self.0.release();
    }
}

/// A [`SingleList`] bundled with a binary semaphore so one instance can be
/// shared across concurrent tasks.
///
/// Every operation brackets the lock internally, giving per-call atomicity.
/// Multi-step transactions go through [`with`](Self::with), or through an
/// explicit [`lock`](Self::lock)/[`unlock`](Self::unlock) pair around
/// [`unprotected`](Self::unprotected) access. The semaphore is not
/// reentrant: calling a bracketing operation while holding the explicit lock
/// deadlocks.
pub struct ProtectedSingleList<T, S: RawSemaphore = SpinSemaphore> {
    guarded: Guarded<SingleList<T>, S>,
}

impl<T, S: RawSemaphore> ProtectedSingleList<T, S> {
    /// Creates an empty list and requests its lock resource from the OS
    /// layer.
    ///
    /// When lock creation fails the list still starts out empty and usable,
    /// but only as an unprotected structure; check
    /// [`is_valid`](Self::is_valid) before relying on the locking guarantee.
    pub fn new() -> Self {
        Self {
            guarded: Guarded::new(SingleList::new()),
        }
    }

    /// Reports whether lock creation succeeded.
    pub fn is_valid(&self) -> bool {
        self.guarded.is_valid()
    }

    /// Acquires the lock, blocking until it is available. Returns false
    /// without blocking when the list was never validly initialized.
    pub fn lock(&self) -> bool {
        self.guarded.lock()
    }

    /// Releases the lock. Returns false when the list was never validly
    /// initialized.
    pub fn unlock(&self) -> bool {
        self.guarded.unlock()
    }

    /// Runs `f` on the embedded list as one atomic transaction: the lock is
    /// held for the whole closure and released on every exit path.
    pub fn with<R>(&self, f: impl FnOnce(&mut SingleList<T>) -> R) -> R {
        self.guarded.with(f)
    }

    /// Raw access to the embedded list, bypassing the lock bracket.
    ///
    /// # Safety
    ///
    /// The caller must hold the lock (see [`lock`](Self::lock)) or otherwise
    /// guarantee exclusive access for the lifetime of the returned reference.
    pub unsafe fn unprotected(&self) -> &mut SingleList<T> {
        unsafe { self.guarded.raw() }
    }

    /// Returns true if the list holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.guarded.with(|list| list.is_empty())
    }

    /// Number of nodes in the list.
    pub fn count(&self) -> usize {
        self.guarded.with(|list| list.count())
    }

    /// Links `node` in as the new head.
    pub fn push_front(&self, node: NonNull<SingleNode<T>>) {
        self.guarded.with(|list| list.push_front(node))
    }

    /// Links `node` in as the new tail.
    pub fn push_back(&self, node: NonNull<SingleNode<T>>) {
        self.guarded.with(|list| list.push_back(node))
    }

    /// Inserts `node` immediately following `after`.
    ///
    /// # Safety
    ///
    /// `after` must be a member of this list. No check is made.
    pub unsafe fn insert_after(&self, node: NonNull<SingleNode<T>>, after: NonNull<SingleNode<T>>) {
        self.guarded
            .with(|list| unsafe { list.insert_after(node, after) })
    }

    /// Inserts at the head when `after` is `None`, otherwise after `after`.
    ///
    /// # Safety
    ///
    /// A provided `after` must be a member of this list. No check is made.
    pub unsafe fn insert(
        &self,
        node: NonNull<SingleNode<T>>,
        after: Option<NonNull<SingleNode<T>>>,
    ) {
        self.guarded.with(|list| unsafe { list.insert(node, after) })
    }

    /// Detaches and returns the head node, or `None` if the list is empty.
    pub fn pop_front(&self) -> Option<NonNull<SingleNode<T>>> {
        self.guarded.with(|list| list.pop_front())
    }

    /// Detaches and returns the node following `prev`, the head when `prev`
    /// is `None`.
    ///
    /// # Safety
    ///
    /// A provided `prev` must be a member of this list. No check is made.
    pub unsafe fn remove_after(
        &self,
        prev: Option<NonNull<SingleNode<T>>>,
    ) -> Option<NonNull<SingleNode<T>>> {
        self.guarded.with(|list| unsafe { list.remove_after(prev) })
    }

    /// Detaches an arbitrary member by scanning from the head. Returns `None`
    /// when `node` is not a member.
    pub fn remove(&self, node: NonNull<SingleNode<T>>) -> Option<NonNull<SingleNode<T>>> {
        self.guarded.with(|list| list.remove(node))
    }

    /// Splices all of `other` onto the tail of this list, leaving `other`
    /// empty.
    pub fn append(&self, other: &mut SingleList<T>) {
        self.guarded.with(|list| list.append(other))
    }

    /// Membership test by traversal from the head.
    pub fn contains(&self, node: NonNull<SingleNode<T>>) -> bool {
        self.guarded.with(|list| list.contains(node))
    }

    /// Unlinks every node but keeps the semaphore, so the list stays valid.
    /// Node storage is untouched.
    pub fn clear(&self) {
        self.guarded.with(|list| list.clear())
    }

    /// Drains every node and destroys the lock resource. Safe to call
    /// whether or not initialization produced a semaphore, and more than
    /// once.
    pub fn deinitialize(&mut self) {
        self.guarded.get_mut().clear();
        self.guarded.destroy();
    }
}

impl<T, S: RawSemaphore> Default for ProtectedSingleList<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`DoubleList`] bundled with a binary semaphore so one instance can be
/// shared across concurrent tasks.
///
/// Same locking protocol as [`ProtectedSingleList`].
pub struct ProtectedDoubleList<T, S: RawSemaphore = SpinSemaphore> {
    guarded: Guarded<DoubleList<T>, S>,
}

impl<T, S: RawSemaphore> ProtectedDoubleList<T, S> {
    /// Creates an empty list and requests its lock resource from the OS
    /// layer.
    ///
    /// When lock creation fails the list still starts out empty and usable,
    /// but only as an unprotected structure; check
    /// [`is_valid`](Self::is_valid) before relying on the locking guarantee.
    pub fn new() -> Self {
        Self {
            guarded: Guarded::new(DoubleList::new()),
        }
    }

    /// Reports whether lock creation succeeded.
    pub fn is_valid(&self) -> bool {
        self.guarded.is_valid()
    }

    /// Acquires the lock, blocking until it is available. Returns false
    /// without blocking when the list was never validly initialized.
    pub fn lock(&self) -> bool {
        self.guarded.lock()
    }

    /// Releases the lock. Returns false when the list was never validly
    /// initialized.
    pub fn unlock(&self) -> bool {
        self.guarded.unlock()
    }

    /// Runs `f` on the embedded list as one atomic transaction: the lock is
    /// held for the whole closure and released on every exit path.
    pub fn with<R>(&self, f: impl FnOnce(&mut DoubleList<T>) -> R) -> R {
        self.guarded.with(f)
    }

    /// Raw access to the embedded list, bypassing the lock bracket.
    ///
    /// # Safety
    ///
    /// The caller must hold the lock (see [`lock`](Self::lock)) or otherwise
    /// guarantee exclusive access for the lifetime of the returned reference.
    pub unsafe fn unprotected(&self) -> &mut DoubleList<T> {
        unsafe { self.guarded.raw() }
    }

    /// Returns true if the list holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.guarded.with(|list| list.is_empty())
    }

    /// Number of nodes in the list.
    pub fn count(&self) -> usize {
        self.guarded.with(|list| list.count())
    }

    /// Links `node` in as the new head.
    pub fn push_front(&self, node: NonNull<DoubleNode<T>>) {
        self.guarded.with(|list| list.push_front(node))
    }

    /// Links `node` in as the new tail.
    pub fn push_back(&self, node: NonNull<DoubleNode<T>>) {
        self.guarded.with(|list| list.push_back(node))
    }

    /// Inserts `node` immediately following `after`.
    ///
    /// # Safety
    ///
    /// `after` must be a member of this list. No check is made.
    pub unsafe fn insert_after(&self, node: NonNull<DoubleNode<T>>, after: NonNull<DoubleNode<T>>) {
        self.guarded
            .with(|list| unsafe { list.insert_after(node, after) })
    }

    /// Inserts at the head when `after` is `None`, otherwise after `after`.
    ///
    /// # Safety
    ///
    /// A provided `after` must be a member of this list. No check is made.
    pub unsafe fn insert(
        &self,
        node: NonNull<DoubleNode<T>>,
        after: Option<NonNull<DoubleNode<T>>>,
    ) {
        self.guarded.with(|list| unsafe { list.insert(node, after) })
    }

    /// Detaches and returns the head node, or `None` if the list is empty.
    pub fn pop_front(&self) -> Option<NonNull<DoubleNode<T>>> {
        self.guarded.with(|list| list.pop_front())
    }

    /// Detaches and returns the tail node, or `None` if the list is empty.
    pub fn pop_back(&self) -> Option<NonNull<DoubleNode<T>>> {
        self.guarded.with(|list| list.pop_back())
    }

    /// Unlinks a member known to be neither head nor tail.
    ///
    /// # Safety
    ///
    /// `node` must be a member of this list and must not be its head or its
    /// tail. No check is made.
    pub unsafe fn mid_remove(&self, node: NonNull<DoubleNode<T>>) {
        self.guarded.with(|list| unsafe { list.mid_remove(node) })
    }

    /// Unlinks a member anywhere in the list in O(1) and hands the node back.
    ///
    /// # Safety
    ///
    /// `node` must be a member of this list. No check is made.
    pub unsafe fn remove(&self, node: NonNull<DoubleNode<T>>) -> NonNull<DoubleNode<T>> {
        self.guarded.with(|list| unsafe { list.remove(node) })
    }

    /// Splices all of `other` onto the tail of this list, leaving `other`
    /// empty.
    pub fn append(&self, other: &mut DoubleList<T>) {
        self.guarded.with(|list| list.append(other))
    }

    /// Membership test by traversal from the head.
    pub fn contains(&self, node: NonNull<DoubleNode<T>>) -> bool {
        self.guarded.with(|list| list.contains(node))
    }

    /// Unlinks every node but keeps the semaphore, so the list stays valid.
    /// Node storage is untouched.
    pub fn clear(&self) {
        self.guarded.with(|list| list.clear())
    }

    /// Drains every node and destroys the lock resource. Safe to call
    /// whether or not initialization produced a semaphore, and more than
    /// once.
    pub fn deinitialize(&mut self) {
        self.guarded.get_mut().clear();
        self.guarded.destroy();
    }
}

impl<T, S: RawSemaphore> Default for ProtectedDoubleList<T, S> {
    fn default() -> Self {
        Self::new()
    }
}
