use core::ptr::NonNull;

use super::iter::RawIter;
use super::traits::{Link, LinkWithPrev};

/// A node in a doubly linked list.
///
/// Same embedding contract as [`SingleNode`](super::single::SingleNode), with
/// a back-pointer so the list can unlink it in O(1).
pub struct DoubleNode<T> {
    next: Option<NonNull<DoubleNode<T>>>,
    prev: Option<NonNull<DoubleNode<T>>>,
    data: T,
}

impl<T> DoubleNode<T> {
    /// Creates an unlinked node around `data`.
    pub const fn new(data: T) -> Self {
        Self {
            next: None,
            prev: None,
            data,
        }
    }

    /// Get the payload carried by this node
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Get a mutable reference to the payload carried by this node
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

impl<T: Default> Default for DoubleNode<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Link for DoubleNode<T> {
    type Target = Self;

    #[inline]
    fn next(&self) -> Option<NonNull<Self>> {
        self.next
    }

    #[inline]
    fn set_next(&mut self, next: Option<NonNull<Self>>) {
        self.next = next;
    }
}

impl<T> LinkWithPrev for DoubleNode<T> {
    #[inline]
    fn prev(&self) -> Option<NonNull<Self>> {
        self.prev
    }

    #[inline]
    fn set_prev(&mut self, prev: Option<NonNull<Self>>) {
        self.prev = prev;
    }
}

unsafe impl<T: Send> Send for DoubleNode<T> {}
unsafe impl<T: Sync> Sync for DoubleNode<T> {}

/// An unprotected doubly linked list.
///
/// The back-pointer buys O(1) removal anywhere given a node handle; this is
/// the reason to prefer it over [`SingleList`](super::single::SingleList),
/// whose arbitrary removal scans the chain.
#[derive(Debug)]
pub struct DoubleList<T> {
    head: Option<NonNull<DoubleNode<T>>>,
    tail: Option<NonNull<DoubleNode<T>>>,
    count: usize,
}

impl<T> DoubleList<T> {
    /// Creates a new, empty list.
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            count: 0,
        }
    }

    /// Returns true if the list holds no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of nodes in the list.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// First node of the list, if any.
    #[inline]
    pub fn head(&self) -> Option<NonNull<DoubleNode<T>>> {
        self.head
    }

    /// Last node of the list, if any.
    #[inline]
    pub fn tail(&self) -> Option<NonNull<DoubleNode<T>>> {
        self.tail
    }

    /// Links `node` in as the new head.
    pub fn push_front(&mut self, mut node: NonNull<DoubleNode<T>>) {
        unsafe {
            node.as_mut().set_next(self.head);
            node.as_mut().set_prev(None);
            match self.head {
                Some(mut head) => head.as_mut().set_prev(Some(node)),
                None => self.tail = Some(node),
            }
        }
        self.head = Some(node);
        self.count += 1;
    }

    /// Links `node` in as the new tail.
    pub fn push_back(&mut self, mut node: NonNull<DoubleNode<T>>) {
        unsafe {
            node.as_mut().set_next(None);
            node.as_mut().set_prev(self.tail);
            match self.tail {
                Some(mut tail) => tail.as_mut().set_next(Some(node)),
                None => self.head = Some(node),
            }
        }
        self.tail = Some(node);
        self.count += 1;
    }

    /// Inserts `node` immediately following `after`.
    ///
    /// # Safety
    ///
    /// `after` must be a member of this list. No check is made.
    pub unsafe fn insert_after(
        &mut self,
        mut node: NonNull<DoubleNode<T>>,
        mut after: NonNull<DoubleNode<T>>,
    ) {
        unsafe {
            node.as_mut().set_next(after.as_ref().next());
            node.as_mut().set_prev(Some(after));
            match after.as_ref().next() {
                Some(mut next) => next.as_mut().set_prev(Some(node)),
                None => self.tail = Some(node),
            }
            after.as_mut().set_next(Some(node));
        }
        self.count += 1;
    }

    /// Inserts at the head when `after` is `None`, otherwise after `after`.
    ///
    /// # Safety
    ///
    /// A provided `after` must be a member of this list. No check is made.
    pub unsafe fn insert(
        &mut self,
        node: NonNull<DoubleNode<T>>,
        after: Option<NonNull<DoubleNode<T>>>,
    ) {
        match after {
            Some(after) => unsafe { self.insert_after(node, after) },
            None => self.push_front(node),
        }
    }

    /// Detaches and returns the head node, or `None` if the list is empty.
    pub fn pop_front(&mut self) -> Option<NonNull<DoubleNode<T>>> {
        self.head.inspect(|&head| {
            let mut head = head;
            unsafe {
                self.head = head.as_ref().next();
                head.as_mut().set_next(None);
                match self.head {
                    Some(mut next) => next.as_mut().set_prev(None),
                    None => self.tail = None,
                }
            }
            self.count -= 1;
        })
    }

    /// Detaches and returns the tail node, or `None` if the list is empty.
    pub fn pop_back(&mut self) -> Option<NonNull<DoubleNode<T>>> {
        self.tail.inspect(|&tail| {
            let mut tail = tail;
            unsafe {
                self.tail = tail.as_ref().prev();
                tail.as_mut().set_prev(None);
                match self.tail {
                    Some(mut prev) => prev.as_mut().set_next(None),
                    None => self.head = None,
                }
            }
            self.count -= 1;
        })
    }

    /// Unlinks a member known to be neither head nor tail.
    ///
    /// # Safety
    ///
    /// `node` must be a member of this list and must not be its head or its
    /// tail. No check is made.
    pub unsafe fn mid_remove(&mut self, mut node: NonNull<DoubleNode<T>>) {
        unsafe {
            let mut prev = node.as_ref().prev().unwrap_unchecked();
            let mut next = node.as_ref().next().unwrap_unchecked();
            prev.as_mut().set_next(Some(next));
            next.as_mut().set_prev(Some(prev));
            node.as_mut().set_next(None);
            node.as_mut().set_prev(None);
        }
        self.count -= 1;
    }

    /// Unlinks a member anywhere in the list in O(1), repairing head and tail
    /// as needed, and hands the node back.
    ///
    /// # Safety
    ///
    /// `node` must be a member of this list. No check is made; use
    /// [`contains`](Self::contains) first when membership is in doubt.
    pub unsafe fn remove(&mut self, mut node: NonNull<DoubleNode<T>>) -> NonNull<DoubleNode<T>> {
        unsafe {
            match node.as_ref().prev() {
                Some(mut prev) => prev.as_mut().set_next(node.as_ref().next()),
                None => self.head = node.as_ref().next(),
            }
            match node.as_ref().next() {
                Some(mut next) => next.as_mut().set_prev(node.as_ref().prev()),
                None => self.tail = node.as_ref().prev(),
            }
            node.as_mut().set_next(None);
            node.as_mut().set_prev(None);
        }
        self.count -= 1;
        node
    }

    /// Splices all of `other` onto the tail of this list, leaving `other`
    /// empty. Nodes are not copied, only re-owned.
    pub fn append(&mut self, other: &mut DoubleList<T>) {
        let Some(mut other_head) = other.head else {
            return;
        };
        unsafe {
            other_head.as_mut().set_prev(self.tail);
            match self.tail {
                Some(mut tail) => tail.as_mut().set_next(Some(other_head)),
                None => self.head = Some(other_head),
            }
        }
        self.tail = other.tail;
        self.count += other.count;
        other.head = None;
        other.tail = None;
        other.count = 0;
    }

    /// Unlinks every node. Node storage is untouched.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Membership test by traversal from the head.
    pub fn contains(&self, node: NonNull<DoubleNode<T>>) -> bool {
        unsafe { RawIter::from_head(self.head) }.any(|current| current == node)
    }
}

impl<T> Default for DoubleList<T> {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl<T: Send> Send for DoubleList<T> {}
unsafe impl<T: Sync> Sync for DoubleList<T> {}
