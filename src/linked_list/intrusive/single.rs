use core::ptr::NonNull;

use super::iter::RawIter;
use super::traits::Link;

/// A node in a singly linked list.
///
/// Embed it in the record that should be linked; the node owns its payload,
/// the list only rewires the link.
pub struct SingleNode<T> {
    next: Option<NonNull<SingleNode<T>>>,
    data: T,
}

impl<T> SingleNode<T> {
    /// Creates an unlinked node around `data`.
    pub const fn new(data: T) -> Self {
        Self { next: None, data }
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

impl<T: Default> Default for SingleNode<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Link for SingleNode<T> {
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

unsafe impl<T: Send> Send for SingleNode<T> {}
unsafe impl<T: Sync> Sync for SingleNode<T> {}

/// An unprotected singly linked list.
///
/// Tracks head, tail and node count, so insertion at either end and removal
/// at the head are O(1). Arbitrary removal and the membership test have to
/// scan from the head; use [`DoubleList`](super::double::DoubleList) when
/// fast removal anywhere is needed.
#[derive(Debug)]
pub struct SingleList<T> {
    head: Option<NonNull<SingleNode<T>>>,
    tail: Option<NonNull<SingleNode<T>>>,
    count: usize,
}

impl<T> SingleList<T> {
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
    pub fn head(&self) -> Option<NonNull<SingleNode<T>>> {
        self.head
    }

    /// Last node of the list, if any.
    #[inline]
    pub fn tail(&self) -> Option<NonNull<SingleNode<T>>> {
        self.tail
    }

    /// Links `node` in as the new head.
    pub fn push_front(&mut self, mut node: NonNull<SingleNode<T>>) {
        unsafe {
            node.as_mut().set_next(self.head);
        }
        if self.tail.is_none() {
            self.tail = Some(node);
        }
        self.head = Some(node);
        self.count += 1;
    }

    /// Links `node` in as the new tail.
    pub fn push_back(&mut self, mut node: NonNull<SingleNode<T>>) {
        unsafe {
            node.as_mut().set_next(None);
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
        mut node: NonNull<SingleNode<T>>,
        mut after: NonNull<SingleNode<T>>,
    ) {
        unsafe {
            node.as_mut().set_next(after.as_ref().next());
            after.as_mut().set_next(Some(node));
        }
        if self.tail == Some(after) {
            self.tail = Some(node);
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
        node: NonNull<SingleNode<T>>,
        after: Option<NonNull<SingleNode<T>>>,
    ) {
        match after {
            Some(after) => unsafe { self.insert_after(node, after) },
            None => self.push_front(node),
        }
    }

    /// Detaches and returns the head node, or `None` if the list is empty.
    pub fn pop_front(&mut self) -> Option<NonNull<SingleNode<T>>> {
        self.head.inspect(|&head| {
            let mut head = head;
            unsafe {
                self.head = head.as_ref().next();
                head.as_mut().set_next(None);
            }
            if self.head.is_none() {
                self.tail = None;
            }
            self.count -= 1;
        })
    }

    /// Detaches and returns the node following `prev`; with `prev` of `None`
    /// this is [`pop_front`](Self::pop_front). Returns `None` when there is
    /// no such node.
    ///
    /// # Safety
    ///
    /// A provided `prev` must be a member of this list. No check is made.
    pub unsafe fn remove_after(
        &mut self,
        prev: Option<NonNull<SingleNode<T>>>,
    ) -> Option<NonNull<SingleNode<T>>> {
        let Some(mut prev) = prev else {
            return self.pop_front();
        };
        let next = unsafe { prev.as_ref().next() };
        next.inspect(|&node| {
            let mut node = node;
            unsafe {
                prev.as_mut().set_next(node.as_ref().next());
                node.as_mut().set_next(None);
            }
            if self.tail == Some(node) {
                self.tail = Some(prev);
            }
            self.count -= 1;
        })
    }

    /// Detaches an arbitrary member.
    ///
    /// Single links carry no back-pointer, so this scans from the head for
    /// the predecessor. Returns `None` when `node` is not a member.
    pub fn remove(&mut self, node: NonNull<SingleNode<T>>) -> Option<NonNull<SingleNode<T>>> {
        let mut prev: Option<NonNull<SingleNode<T>>> = None;
        for current in unsafe { RawIter::from_head(self.head) } {
            if current == node {
                return unsafe { self.remove_after(prev) };
            }
            prev = Some(current);
        }
        None
    }

    /// Splices all of `other` onto the tail of this list, leaving `other`
    /// empty. Nodes are not copied, only re-owned.
    pub fn append(&mut self, other: &mut SingleList<T>) {
        if other.head.is_none() {
            return;
        }
        match self.tail {
            Some(mut tail) => unsafe { tail.as_mut().set_next(other.head) },
            None => self.head = other.head,
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
    pub fn contains(&self, node: NonNull<SingleNode<T>>) -> bool {
        unsafe { RawIter::from_head(self.head) }.any(|current| current == node)
    }
}

impl<T> Default for SingleList<T> {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl<T: Send> Send for SingleList<T> {}
unsafe impl<T: Sync> Sync for SingleList<T> {}
