extern crate std;

use std::thread;
use std::vec;
use std::vec::Vec;

use core::ptr::NonNull;

use crate::linked_list::intrusive::double::DoubleNode;
use crate::linked_list::intrusive::protected::{ProtectedDoubleList, ProtectedSingleList};
use crate::linked_list::intrusive::single::{SingleList, SingleNode};
use crate::linked_list::intrusive::traits::Link;
use crate::sync::semaphore::RawSemaphore;

/// Stands in for an OS layer that has run out of lock resources.
struct FailingSemaphore;

impl RawSemaphore for FailingSemaphore {
    fn create() -> Option<Self> {
        None
    }

    fn acquire(&self) {
        unreachable!("semaphore was never created")
    }

    fn release(&self) {
        unreachable!("semaphore was never created")
    }
}

#[test]
fn test_protected_single_list_basic() {
    let list = ProtectedSingleList::<i32>::new();
    assert!(list.is_valid());
    assert!(list.is_empty());

    let mut a = SingleNode::new(1);
    let mut b = SingleNode::new(2);
    let mut c = SingleNode::new(3);

    list.push_back(NonNull::from(&mut a));
    list.push_back(NonNull::from(&mut b));
    list.push_front(NonNull::from(&mut c));

    assert_eq!(list.count(), 3);
    assert!(list.contains(NonNull::from(&mut b)));

    assert_eq!(list.remove(NonNull::from(&mut b)), Some(NonNull::from(&mut b)));
    assert!(!list.contains(NonNull::from(&mut b)));

    let popped = list.pop_front().unwrap();
    assert_eq!(*unsafe { popped.as_ref() }.data(), 3);

    list.clear();
    assert!(list.is_empty());
    // clear keeps the semaphore
    assert!(list.is_valid());
}

#[test]
fn test_protected_single_list_with_transaction() {
    let list = ProtectedSingleList::<i32>::new();
    let mut a = SingleNode::new(1);
    let mut b = SingleNode::new(2);

    // several operations under one lock acquisition
    let count = list.with(|inner| {
        inner.push_back(NonNull::from(&mut a));
        inner.push_back(NonNull::from(&mut b));
        inner.count()
    });

    assert_eq!(count, 2);
    assert_eq!(list.count(), 2);
}

#[test]
fn test_protected_single_list_explicit_lock() {
    let list = ProtectedSingleList::<i32>::new();
    let mut a = SingleNode::new(1);
    let mut b = SingleNode::new(2);

    assert!(list.lock());
    unsafe {
        let inner = list.unprotected();
        inner.push_back(NonNull::from(&mut a));
        inner.push_back(NonNull::from(&mut b));
        assert_eq!(inner.count(), 2);
    }
    assert!(list.unlock());

    assert_eq!(list.count(), 2);
    assert_eq!(list.pop_front(), Some(NonNull::from(&mut a)));
}

#[test]
fn test_protected_single_list_append() {
    let list = ProtectedSingleList::<i32>::new();
    let mut src = SingleList::<i32>::new();
    let mut a = SingleNode::new(1);
    let mut b = SingleNode::new(2);
    let mut c = SingleNode::new(3);

    list.push_back(NonNull::from(&mut a));
    src.push_back(NonNull::from(&mut b));
    src.push_back(NonNull::from(&mut c));

    list.append(&mut src);

    assert_eq!(list.count(), 3);
    assert!(src.is_empty());

    let mut drained = vec![];
    while let Some(node) = list.pop_front() {
        drained.push(*unsafe { node.as_ref() }.data());
    }
    assert_eq!(drained, vec![1, 2, 3]);
}

#[test]
fn test_protected_single_list_init_failure() {
    let mut list = ProtectedSingleList::<i32, FailingSemaphore>::new();
    assert!(!list.is_valid());
    assert!(list.is_empty());

    // no blocking, no panic: the brackets run unguarded
    assert!(!list.lock());
    assert!(!list.unlock());

    // still usable as an unprotected structure
    let mut a = SingleNode::new(1);
    list.push_back(NonNull::from(&mut a));
    assert_eq!(list.count(), 1);

    list.deinitialize();
    assert_eq!(list.count(), 0);
    assert!(!list.is_valid());

    // deinitialize tolerates repeat calls
    list.deinitialize();
}

#[test]
fn test_protected_single_list_deinitialize() {
    let mut list = ProtectedSingleList::<i32>::new();
    let mut a = SingleNode::new(1);
    let mut b = SingleNode::new(2);

    list.push_back(NonNull::from(&mut a));
    list.push_back(NonNull::from(&mut b));
    assert!(list.is_valid());

    list.deinitialize();

    assert!(list.is_empty());
    assert!(!list.is_valid());
    assert!(a.next().is_none());

    // the nodes were only unlinked, never touched
    assert_eq!(*a.data(), 1);
    assert_eq!(*b.data(), 2);
    assert!(b.next().is_none());
}

#[test]
fn test_protected_single_list_concurrent_tail_add() {
    const PER_TASK: usize = 1_000;

    let list = ProtectedSingleList::<usize>::new();
    assert!(list.is_valid());

    let mut left: Vec<SingleNode<usize>> = (0..PER_TASK).map(SingleNode::new).collect();
    let mut right: Vec<SingleNode<usize>> = (PER_TASK..2 * PER_TASK).map(SingleNode::new).collect();

    thread::scope(|s| {
        for nodes in [&mut left, &mut right] {
            let list = &list;
            s.spawn(move || {
                for node in nodes.iter_mut() {
                    list.push_back(NonNull::from(node));
                }
            });
        }
    });

    // no lost updates, whatever the interleaving
    assert_eq!(list.count(), 2 * PER_TASK);

    let mut seen = vec![false; 2 * PER_TASK];
    while let Some(node) = list.pop_front() {
        let value = *unsafe { node.as_ref() }.data();
        assert!(!seen[value]);
        seen[value] = true;
    }
    assert!(seen.iter().all(|&v| v));
}

#[test]
fn test_protected_double_list_basic() {
    let list = ProtectedDoubleList::<i32>::new();
    assert!(list.is_valid());

    let mut a = DoubleNode::new(1);
    let mut b = DoubleNode::new(2);
    let mut c = DoubleNode::new(3);

    list.push_back(NonNull::from(&mut a));
    list.push_back(NonNull::from(&mut b));
    list.push_back(NonNull::from(&mut c));

    unsafe { list.remove(NonNull::from(&mut b)) };
    assert_eq!(list.count(), 2);

    assert_eq!(list.pop_back(), Some(NonNull::from(&mut c)));
    assert_eq!(list.pop_front(), Some(NonNull::from(&mut a)));
    assert!(list.is_empty());
}

#[test]
fn test_protected_double_list_init_failure() {
    let mut list = ProtectedDoubleList::<i32, FailingSemaphore>::new();
    assert!(!list.is_valid());
    assert!(!list.lock());

    let mut a = DoubleNode::new(1);
    list.push_front(NonNull::from(&mut a));
    assert_eq!(list.count(), 1);

    list.deinitialize();
    assert!(list.is_empty());
}
