//! Intrusive linked list implementations.
//!
//! In an intrusive linked list, the link fields live directly in the data
//! structure that is being linked. The caller embeds a node in its own
//! record, keeps ownership of the storage, and hands the list a raw handle;
//! the list only rewires links. This is in contrast to a non-intrusive list,
//! where each element gets a separate wrapper allocation.
//!
//! # Examples
//!
//! ```
//! use netstack_collections::linked_list::intrusive::single::{SingleList, SingleNode};
//! use core::ptr::NonNull;
//!
//! let mut list = SingleList::<i32>::new();
//! let mut node1 = SingleNode::new(1);
//! let mut node2 = SingleNode::new(2);
//! let mut node3 = SingleNode::new(3);
//!
//! list.push_back(NonNull::from(&mut node1));
//! list.push_back(NonNull::from(&mut node2));
//! list.push_back(NonNull::from(&mut node3));
//!
//! assert_eq!(list.count(), 3);
//!
//! let mut values = vec![];
//! while let Some(node) = list.pop_front() {
//!     values.push(*unsafe { node.as_ref() }.data());
//! }
//! assert_eq!(values, vec![1, 2, 3]);
//! ```
pub mod intrusive;
