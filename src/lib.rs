//! Intrusive list containers for firmware network stacks.
//!
//! Higher-level stack modules link their own records together by embedding a
//! [`SingleNode`](linked_list::intrusive::single::SingleNode) or
//! [`DoubleNode`](linked_list::intrusive::double::DoubleNode) in them; the
//! lists here only rewire links and never allocate, free, or copy node
//! storage. The protected variants bundle a list with a binary semaphore from
//! the [`sync`] seam so one instance can be shared across concurrent tasks.

#![cfg_attr(not(test), no_std)]

pub mod linked_list;
pub mod sync;
