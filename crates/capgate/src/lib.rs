//! Capability-gated interfaces.
//!
//! This crate exposes one library type through two trait-object views: a
//! **safe** view restricted to operations that preserve an invariant, and an
//! **unsafe** view with operations that may break it. Reaching the unsafe
//! operations always takes an explicit, greppable gate call such as
//! `as_unsafe()`.
//!
//! # Overview
//!
//! Each variant module exports a pair of traits, a `create()` factory and
//! nothing else:
//!
//! - [`subtype`] — `UnsafeFoo: Foo`. Safe operations stay callable on the
//!   unsafe view, and `as_foo()` is a plain upcast.
//! - [`disjoint`] — `UnsafeFoo` and `Foo` are unrelated. The unsafe view
//!   exposes only unsafe operations and there is no way back.
//! - [`reversible`] — like [`disjoint`], plus an `as_safe()` that checks
//!   the instance against its [`Bounds`] and returns a [`Result`].
//!
//! # Core Concepts
//!
//! ## Sealing
//!
//! Every capability trait has a crate-private supertrait, so no other crate
//! can implement the safe or unsafe interface. The concrete types are
//! private to their modules and the factory is the only way to build one.
//! Whatever `&dyn Foo` a function receives came from this crate.
//!
//! ## Identity
//!
//! Gates reinterpret the same instance. `as_unsafe()` returns a reference
//! to `self` and `into_unsafe()` reuses the caller's `Arc` allocation;
//! nothing is copied. [`same_instance`] compares two views of any type.
//!
//! ## Concurrency
//!
//! Gates add no synchronization. Converting between views is not a memory
//! barrier and gives no visibility guarantees beyond those of `Arc` and
//! shared references. The placeholder operations lock their own state; a
//! real domain type decides its own thread-safety.
//!
//! # Example
//!
//! ```
//! use capgate::{subtype, Config, Op};
//!
//! let config = Config::parse("[bounds]\nmin = 0\nmax = 10\n")?;
//! let h = subtype::create_with(config.bounds);
//!
//! h.safely(4).safely(4);
//! h.as_unsafe().unsafely(42).as_foo().safely(1);
//!
//! assert_eq!(h.value(), 10);
//! assert_eq!(h.journal().iter().filter(|e| e.op.is_unsafe()).count(), 1);
//! assert_eq!(h.journal()[2].op, Op::Unsafely { raw: 42 });
//! # Ok::<(), capgate::Error>(())
//! ```
//!
//! # Re-exports
//!
//! - [`Bounds`], [`Config`] — Instance configuration
//! - [`Entry`], [`InstanceId`], [`Op`] — Operation journal
//! - [`Error`], [`Result`] — Error handling

mod config;
mod error;
mod inner;
mod journal;
mod sealed;

pub mod disjoint;
pub mod reversible;
pub mod subtype;

pub use config::{Bounds, Config};
pub use error::{Error, Result};
pub use journal::{Entry, InstanceId, Op};

/// Returns true when both views refer to the same underlying instance.
///
/// Works across view types, e.g. a safe and an unsafe view.
pub fn same_instance<A: ?Sized, B: ?Sized>(a: &A, b: &B) -> bool {
    std::ptr::addr_eq(a as *const A, b as *const B)
}
