//! Disjoint variant with the irreversible policy.
//!
//! [`UnsafeFoo`] shares no supertrait with [`Foo`]. One concrete type
//! implements both, but a reference typed as unsafe exposes only the unsafe
//! operations, and nothing leads back to a safe view: once a caller has
//! gone unsafe it stays unsafe.
//!
//! Other outstanding safe handles to the same instance keep working. Use
//! [`Foo::into_unsafe`] on the only handle to give up safe access entirely.
//!
//! ```
//! use capgate::disjoint;
//!
//! let h = disjoint::create();
//! h.safely(1).safely(2);
//! h.as_unsafe().unsafely(7).unsafely(9);
//! assert_eq!(h.value(), 9);
//! ```
//!
//! An unsafe handle does not expose safe operations:
//!
//! ```compile_fail
//! use capgate::disjoint;
//!
//! let h = disjoint::create();
//! h.as_unsafe().safely(1);
//! ```
//!
//! An unsafe handle is not a safe handle:
//!
//! ```compile_fail
//! use capgate::disjoint::{self, Foo};
//!
//! let h = disjoint::create();
//! let _: &dyn Foo = h.as_unsafe();
//! ```
//!
//! There is no gate back:
//!
//! ```compile_fail
//! use capgate::disjoint;
//!
//! let h = disjoint::create();
//! h.as_unsafe().as_safe();
//! ```
//!
//! Neither trait can be implemented downstream:
//!
//! ```compile_fail
//! use capgate::disjoint::{Foo, UnsafeFoo};
//! use capgate::{Bounds, Entry, InstanceId};
//! use std::sync::Arc;
//!
//! struct Forged;
//!
//! impl Foo for Forged {
//!     fn id(&self) -> InstanceId { InstanceId::new() }
//!     fn bounds(&self) -> Bounds { Bounds::default() }
//!     fn value(&self) -> i64 { 0 }
//!     fn journal(&self) -> Vec<Entry> { Vec::new() }
//!     fn safely(&self, _amount: i64) -> &dyn Foo { self }
//!     fn as_unsafe(&self) -> &dyn UnsafeFoo { unimplemented!() }
//!     fn into_unsafe(self: Arc<Self>) -> Arc<dyn UnsafeFoo> { unimplemented!() }
//! }
//! ```
//!
//! ```compile_fail
//! use capgate::disjoint::UnsafeFoo;
//!
//! struct Forged;
//!
//! impl UnsafeFoo for Forged {
//!     fn unsafely(&self, _raw: i64) -> &dyn UnsafeFoo { self }
//! }
//! ```

use std::sync::Arc;

use crate::inner::Core;
use crate::journal::{Entry, InstanceId};
use crate::sealed::Sealed;
use crate::Bounds;

/// Safe interface.
pub trait Foo: Sealed + Send + Sync {
    fn id(&self) -> InstanceId;

    fn bounds(&self) -> Bounds;

    fn value(&self) -> i64;

    /// Snapshot of all operations performed so far, through any view.
    ///
    /// The journal is never truncated, and each call copies every entry
    /// while holding the instance lock.
    fn journal(&self) -> Vec<Entry>;

    /// Add `amount`, clamped into bounds.
    fn safely(&self, amount: i64) -> &dyn Foo;

    /// Gate to the unsafe view of this same instance. One way.
    fn as_unsafe(&self) -> &dyn UnsafeFoo;

    /// Owning form of [`Foo::as_unsafe`].
    fn into_unsafe(self: Arc<Self>) -> Arc<dyn UnsafeFoo>;
}

/// Unsafe interface.
pub trait UnsafeFoo: Sealed + Send + Sync {
    /// Overwrite the value without checking bounds.
    fn unsafely(&self, raw: i64) -> &dyn UnsafeFoo;
}

struct Instance {
    core: Core,
}

impl Sealed for Instance {}

impl Foo for Instance {
    fn id(&self) -> InstanceId {
        self.core.id()
    }

    fn bounds(&self) -> Bounds {
        self.core.bounds()
    }

    fn value(&self) -> i64 {
        self.core.value()
    }

    fn journal(&self) -> Vec<Entry> {
        self.core.journal()
    }

    fn safely(&self, amount: i64) -> &dyn Foo {
        self.core.safely(amount);
        self
    }

    fn as_unsafe(&self) -> &dyn UnsafeFoo {
        self.core.crossed("as_unsafe");
        self
    }

    fn into_unsafe(self: Arc<Self>) -> Arc<dyn UnsafeFoo> {
        self.core.crossed("into_unsafe");
        self
    }
}

impl UnsafeFoo for Instance {
    fn unsafely(&self, raw: i64) -> &dyn UnsafeFoo {
        self.core.unsafely(raw);
        self
    }
}

/// Create an instance with default bounds, seen through its safe view.
pub fn create() -> Arc<dyn Foo> {
    create_with(Bounds::default())
}

/// Create an instance with the given bounds, seen through its safe view.
pub fn create_with(bounds: Bounds) -> Arc<dyn Foo> {
    Arc::new(Instance {
        core: Core::new(bounds),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{same_instance, Op};

    #[test]
    fn test_as_unsafe_preserves_identity() {
        let h = create();
        let u = h.as_unsafe();
        assert!(same_instance(&*h, u));

        u.unsafely(5);
        assert_eq!(h.value(), 5);
    }

    #[test]
    fn test_unsafe_chain_then_observe_through_safe_view() {
        let h = create();
        h.as_unsafe().unsafely(-1).unsafely(-2);

        let ops: Vec<_> = h.journal().into_iter().map(|e| e.op).collect();
        assert_eq!(ops, vec![Op::Unsafely { raw: -1 }, Op::Unsafely { raw: -2 }]);
        assert_eq!(h.value(), -2);
        assert!(!h.bounds().contains(h.value()));
    }

    #[test]
    fn test_views_coexist() {
        let h = create_with(Bounds::new(0, 10).unwrap());
        let u = h.as_unsafe();

        h.safely(4);
        u.unsafely(50);
        h.safely(1);

        assert_eq!(h.value(), 10);
        assert_eq!(h.journal().len(), 3);
    }

    #[test]
    fn test_into_unsafe_takes_last_safe_handle() {
        let h = create();
        let addr = Arc::as_ptr(&h);
        let u = h.into_unsafe();

        assert!(std::ptr::addr_eq(addr, Arc::as_ptr(&u)));
        assert_eq!(Arc::strong_count(&u), 1);
        u.unsafely(3);
    }

    #[test]
    fn test_unsafe_view_is_send() {
        let h = create();
        let u = Arc::clone(&h).into_unsafe();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let u = Arc::clone(&u);
                std::thread::spawn(move || {
                    u.unsafely(i);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(h.journal().len(), 4);
        assert!((0..4).contains(&h.value()));
    }
}
