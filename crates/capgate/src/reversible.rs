//! Disjoint variant with the reversible policy.
//!
//! Shaped like [`crate::disjoint`], but [`UnsafeFoo`] offers a way back.
//! Because the unsafe view is not a subtype of the safe one, the compiler
//! cannot vouch for the instance after unsafe writes, so
//! [`UnsafeFoo::as_safe`] checks the value against its bounds and refuses
//! with [`crate::Error::NotSafeRepresentable`] rather than hand out a safe view
//! that would break the invariant.
//!
//! ```
//! use capgate::{reversible, Error};
//!
//! let h = reversible::create();
//! let u = h.as_unsafe();
//!
//! u.unsafely(-1);
//! assert!(matches!(u.as_safe(), Err(Error::NotSafeRepresentable { value: -1, .. })));
//!
//! u.unsafely(4);
//! u.as_safe()?.safely(1);
//! assert_eq!(h.value(), 5);
//! # Ok::<(), capgate::Error>(())
//! ```
//!
//! The way back returns a `Result`, never a bare safe view:
//!
//! ```compile_fail
//! use capgate::reversible::{self, Foo};
//!
//! let h = reversible::create();
//! let _: &dyn Foo = h.as_unsafe().as_safe();
//! ```
//!
//! An unsafe handle does not expose safe operations:
//!
//! ```compile_fail
//! use capgate::reversible;
//!
//! let h = reversible::create();
//! h.as_unsafe().safely(1);
//! ```
//!
//! Neither trait can be implemented downstream:
//!
//! ```compile_fail
//! use capgate::reversible::{Foo, UnsafeFoo};
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
//!     fn as_unsafe(&self) -> &dyn UnsafeFoo { self }
//!     fn into_unsafe(self: Arc<Self>) -> Arc<dyn UnsafeFoo> { self }
//! }
//!
//! impl UnsafeFoo for Forged {
//!     fn unsafely(&self, _raw: i64) -> &dyn UnsafeFoo { self }
//!     fn as_safe(&self) -> capgate::Result<&dyn Foo> { Ok(self) }
//! }
//! ```

use std::sync::Arc;

use tracing::warn;

use crate::inner::Core;
use crate::journal::{Entry, InstanceId};
use crate::sealed::Sealed;
use crate::{Bounds, Result};

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

    /// Gate to the unsafe view of this same instance.
    fn as_unsafe(&self) -> &dyn UnsafeFoo;

    /// Owning form of [`Foo::as_unsafe`].
    fn into_unsafe(self: Arc<Self>) -> Arc<dyn UnsafeFoo>;
}

/// Unsafe interface.
pub trait UnsafeFoo: Sealed + Send + Sync {
    /// Overwrite the value without checking bounds.
    fn unsafely(&self, raw: i64) -> &dyn UnsafeFoo;

    /// Gate back to the safe view, if the instance is within its bounds.
    ///
    /// The check holds at one point in time. An `unsafely` through another
    /// unsafe handle may land right after it, and the returned view does
    /// not prevent that.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotSafeRepresentable`] when an unsafe write left the
    /// value outside the bounds.
    fn as_safe(&self) -> Result<&dyn Foo>;
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

    fn as_safe(&self) -> Result<&dyn Foo> {
        if let Err(e) = self.core.check() {
            warn!(instance = %self.core.id(), "refused safe view: {e}");
            return Err(e);
        }
        self.core.crossed("as_safe");
        Ok(self)
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
    use crate::{same_instance, Error, Op};

    #[test]
    fn test_round_trip_untouched() {
        let h = create();
        let back = h.as_unsafe().as_safe().unwrap();
        assert!(same_instance(&*h, back));
        assert_eq!(back.id(), h.id());
    }

    #[test]
    fn test_as_safe_accepts_in_bounds_writes() {
        let h = create_with(Bounds::new(0, 10).unwrap());
        let safe = h.as_unsafe().unsafely(7).as_safe().unwrap();
        safe.safely(1);
        assert_eq!(h.value(), 8);
    }

    #[test]
    fn test_as_safe_rejects_out_of_bounds() {
        let bounds = Bounds::new(0, 10).unwrap();
        let h = create_with(bounds);
        let u = h.as_unsafe();
        u.unsafely(11);

        match u.as_safe() {
            Err(Error::NotSafeRepresentable { value, bounds: b }) => {
                assert_eq!(value, 11);
                assert_eq!(b, bounds);
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("out-of-bounds instance handed out a safe view"),
        }
    }

    #[test]
    fn test_rejection_leaves_instance_untouched() {
        let h = create();
        let u = h.as_unsafe();
        u.unsafely(-3);
        assert!(u.as_safe().is_err());
        assert!(u.as_safe().is_err());

        assert_eq!(h.value(), -3);
        assert_eq!(h.journal().len(), 1);
    }

    #[test]
    fn test_repair_through_unsafe_view() {
        let h = create();
        let u = Arc::clone(&h).into_unsafe();
        u.unsafely(-3);
        assert!(u.as_safe().is_err());

        u.unsafely(2);
        let safe = u.as_safe().unwrap();
        safe.safely(3).safely(-1);

        let ops: Vec<_> = h.journal().into_iter().map(|e| e.op).collect();
        assert_eq!(
            ops,
            vec![
                Op::Unsafely { raw: -3 },
                Op::Unsafely { raw: 2 },
                Op::Safely { amount: 3 },
                Op::Safely { amount: -1 },
            ]
        );
        assert_eq!(h.value(), 4);
    }

    #[test]
    fn test_safe_view_observes_later_unsafe_writes() {
        let h = create();
        let first = Arc::clone(&h).into_unsafe();
        let second = Arc::clone(&h).into_unsafe();

        let safe = first.as_safe().unwrap();
        std::thread::spawn(move || {
            second.unsafely(-9);
        })
        .join()
        .unwrap();

        assert_eq!(safe.value(), -9);
        assert!(first.as_safe().is_err());
    }

    #[test]
    fn test_error_message() {
        let h = create_with(Bounds::new(0, 100).unwrap());
        let err = match h.as_unsafe().unsafely(-7).as_safe() {
            Err(e) => e,
            Ok(_) => panic!("expected rejection"),
        };
        assert_eq!(
            err.to_string(),
            "instance not in a safe-representable state: value -7 outside [0, 100]"
        );
    }
}
