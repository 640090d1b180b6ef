//! Subtype variant: [`UnsafeFoo`] extends [`Foo`].
//!
//! Every unsafe view is also a safe view, so safe operations stay callable
//! after gating and [`UnsafeFoo::as_foo`] is a plain upcast.
//!
//! ```
//! use capgate::subtype;
//!
//! let h = subtype::create();
//! h.safely(1).safely(2);
//! h.as_unsafe().unsafely(10).as_foo().safely(2);
//! assert_eq!(h.value(), 12);
//! ```
//!
//! A safe handle does not expose unsafe operations:
//!
//! ```compile_fail
//! use capgate::subtype;
//!
//! let h = subtype::create();
//! h.unsafely(1);
//! ```
//!
//! Downstream crates cannot implement the traits:
//!
//! ```compile_fail
//! use capgate::subtype::{Foo, UnsafeFoo};
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
//!     fn as_foo(&self) -> &dyn Foo { self }
//!     fn into_foo(self: Arc<Self>) -> Arc<dyn Foo> { self }
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

    /// Current value. Always within [`Foo::bounds`] unless an unsafe view
    /// has written to the instance.
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

    /// Owning form of [`Foo::as_unsafe`]; reuses the same allocation.
    fn into_unsafe(self: Arc<Self>) -> Arc<dyn UnsafeFoo>;
}

/// Unsafe interface. Inherits everything on [`Foo`].
pub trait UnsafeFoo: Foo {
    /// Overwrite the value without checking bounds.
    fn unsafely(&self, raw: i64) -> &dyn UnsafeFoo;

    /// Upcast back to the safe view.
    fn as_foo(&self) -> &dyn Foo;

    /// Owning form of [`UnsafeFoo::as_foo`].
    fn into_foo(self: Arc<Self>) -> Arc<dyn Foo>;
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

    fn as_foo(&self) -> &dyn Foo {
        self.core.crossed("as_foo");
        self
    }

    fn into_foo(self: Arc<Self>) -> Arc<dyn Foo> {
        self.core.crossed("into_foo");
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
