//! Crate-private marker restricting who may implement the capability traits.
//!
//! `Sealed` is public so it can appear as a supertrait, but the module that
//! holds it is not exported: downstream crates can neither name nor
//! implement it, so they cannot implement any trait that requires it.

pub trait Sealed {}
