//! Ownership capability for registry storage
//!
//! A registry stores one owned value per entry and hands out borrowed views
//! of it. [`Ownership`] describes how: what is owned, and what a borrow of it
//! looks like. Two variants exist:
//!
//! - [`ByValue<T>`]: the registry owns `T` directly.
//! - [`Boxed<T>`]: the registry owns a `Box<T>` handle, which allows unsized
//!   targets such as `dyn Trait`.
//!
//! Values move into the registry on insert and move back out on
//! [`take`](crate::NameIdRegistry::take); dropping the registry or removing an
//! entry drops the owned value.

use std::any::Any;
use std::marker::PhantomData;

/// How a registry owns and exposes its values
pub trait Ownership {
    /// What the registry stores and gives back on `take`
    type Owned;
    /// What callers borrow
    type Target: ?Sized;

    /// Borrow the target of an owned value
    fn retrieve(owned: &Self::Owned) -> &Self::Target;

    /// Mutably borrow the target of an owned value
    fn retrieve_mut(owned: &mut Self::Owned) -> &mut Self::Target;
}

/// Values stored directly
#[derive(Debug)]
pub struct ByValue<T>(PhantomData<T>);

impl<T> Ownership for ByValue<T> {
    type Owned = T;
    type Target = T;

    #[inline]
    fn retrieve(owned: &T) -> &T {
        owned
    }

    #[inline]
    fn retrieve_mut(owned: &mut T) -> &mut T {
        owned
    }
}

/// Values stored behind an exclusively owned `Box`
#[derive(Debug)]
pub struct Boxed<T: ?Sized>(PhantomData<Box<T>>);

impl<T: ?Sized> Ownership for Boxed<T> {
    type Owned = Box<T>;
    type Target = T;

    #[inline]
    fn retrieve(owned: &Box<T>) -> &T {
        owned
    }

    #[inline]
    fn retrieve_mut(owned: &mut Box<T>) -> &mut T {
        owned
    }
}

/// Downcast support for polymorphic handles
///
/// Implemented for every `'static` sized type. Make it a supertrait of the
/// base trait stored in a [`HandleRegistry`](crate::HandleRegistry) to enable
/// [`emplace_as`](crate::NameIdRegistry::emplace_as):
///
/// ```
/// use lodestone_registry::AsAny;
///
/// trait Component: AsAny {
///     fn tick(&mut self);
/// }
/// ```
pub trait AsAny: Any {
    /// Borrow as `dyn Any`
    fn as_any(&self) -> &dyn Any;

    /// Mutably borrow as `dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
