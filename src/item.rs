//! Two-ended items.
//!
//! Only the `(start, end)` pair of an item matters for cost purposes, but
//! solvers hand back the caller's own item values (cloned) in the chosen
//! order, so any type implementing [`Domino`] can be sorted directly.

use crate::metric::Endpoint;

/// A two-ended unit with a start and an end endpoint.
pub trait Domino {
    /// Endpoint type shared by both ends.
    type Endpoint: Endpoint;

    /// The endpoint that touches the previous item.
    fn start(&self) -> &Self::Endpoint;

    /// The endpoint that touches the next item.
    fn end(&self) -> &Self::Endpoint;
}

/// An immutable `(start, end)` pair.
///
/// # Examples
///
/// ```
/// use u_chainsort::item::{Domino, Item};
///
/// let item = Item::new(0.0, 0.25);
/// assert_eq!(*item.start(), 0.0);
/// assert_eq!(*item.end(), 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item<E> {
    /// Start endpoint.
    pub start: E,
    /// End endpoint.
    pub end: E,
}

impl<E> Item<E> {
    /// Creates an item from its two endpoints.
    pub fn new(start: E, end: E) -> Self {
        Self { start, end }
    }
}

impl<E> From<(E, E)> for Item<E> {
    fn from((start, end): (E, E)) -> Self {
        Self { start, end }
    }
}

impl<E: Endpoint> Domino for Item<E> {
    type Endpoint = E;

    fn start(&self) -> &E {
        &self.start
    }

    fn end(&self) -> &E {
        &self.end
    }
}

impl<E: Endpoint> Domino for (E, E) {
    type Endpoint = E;

    fn start(&self) -> &E {
        &self.0
    }

    fn end(&self) -> &E {
        &self.1
    }
}

impl<E: Endpoint> Domino for [E; 2] {
    type Endpoint = E;

    fn start(&self) -> &E {
        &self[0]
    }

    fn end(&self) -> &E {
        &self[1]
    }
}

impl<D: Domino + ?Sized> Domino for &D {
    type Endpoint = D::Endpoint;

    fn start(&self) -> &D::Endpoint {
        (**self).start()
    }

    fn end(&self) -> &D::Endpoint {
        (**self).end()
    }
}
