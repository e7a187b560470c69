mod impls;

/// Trait for an object that has a position.
///
/// Implementing this trait allows a collection of objects to be indexed directly with
/// [`BbdTree::from_positions`](crate::BbdTree::from_positions) when the position implements
/// [`Coordinates`]. It can be derived for structs with a field named `position`.
///
/// ```
/// use aknn::prelude::*;
///
/// #[derive(Position)]
/// struct Station {
///     name: &'static str,
///     position: [f64; 2],
/// }
///
/// let stations = [
///     Station { name: "north", position: [0.0, 10.0] },
///     Station { name: "south", position: [0.0, -10.0] },
/// ];
///
/// let tree = BbdTree::from_positions(&stations, BuildConfig::default()).unwrap();
/// let nearest = tree.nearest([1.0, 8.0]).unwrap();
/// assert_eq!(stations[nearest.index].name, "north");
/// ```
pub trait Position {
    /// The type used to represent the position.
    type Vector;

    /// Returns the position of the object.
    fn position(&self) -> Self::Vector;
}

impl<S: Copy, const D: usize> Position for [S; D] {
    type Vector = Self;

    #[inline]
    fn position(&self) -> Self::Vector {
        *self
    }
}

impl<V: Clone, T> Position for (V, T) {
    type Vector = V;

    #[inline]
    fn position(&self) -> Self::Vector {
        self.0.clone()
    }
}

/// Trait to convert a vector into an array of `D` coordinates.
pub trait Coordinates<S, const D: usize> {
    /// Returns the coordinates of the vector.
    fn coordinates(&self) -> [S; D];
}

impl<S: Copy, const D: usize> Coordinates<S, D> for [S; D] {
    #[inline]
    fn coordinates(&self) -> [S; D] {
        *self
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! impl_coordinates {
    ([$scalar: ty; $dim: literal], $vector: ty, { $($f: ident),+ }) => {
        impl $crate::position::Coordinates<$scalar, $dim> for $vector {
            #[inline]
            fn coordinates(&self) -> [$scalar; $dim] {
                [$(self.$f),+]
            }
        }

        impl $crate::position::Position for $vector {
            type Vector = Self;

            #[inline]
            fn position(&self) -> Self::Vector {
                *self
            }
        }
    };
}
