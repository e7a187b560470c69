use std::{
    fmt::Debug,
    ops::{Add, Div, Mul, Neg, Sub},
};

/// Trait for the element `infinity`.
pub trait Infinity {
    /// `infinity` (∞) value of the type.
    fn infinity() -> Self;
}

/// Trait to compute the minimum and maximum of a number.
pub trait MinMax {
    /// Returns the minimum between two numbers.
    fn min(self, rhs: Self) -> Self;

    /// Returns the maximum between two numbers.
    fn max(self, rhs: Self) -> Self;
}

/// Trait to compute the midpoint of two numbers.
pub trait MidPoint {
    /// Returns the middle point of `self` and `rhs`.
    fn midpoint(self, rhs: Self) -> Self;
}

/// Trait to compute the square root of a number.
pub trait Sqrt {
    /// Returns the square root of a number.
    fn sqrt(self) -> Self;
}

/// Floating-point scalar the coordinates of a [`BbdTree`](crate::BbdTree) are made of.
pub trait Scalar:
    Copy
    + Debug
    + Default
    + PartialOrd
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Infinity
    + MinMax
    + MidPoint
    + Sqrt
    + 'static
{
    /// Additive identity.
    const ZERO: Self;

    /// Multiplicative identity.
    const ONE: Self;

    /// Converts an `f64` into this scalar, rounding if needed.
    fn from_f64(value: f64) -> Self;

    /// Returns `true` if the number is neither infinite nor NaN.
    fn is_finite(self) -> bool;
}

macro_rules! impl_floats {
    ($s: ty) => {
        impl Infinity for $s {
            #[inline]
            fn infinity() -> Self {
                Self::INFINITY
            }
        }

        impl MinMax for $s {
            #[inline]
            fn min(self, rhs: Self) -> Self {
                self.min(rhs)
            }

            #[inline]
            fn max(self, rhs: Self) -> Self {
                self.max(rhs)
            }
        }

        impl MidPoint for $s {
            #[inline]
            fn midpoint(self, rhs: Self) -> Self {
                self * 0.5 + rhs * 0.5
            }
        }

        impl Sqrt for $s {
            #[inline]
            fn sqrt(self) -> Self {
                self.sqrt()
            }
        }

        impl Scalar for $s {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $s
            }

            #[inline]
            fn is_finite(self) -> bool {
                self.is_finite()
            }
        }
    };
}

impl_floats!(f32);
impl_floats!(f64);

/// Squared Euclidean distance between two points.
#[inline]
pub fn distance_squared<const D: usize, S: Scalar>(a: &[S; D], b: &[S; D]) -> S {
    a.iter().zip(b).fold(S::ZERO, |acc, (&a, &b)| {
        let d = a - b;
        acc + d * d
    })
}

/// An axis-aligned bounding box using arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox<A> {
    /// Minimum corner of the box.
    pub min: A,
    /// Maximum corner of the box.
    pub max: A,
}

impl<A> BoundingBox<A> {
    /// Creates a new [`BoundingBox`] with the given min and max values.
    #[inline]
    pub const fn new(min: A, max: A) -> Self {
        Self { min, max }
    }
}

impl<const D: usize, S: Scalar> Default for BoundingBox<[S; D]> {
    #[inline]
    fn default() -> Self {
        Self::new([S::infinity(); D], [-S::infinity(); D])
    }
}

#[allow(clippy::needless_range_loop)]
impl<const D: usize, S: Scalar> BoundingBox<[S; D]> {
    /// Extends the [`BoundingBox`] so that it contains the given position.
    #[inline]
    pub fn extend(&mut self, position: &[S; D]) {
        for i in 0..D {
            self.min[i] = MinMax::min(self.min[i], position[i]);
            self.max[i] = MinMax::max(self.max[i], position[i]);
        }
    }

    /// Creates a new [`BoundingBox`] that contains the given positions.
    ///
    /// The box of no position is the inverted infinite box returned by [`Default`].
    #[inline]
    pub fn with<'a, I>(positions: I) -> Self
    where
        I: IntoIterator<Item = &'a [S; D]>,
    {
        let mut result = Self::default();
        for position in positions {
            result.extend(position);
        }
        result
    }

    /// Returns the center of the [`BoundingBox`].
    #[inline]
    pub fn center(&self) -> [S; D] {
        let mut r = [S::ZERO; D];
        for i in 0..D {
            r[i] = self.min[i].midpoint(self.max[i]);
        }
        r
    }

    /// Returns the size of the [`BoundingBox`].
    #[inline]
    pub fn size(&self) -> [S; D] {
        let mut r = [S::ZERO; D];
        for i in 0..D {
            r[i] = self.max[i] - self.min[i];
        }
        r
    }

    /// Returns the length of the diagonal of the [`BoundingBox`].
    #[inline]
    pub fn diagonal(&self) -> S {
        distance_squared(&self.min, &self.max).sqrt()
    }

    /// Returns the dimension along which the [`BoundingBox`] is the longest, the lowest one on ties.
    #[inline]
    pub fn longest_dimension(&self) -> usize {
        let size = self.size();
        let mut longest = 0;
        for i in 1..D {
            if size[i] > size[longest] {
                longest = i;
            }
        }
        longest
    }

    /// Returns the squared distance between the given position and the closest point of the
    /// [`BoundingBox`], zero if it lies inside.
    ///
    /// This is a lower bound of the squared distance to every position the box contains.
    #[inline]
    pub fn distance_squared(&self, position: &[S; D]) -> S {
        let mut result = S::ZERO;
        for i in 0..D {
            let p = position[i];
            let d = if p < self.min[i] {
                self.min[i] - p
            } else if p > self.max[i] {
                p - self.max[i]
            } else {
                continue;
            };
            result = result + d * d;
        }
        result
    }

    /// Returns `true` if the given position lies inside the closed [`BoundingBox`].
    #[inline]
    pub fn contains(&self, position: &[S; D]) -> bool {
        (0..D).all(|i| self.min[i] <= position[i] && position[i] <= self.max[i])
    }

    /// Returns `true` if the other [`BoundingBox`] lies inside this one.
    #[inline]
    pub fn contains_box(&self, other: &Self) -> bool {
        (0..D).all(|i| self.min[i] <= other.min[i] && other.max[i] <= self.max[i])
    }

    /// Cuts the [`BoundingBox`] along `dim` at `value` and returns the lower and upper halves.
    #[inline]
    pub fn split(&self, dim: usize, value: S) -> (Self, Self) {
        let mut left = *self;
        let mut right = *self;
        left.max[dim] = value;
        right.min[dim] = value;
        (left, right)
    }

    /// Returns `true` if every side of the [`BoundingBox`] has a length of zero.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        (0..D).all(|i| self.min[i] == self.max[i])
    }
}
