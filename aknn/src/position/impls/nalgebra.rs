use crate::{
    position::{Coordinates, Position},
    Scalar,
};
use nalgebra::SVector;

impl<S, const D: usize> Coordinates<S, D> for SVector<S, D>
where
    S: Scalar + nalgebra::Scalar,
{
    #[inline]
    fn coordinates(&self) -> [S; D] {
        std::array::from_fn(|i| self[i])
    }
}

impl<S, const D: usize> Position for SVector<S, D>
where
    S: nalgebra::Scalar,
{
    type Vector = Self;

    #[inline]
    fn position(&self) -> Self::Vector {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use nalgebra::Vector2;

    #[test]
    fn nalgebra_positions() {
        let points = [Vector2::new(0.0f32, 0.0), Vector2::new(4.0, 4.0)];
        let tree = BbdTree::<f32, 2>::from_positions(&points, BuildConfig::default()).unwrap();

        assert_eq!(tree.nearest([3.0, 3.5]).unwrap().index, 1);
    }
}
