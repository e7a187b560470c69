use glam::{DVec2, DVec3, DVec4, Vec2, Vec3, Vec3A, Vec4};

crate::impl_coordinates!([f32; 2], Vec2, { x, y });
crate::impl_coordinates!([f32; 3], Vec3, { x, y, z });
crate::impl_coordinates!([f32; 3], Vec3A, { x, y, z });
crate::impl_coordinates!([f32; 4], Vec4, { x, y, z, w });
crate::impl_coordinates!([f64; 2], DVec2, { x, y });
crate::impl_coordinates!([f64; 3], DVec3, { x, y, z });
crate::impl_coordinates!([f64; 4], DVec4, { x, y, z, w });

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use glam::DVec3;

    #[test]
    fn glam_positions() {
        let points = [DVec3::ZERO, DVec3::X, DVec3::new(0.0, 5.0, 0.0)];
        let tree = BbdTree::<f64, 3>::from_positions(&points, BuildConfig::default()).unwrap();
        let nearest = tree.k_nearest([0.9, 0.0, 0.0], 2).unwrap();

        assert_eq!(nearest[0].index, 1);
        assert_eq!(nearest[1].index, 0);
    }
}
