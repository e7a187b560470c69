use ultraviolet::{DVec2, DVec3, DVec4, Vec2, Vec3, Vec4};

crate::impl_coordinates!([f32; 2], Vec2, { x, y });
crate::impl_coordinates!([f32; 3], Vec3, { x, y, z });
crate::impl_coordinates!([f32; 4], Vec4, { x, y, z, w });
crate::impl_coordinates!([f64; 2], DVec2, { x, y });
crate::impl_coordinates!([f64; 3], DVec3, { x, y, z });
crate::impl_coordinates!([f64; 4], DVec4, { x, y, z, w });
