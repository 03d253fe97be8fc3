use core::ops::Mul;

use super::Vec2;

/// Column-major 4x4 matrix, the shape shader uniforms expect.
///
/// Only what the batching path needs: an orthographic projection over pixel
/// space and multiplication so callers can combine projection and view
/// before handing the result to a pool.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Orthographic projection mapping `[left,right] x [bottom,top]` to the
    /// -1..1 clip cube.
    ///
    /// For the crate's y-down pixel space pass `top = 0.0` and `bottom =
    /// height` so the top-left corner lands at clip (-1, 1).
    #[must_use]
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        let rl = right - left;
        let tb = top - bottom;
        let fne = far - near;

        Mat4 {
            cols: [
                [2.0 / rl, 0.0, 0.0, 0.0],
                [0.0, 2.0 / tb, 0.0, 0.0],
                [0.0, 0.0, -2.0 / fne, 0.0],
                [
                    -(right + left) / rl,
                    -(top + bottom) / tb,
                    -(far + near) / fne,
                    1.0,
                ],
            ],
        }
    }

    /// Applies the matrix to a point at z = 0, w = 1.
    #[must_use]
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        let m = &self.cols;
        Vec2::new(
            m[0][0] * point.x + m[1][0] * point.y + m[3][0],
            m[0][1] * point.x + m[1][1] * point.y + m[3][1],
        )
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    /// `self * rhs`: the right-hand matrix applies first.
    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut cols = [[0.0f32; 4]; 4];
        for (c, col) in cols.iter_mut().enumerate() {
            for (r, cell) in col.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.cols[k][r] * rhs.cols[c][k]).sum();
            }
        }
        Mat4 { cols }
    }
}
