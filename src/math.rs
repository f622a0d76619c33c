//! Minimal 4x4 matrix support for the fixed camera.

use std::ops::Mul;

/// Row-major 4x4 matrix of `f64`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    rows: [[f64; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Self { rows }
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        let mut m = Self::IDENTITY;
        m.rows[0][3] = x;
        m.rows[1][3] = y;
        m.rows[2][3] = z;
        m
    }

    #[rustfmt::skip]
    pub fn frustum(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let x = 2.0 * near / (right - left);
        let y = 2.0 * near / (top - bottom);
        let a = (right + left) / (right - left);
        let b = (top + bottom) / (top - bottom);
        let c = -(far + near) / (far - near);
        let d = -2.0 * far * near / (far - near);

        Self::from_rows([
            [x,   0.0, a,    0.0],
            [0.0, y,   b,    0.0],
            [0.0, 0.0, c,    d],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Symmetric frustum; `fov_y` is the full vertical angle in degrees.
    pub fn perspective(fov_y: f64, aspect: f64, near: f64, far: f64) -> Self {
        let y_max = near * (fov_y * std::f64::consts::PI / 360.0).tan();
        let y_min = -y_max;
        let x_min = y_min * aspect;
        let x_max = y_max * aspect;

        Self::frustum(x_min, x_max, y_min, y_max, near, far)
    }

    pub fn to_rows_array(&self) -> [f64; 16] {
        let mut out = [0.0; 16];
        for (row, values) in self.rows.iter().enumerate() {
            out[row * 4..row * 4 + 4].copy_from_slice(values);
        }
        out
    }

    pub fn to_cols_array(&self) -> [f64; 16] {
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = self.rows[row][col];
            }
        }
        out
    }

    /// Column-major `f32` layout expected by `glUniformMatrix4fv` without
    /// transposition.
    pub fn to_gl(&self) -> [f32; 16] {
        self.to_cols_array().map(|v| v as f32)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.rows[i][k] * rhs.rows[k][j]).sum();
            }
        }
        Mat4 { rows }
    }
}
