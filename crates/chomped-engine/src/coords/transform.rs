use std::ops::Mul;

/// Column-major 4x4 float matrix (model-view-projection).
///
/// Layout matches WGSL `mat4x4<f32>`: `cols[c][r]`. The upload order of
/// [`to_cols_array`](Self::to_cols_array) is the same 16 floats a GL-style
/// `uniformMatrix4fv(.., transpose = false, ..)` expects.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub cols: [[f32; 4]; 4],
}

impl Transform {
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    #[inline]
    pub const fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        Self { cols }
    }

    pub fn from_cols_array(m: &[f32; 16]) -> Self {
        let mut cols = [[0.0; 4]; 4];
        for (c, col) in cols.iter_mut().enumerate() {
            col.copy_from_slice(&m[c * 4..c * 4 + 4]);
        }
        Self { cols }
    }

    pub fn to_cols_array(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for (c, col) in self.cols.iter().enumerate() {
            out[c * 4..c * 4 + 4].copy_from_slice(col);
        }
        out
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[0][0] = x;
        m.cols[1][1] = y;
        m.cols[2][2] = z;
        m
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = [x, y, z, 1.0];
        m
    }

    /// Applies the matrix to a point (`w = 1`).
    pub fn transform_point(&self, p: [f32; 3]) -> [f32; 4] {
        let v = [p[0], p[1], p[2], 1.0];
        let mut out = [0.0; 4];
        for (r, o) in out.iter_mut().enumerate() {
            *o = (0..4).map(|c| self.cols[c][r] * v[c]).sum();
        }
        out
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.cols.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        let mut cols = [[0.0; 4]; 4];
        for (c, col) in cols.iter_mut().enumerate() {
            for (r, v) in col.iter_mut().enumerate() {
                *v = (0..4).map(|k| self.cols[k][r] * rhs.cols[c][k]).sum();
            }
        }
        Transform { cols }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_leaves_points_alone() {
        assert_eq!(Transform::IDENTITY.transform_point([0.5, -1.0, 2.0]), [0.5, -1.0, 2.0, 1.0]);
    }

    #[test]
    fn cols_array_round_trip() {
        let raw: [f32; 16] = std::array::from_fn(|i| i as f32);
        let m = Transform::from_cols_array(&raw);
        assert_eq!(m.cols[1], [4.0, 5.0, 6.0, 7.0]);
        assert_eq!(m.to_cols_array(), raw);
    }

    #[test]
    fn translation_lives_in_last_column() {
        let m = Transform::translation(1.0, 2.0, 3.0);
        assert_eq!(m.to_cols_array()[12..15], [1.0, 2.0, 3.0]);
        assert_eq!(m.transform_point([0.0, 0.0, 0.0]), [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn product_applies_right_operand_first() {
        let m = Transform::translation(1.0, 0.0, 0.0) * Transform::scale(2.0, 2.0, 2.0);
        assert_eq!(m.transform_point([1.0, 1.0, 0.0]), [3.0, 2.0, 0.0, 1.0]);

        let n = Transform::scale(2.0, 2.0, 2.0) * Transform::translation(1.0, 0.0, 0.0);
        assert_eq!(n.transform_point([1.0, 1.0, 0.0]), [4.0, 2.0, 0.0, 1.0]);
    }

    #[test]
    fn identity_is_neutral() {
        let m = Transform::translation(3.0, -2.0, 0.5) * Transform::scale(0.5, 4.0, 1.0);
        assert_eq!(Transform::IDENTITY * m, m);
        assert_eq!(m * Transform::IDENTITY, m);
    }
}
