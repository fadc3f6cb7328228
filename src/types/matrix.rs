//! Row-major 3x4 affine transform used for primitive placement.

use crate::types::Vector3;

/// A row-major affine transform: a 3x3 rotation/scale basis in columns 0-2
/// and a translation in column 3, stored as 12 floats in stream order
/// (row 0, row 1, row 2 of a 3x4 matrix).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3x4 {
    /// `m[row][col]`, row in 0..3, col in 0..4.
    pub m: [[f32; 4]; 3],
}

impl Matrix3x4 {
    /// Builds a matrix from the 12 floats as they appear in the stream:
    /// row-major, three rows of four columns each.
    pub fn from_rows(values: [f32; 12]) -> Self {
        Matrix3x4 {
            m: [
                [values[0], values[1], values[2], values[3]],
                [values[4], values[5], values[6], values[7]],
                [values[8], values[9], values[10], values[11]],
            ],
        }
    }

    /// Identity transform.
    pub fn identity() -> Self {
        Matrix3x4 {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
            ],
        }
    }

    /// Scales the 3x3 rotation/scale basis (columns 0-2) uniformly by
    /// `factor`, leaving the translation column (column 3) untouched.
    pub fn scale_basis(&mut self, factor: f32) {
        for row in self.m.iter_mut() {
            row[0] *= factor;
            row[1] *= factor;
            row[2] *= factor;
        }
    }

    /// The translation column.
    pub fn translation(&self) -> Vector3 {
        Vector3::new(self.m[0][3], self.m[1][3], self.m[2][3])
    }

    /// Applies the full affine transform to a point.
    pub fn transform_point(&self, v: Vector3) -> Vector3 {
        Vector3::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z + self.m[0][3],
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z + self.m[1][3],
            self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z + self.m[2][3],
        )
    }

    /// Applies only the rotation/scale basis, ignoring translation.
    pub fn transform_direction(&self, v: Vector3) -> Vector3 {
        Vector3::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z,
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z,
            self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z,
        )
    }
}

impl Default for Matrix3x4 {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform_point() {
        let m = Matrix3x4::identity();
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(m.transform_point(v), v);
    }

    #[test]
    fn test_scale_basis_leaves_translation() {
        let mut m = Matrix3x4::from_rows([
            1.0, 0.0, 0.0, 10.0, 0.0, 1.0, 0.0, 20.0, 0.0, 0.0, 1.0, 30.0,
        ]);
        m.scale_basis(2.0);
        assert_eq!(m.translation(), Vector3::new(10.0, 20.0, 30.0));
        let v = m.transform_point(Vector3::ZERO);
        assert_eq!(v, Vector3::new(10.0, 20.0, 30.0));
        let dir = m.transform_direction(Vector3::UNIT_X);
        assert_eq!(dir, Vector3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_from_rows_order() {
        let m = Matrix3x4::from_rows([
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0,
        ]);
        assert_eq!(m.m[0], [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(m.m[2], [9.0, 10.0, 11.0, 12.0]);
    }
}
