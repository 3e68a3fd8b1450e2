// src/vec3.rs

/// 3D vector dot product.
#[inline]
pub fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// 3D vector cross product: a × b.
#[inline]
pub fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Euclidean norm of a 3D vector.
#[inline]
pub fn norm(v: [f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

/// Normalise a 3D vector to unit length. Returns `None` for the zero vector,
/// which has no direction to normalise.
#[inline]
pub fn try_normalize(v: [f64; 3]) -> Option<[f64; 3]> {
    let n2 = dot(v, v);
    if n2 == 0.0 {
        return None;
    }
    let inv = 1.0 / n2.sqrt();
    Some([v[0] * inv, v[1] * inv, v[2] * inv])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_of_unit_axes() {
        let x = [1.0, 0.0, 0.0];
        let y = [0.0, 1.0, 0.0];
        assert_eq!(cross(x, y), [0.0, 0.0, 1.0]);
        assert_eq!(cross(y, x), [0.0, 0.0, -1.0]);
    }

    #[test]
    fn normalise_rejects_zero_vector() {
        assert!(try_normalize([0.0, 0.0, 0.0]).is_none());
        let v = try_normalize([0.0, 3.0, 4.0]).unwrap();
        assert!((norm(v) - 1.0).abs() < 1e-12);
        assert!((v[1] - 0.6).abs() < 1e-12);
    }
}
