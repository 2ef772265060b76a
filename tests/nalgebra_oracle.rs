//! Cross-checks against nalgebra.

use approx::assert_abs_diff_eq;
use matops::{Matrix3, Matrix4, Vector3};
use nalgebra as na;

fn samples() -> Vec<Matrix4> {
    vec![
        Matrix4::from_fields([2.0, -1.0, 0.5, 3.0, 0.0, 1.5, 2.0, -4.0, 1.0, 0.0, 3.0, 0.25]),
        Matrix4::from_fields([0.0, -1.0, 0.0, 2.0, 1.0, 0.0, 0.0, -3.0, 0.0, 0.0, 1.0, 0.5]),
        Matrix4::from_rows([
            [1.0, 2.0, 0.0, 1.0],
            [0.0, 1.0, 3.0, 0.0],
            [4.0, 0.0, 1.0, 2.0],
            [0.0, 0.5, 0.0, 1.0],
        ]),
    ]
}

#[test]
fn test_product_matches_nalgebra() {
    for a in samples() {
        for b in samples() {
            let ours: na::Matrix4<f64> = (a * b).into();
            let theirs = na::Matrix4::from(a) * na::Matrix4::from(b);
            assert_abs_diff_eq!(ours, theirs, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_determinants_match_nalgebra() {
    for m in samples() {
        let full: na::Matrix4<f64> = m.into();
        assert_abs_diff_eq!(m.determinant(), full.determinant(), epsilon = 1e-9);

        let rot: na::Matrix3<f64> = m.rotation_part().into();
        assert_abs_diff_eq!(m.rotation_part().determinant(), rot.determinant(), epsilon = 1e-9);
    }
}

#[test]
fn test_inverse_matches_nalgebra() {
    for m in samples() {
        let ours: na::Matrix4<f64> = m.inverted().unwrap().into();
        let theirs = na::Matrix4::from(m).try_inverse().unwrap();
        assert_abs_diff_eq!(ours, theirs, epsilon = 1e-9);
    }
}

#[test]
fn test_matrix3_product_matches_nalgebra() {
    let a = Matrix3::new(1.0, 2.0, 3.0, 0.0, -1.0, 4.0, 2.0, 2.0, 0.5);
    let b = Matrix3::new(0.0, 1.0, 0.0, -1.0, 0.0, 2.0, 3.0, 0.0, 1.0);
    let ours: na::Matrix3<f64> = (a * b).into();
    let theirs = na::Matrix3::from(a) * na::Matrix3::from(b);
    assert_abs_diff_eq!(ours, theirs, epsilon = 1e-12);
}

#[test]
fn test_cross_matches_nalgebra() {
    let a = Vector3::from_coords(1.0, -2.0, 3.5);
    let b = Vector3::from_coords(0.25, 4.0, -1.0);
    let theirs = na::Vector3::from(a).cross(&na::Vector3::from(b));
    assert_abs_diff_eq!(Vector3::from(theirs), a.cross(&b), epsilon = 1e-12);
}

#[test]
fn test_point_transform_matches_nalgebra() {
    let m = samples()[0];
    let p = Vector3::from_coords(1.0, 2.0, 3.0);
    let theirs = na::Matrix4::from(m).transform_point(&na::Point3::from(p));
    let ours = m.transform_point(&p);
    assert_abs_diff_eq!(ours, Vector3::from_coords(theirs.x, theirs.y, theirs.z), epsilon = 1e-12);
}
