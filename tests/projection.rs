use cgmath::{Deg, Matrix4};

use glsquare::frame::{FrameParams, Projection};
use glsquare::math::Mat4;

#[test]
fn perspective_agrees_with_cgmath() {
    let ours = Projection::default().matrix().to_cols_array();
    let theirs: Matrix4<f64> = cgmath::perspective(Deg(45.0), 640.0 / 480.0, 0.1, 100.0);
    let theirs: &[f64; 16] = theirs.as_ref();

    for (a, b) in ours.iter().zip(theirs.iter()) {
        assert!((a - b).abs() < 1e-12, "{ours:?} != {theirs:?}");
    }
}

#[test]
fn translation_agrees_with_cgmath() {
    let ours = FrameParams::default().model_view().to_cols_array();
    let theirs = Matrix4::from_translation(cgmath::Vector3::new(0.0, 0.0, -6.0));
    let theirs: &[f64; 16] = theirs.as_ref();

    assert_eq!(&ours, theirs);
}

#[test]
fn product_agrees_with_cgmath() {
    let p = Mat4::perspective(45.0, 640.0 / 480.0, 0.1, 100.0);
    let t = Mat4::translation(0.0, 0.0, -6.0);
    let ours = (p * t).to_cols_array();

    let theirs = cgmath::perspective(Deg(45.0), 640.0 / 480.0, 0.1, 100.0)
        * Matrix4::from_translation(cgmath::Vector3::new(0.0, 0.0, -6.0));
    let theirs: &[f64; 16] = theirs.as_ref();

    for (a, b) in ours.iter().zip(theirs.iter()) {
        assert!((a - b).abs() < 1e-12);
    }
}
