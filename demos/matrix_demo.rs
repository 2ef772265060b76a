//! Demo of the pose matrix and vector operations

use matops::{evaluate, Matrix3, Matrix4, Mode, Settings, Value, Vector3};
use std::f64::consts::PI;

fn main() {
    println!("=== MATOPS Matrix Demo ===\n");

    // Vector operations
    println!("1. Vector Operations:");
    let v1 = Vector3::from_coords(1.0, 0.0, 0.0);
    let v2 = Vector3::from_coords(0.0, 1.0, 0.0);
    println!("  Dot product: {:.3}", v1.dot(&v2));
    let cross = v1.cross(&v2);
    println!("  Cross product: ({:.3}, {:.3}, {:.3})", cross.x(), cross.y(), cross.z());
    match v1.angle_between(&v2) {
        Ok(angle) => println!("  Angle between: {:.3} rad ({:.1}°)", angle, angle.to_degrees()),
        Err(err) => println!("  Angle between: {err}"),
    }
    if let Err(err) = Vector3::new().normalize() {
        println!("  Normalizing the null vector: {err}");
    }

    // Matrix3 operations
    println!("\n2. Matrix3 Operations:");
    let (s, c) = (PI / 4.0).sin_cos();
    let rot = Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0);
    let r = rot * v1;
    println!("  Rotated X by 45°: ({:.3}, {:.3}, {:.3})", r.x(), r.y(), r.z());
    println!("  Determinant: {:.3}", rot.determinant());
    let singular = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
    println!("  Singular determinant: {:.3}", singular.determinant());

    // Matrix4 composition
    println!("\n3. Pose Matrices:");
    let shift = Matrix4::identity_by_translation(5.0, 10.0, 15.0);
    let turn = Matrix4::from_parts(&rot, &Vector3::new());
    let pose = shift.cross_product(&turn);
    let p = pose.transform_point(&Vector3::from_coords(1.0, 0.0, 0.0));
    println!("  Transformed point: ({:.3}, {:.3}, {:.3})", p.x(), p.y(), p.z());
    println!("  Identity flag: {}", pose.is_identity());
    let cs = pose.coordinate_system_get();
    println!("  Origin: ({:.1}, {:.1}, {:.1})", cs.origin.x(), cs.origin.y(), cs.origin.z());
    println!("  X axis: ({:.3}, {:.3}, {:.3})", cs.x_axis.x(), cs.x_axis.y(), cs.x_axis.z());
    if let Some(inv) = pose.inverted() {
        println!("  Pose · inverse is identity: {}", (pose * inv).is_identity());
    }

    // Driver modes
    println!("\n4. Driver Modes:");
    let settings = Settings::default();
    let a = Value::Matrix4(Matrix4::identity_by_translation(1.0, 0.0, 0.0));
    let b = Value::Matrix4(Matrix4::identity_by_translation(0.0, 1.0, 0.0));
    for mode in [Mode::Multiply, Mode::Add] {
        match evaluate(mode, &a, Some(&b), &settings) {
            Ok(value) => println!("  {mode}: {:?}", value.values()),
            Err(err) => println!("  {mode}: {}", err.user_message()),
        }
    }
}
