//! Vector and matrix value types.
//!
//! Conventions shared by every type here:
//! - matrices are row-major over the labeled triples, so columns are the
//!   images of the basis vectors;
//! - points are column vectors, `p' = R·p + t`;
//! - composition `a · b` applies `b` first.

mod vector3;
mod matrix3;
mod matrix4;
mod frame;
mod interop;

pub use vector3::Vector3;
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use frame::CoordinateSystem;
