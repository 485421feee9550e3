//! Badge geometry: metric projection, perimeter parametrization and
//! segment partitioning.

pub mod partition;
pub mod perimeter;
pub mod projection;
