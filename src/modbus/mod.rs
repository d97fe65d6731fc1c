pub mod protocol;
pub mod transform;

pub use protocol::{Operation, ReadKind, Reading, BYTES_PER_REGISTER};
pub use transform::Transform;
