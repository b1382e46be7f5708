pub mod anchors;
pub mod clock;
pub mod constant;

pub use anchors::{AnchorSet, AnchorSpec, AnchorTable};
pub use clock::parse_clock_time;
pub use constant::LinearRetime;

/// Applies the common output policy for transformed timestamps: a record
/// pushed entirely before the stream origin is dropped, one that merely
/// starts before it is clamped to zero.
pub(crate) fn clamp_to_origin(start: i64, end: i64) -> Option<(u64, u64)> {
    if end <= 0 {
        return None;
    }
    Some((start.max(0) as u64, end as u64))
}
