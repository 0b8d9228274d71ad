mod algorithm;
mod bounds;

pub use algorithm::{AreaProjection, KOREA_2000_UNIFIED};
pub(crate) use algorithm::Projector;
pub(crate) use bounds::combined_center;
