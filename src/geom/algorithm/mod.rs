mod proj;

pub use proj::{AreaProjection, KOREA_2000_UNIFIED};
pub(crate) use proj::Projector;
