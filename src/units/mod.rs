//! 단위 정의 및 변환 모듈 모음.

pub mod area;
pub mod pressure;

pub use area::{convert_area, AreaUnit};
pub use pressure::{convert_pressure, PressureUnit};
