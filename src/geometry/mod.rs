//! 살수 범위 계산용 평면 기하 모듈 모음.

pub mod clip;
pub mod coverage;
pub mod measure;
pub mod point;
pub mod polygon;

pub use clip::*;
pub use coverage::*;
pub use measure::*;
pub use point::*;
pub use polygon::*;
