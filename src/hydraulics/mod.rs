//! 배관 마찰손실 표 조회와 손실 수두 계산 모듈 모음.

pub mod conservative;
pub mod correction;
pub mod head_loss;
pub mod pressure_loss;
pub mod selection;
pub mod tables;

pub use conservative::*;
pub use correction::*;
pub use head_loss::*;
pub use pressure_loss::*;
pub use selection::*;
pub use tables::*;
