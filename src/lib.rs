//! 살수 범위 클리핑과 배관 손실 수두 계산을 UI와 분리한 라이브러리.
//! CLI는 이 위에 얇게 얹혀 있다.

pub mod app;
pub mod config;
pub mod geometry;
pub mod hydraulics;
pub mod ui_cli;
pub mod units;
