use serde::{Deserialize, Serialize};

use super::pressure_loss::{lookup_in_table, LookupMode, SizeInfo};
use super::tables::{PipeMaterial, PipeTableSet};
use crate::units::{convert_pressure, PressureUnit};

/// 살수 헤드 압력 대비 허용 손실 수두 비율 (20%).
pub const DEFAULT_HEAD_LOSS_RATIO: f64 = 0.2;

/// 배관 구간 하나의 손실 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestPipeInfo {
    /// 배관 길이 [m]
    pub length: f64,
    /// 분기 출구 수
    pub count: u32,
    /// 유량 [L/min]
    pub water_flow_rate: f64,
}

/// 손실 수두 계산 결과. 요청마다 새로 계산하며 저장 대상이 아니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeCalculationResult {
    /// 손실 수두 [m]
    pub head_loss: f64,
    /// 표에서 읽은 압력손실 [kgf/cm²/km]
    pub pressure_loss: f64,
    pub correction_factor: f64,
    pub pipe_length: f64,
    /// 요청 유량 [L/min]
    pub flow_rate: f64,
    /// 표에서 실제 참조한 유량 [L/min]
    pub actual_flow: f64,
    pub outlet_count: u32,
    pub actual_outlet_count: u32,
    pub actual_size: String,
    pub size_info: SizeInfo,
    pub material: PipeMaterial,
    pub pressure_class_used: String,
    pub lookup_mode: LookupMode,
    /// 화면 표시용 계산 과정 (대체된 값 포함)
    pub calculation_trace: Vec<String>,
}

/// 손실 수두 = (X / 10) × L × Y.
///
/// X는 1 km당 압력손실 표 값, L은 길이 [m], Y는 출구 수 보정 계수.
/// 10은 표 단위를 맞추는 고정 환산값이다.
pub fn head_loss_formula(pressure_loss: f64, length: f64, correction_factor: f64) -> f64 {
    (pressure_loss / 10.0) * length * correction_factor
}

impl PipeTableSet {
    /// 표 행을 보간 없이 골라 손실 수두를 계산한다.
    ///
    /// 요청 등급의 표가 없으면 재질별 최대 등급으로 대체한다.
    /// 재질에 해당하는 표가 하나도 없으면 None.
    pub fn calculate_new_head_loss(
        &self,
        info: &BestPipeInfo,
        material: PipeMaterial,
        pressure_class: &str,
        pipe_size_mm: f64,
    ) -> Option<PipeCalculationResult> {
        self.calculate_head_loss_with_mode(
            info,
            material,
            pressure_class,
            pipe_size_mm,
            LookupMode::NextRow,
        )
    }

    /// 유량 행 조회 방식을 지정해 손실 수두를 계산한다.
    pub fn calculate_head_loss_with_mode(
        &self,
        info: &BestPipeInfo,
        material: PipeMaterial,
        pressure_class: &str,
        pipe_size_mm: f64,
        mode: LookupMode,
    ) -> Option<PipeCalculationResult> {
        let mut trace = Vec::new();
        let table = match self.get_pipe_data(material, pressure_class) {
            Some(table) => {
                if !table.pressure_class.eq_ignore_ascii_case(pressure_class.trim()) {
                    trace.push(format!(
                        "압력 등급 {pressure_class} → {} (보수적 선택)",
                        table.pressure_class
                    ));
                }
                table
            }
            None => {
                let table = self.max_pressure_class(material)?;
                tracing::debug!(
                    "{material} {pressure_class} 표 없음, 최대 등급 {} 사용",
                    table.pressure_class
                );
                trace.push(format!(
                    "압력 등급 {pressure_class} 표 없음 → 최대 등급 {} 사용",
                    table.pressure_class
                ));
                table
            }
        };

        let lookup = lookup_in_table(table, pipe_size_mm, info.water_flow_rate, mode)?;
        if !lookup.size_info.exact {
            trace.push(format!(
                "배관 크기 {pipe_size_mm}mm → {}",
                lookup.size_info.actual_label
            ));
        }
        match mode {
            LookupMode::NextRow if lookup.actual_flow != info.water_flow_rate => {
                trace.push(format!(
                    "유량 {} L/min → 표 행 {} L/min",
                    info.water_flow_rate, lookup.actual_flow
                ));
            }
            LookupMode::Interpolate if lookup.clamped => {
                trace.push(format!(
                    "유량 {} L/min 표 범위 밖 → {} L/min 행 사용",
                    info.water_flow_rate, lookup.actual_flow
                ));
            }
            _ => {}
        }

        let correction = self.find_correction_factor(info.count);
        if correction.actual_outlet_count != info.count {
            trace.push(format!(
                "출구 수 {} → 표 행 {}",
                info.count, correction.actual_outlet_count
            ));
        }

        let head_loss = head_loss_formula(
            lookup.pressure_loss,
            info.length,
            correction.correction_factor,
        );
        trace.push(format!(
            "손실 수두 = ({:.3} / 10) × {:.2} × {:.3} = {:.3} m",
            lookup.pressure_loss, info.length, correction.correction_factor, head_loss
        ));

        Some(PipeCalculationResult {
            head_loss,
            pressure_loss: lookup.pressure_loss,
            correction_factor: correction.correction_factor,
            pipe_length: info.length,
            flow_rate: info.water_flow_rate,
            actual_flow: lookup.actual_flow,
            outlet_count: info.count,
            actual_outlet_count: correction.actual_outlet_count,
            actual_size: lookup.actual_size,
            size_info: lookup.size_info,
            material,
            pressure_class_used: table.pressure_class.clone(),
            lookup_mode: mode,
            calculation_trace: trace,
        })
    }
}

/// 손실 수두가 살수 헤드 압력의 허용 비율 이내인지 판정한 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadLossAssessment {
    pub head_loss_m: f64,
    /// 스프링클러 운전 압력을 수두로 환산한 값 [m]
    pub sprinkler_head_m: f64,
    pub allowed_head_loss_m: f64,
    pub within_limit: bool,
}

/// 스프링클러 운전 압력 [bar]의 `ratio`배를 허용 손실 수두로 보고 판정한다.
pub fn assess_head_loss(
    head_loss_m: f64,
    sprinkler_pressure_bar: f64,
    ratio: f64,
) -> HeadLossAssessment {
    let sprinkler_head_m = convert_pressure(
        sprinkler_pressure_bar,
        PressureUnit::Bar,
        PressureUnit::MeterWaterColumn,
    );
    let allowed_head_loss_m = sprinkler_head_m * ratio;
    HeadLossAssessment {
        head_loss_m,
        sprinkler_head_m,
        allowed_head_loss_m,
        within_limit: head_loss_m <= allowed_head_loss_m,
    }
}
