use serde::{Deserialize, Serialize};

use super::conservative::{nearest_conservative, parse_numeric_label};
use super::tables::{PipeMaterial, PipeSizeEntry, PipeSizeTable, PipeTableSet};

/// 유량 행 조회 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LookupMode {
    /// 요청 유량 이상인 첫 행을 그대로 쓴다 (보간 없음).
    #[default]
    NextRow,
    /// 앞뒤 두 행 사이를 유량 기준으로 선형 보간한다.
    Interpolate,
}

/// 실제 사용된 배관 크기 정보.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeInfo {
    pub requested_mm: f64,
    pub actual_label: String,
    pub actual_mm: f64,
    /// 요청 크기가 표에 그대로 있었는지 여부
    pub exact: bool,
}

/// 압력손실 조회 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureLossLookup {
    /// [kgf/cm²/km]
    pub pressure_loss: f64,
    /// 실제로 참조한 유량 [L/min]
    pub actual_flow: f64,
    pub actual_size: String,
    pub size_info: SizeInfo,
    /// 요청 유량이 표 범위를 벗어나 가장자리 행을 썼는지 여부
    pub clamped: bool,
}

impl PipeTableSet {
    /// 재질과 압력 등급으로 표를 찾는다.
    ///
    /// 등급 표기에서 숫자를 읽어 요청값 이상인 가장 낮은 등급을 고르고(범위 밖이면 최소/최대),
    /// 숫자가 없으면 표기 문자열이 정확히 같은 표를 찾는다.
    pub fn get_pipe_data(
        &self,
        material: PipeMaterial,
        pressure_class: &str,
    ) -> Option<&PipeSizeTable> {
        if let Some(requested) = parse_numeric_label(pressure_class) {
            let values = self.pressure_class_values(material);
            if let Some(chosen) = nearest_conservative(requested, &values) {
                if let Some(table) = self
                    .tables_for(material)
                    .find(|t| t.class_value == Some(chosen))
                {
                    if chosen != requested {
                        tracing::debug!(
                            "{material} 압력 등급 {pressure_class} → {} (보수적 선택)",
                            table.pressure_class
                        );
                    }
                    return Some(table);
                }
            }
        }
        self.tables_for(material)
            .find(|t| t.pressure_class.eq_ignore_ascii_case(pressure_class.trim()))
    }

    /// 요청 유량 이상인 첫 행의 압력손실을 찾는다 (보간 없음).
    pub fn find_pressure_loss(
        &self,
        material: PipeMaterial,
        pressure_class: &str,
        pipe_size_mm: f64,
        flow_rate: f64,
    ) -> Option<PressureLossLookup> {
        let table = self.get_pipe_data(material, pressure_class)?;
        lookup_in_table(table, pipe_size_mm, flow_rate, LookupMode::NextRow)
    }

    /// 앞뒤 행 사이를 선형 보간한 압력손실을 찾는다.
    pub fn interpolate_pressure_loss(
        &self,
        material: PipeMaterial,
        pressure_class: &str,
        pipe_size_mm: f64,
        flow_rate: f64,
    ) -> Option<PressureLossLookup> {
        let table = self.get_pipe_data(material, pressure_class)?;
        lookup_in_table(table, pipe_size_mm, flow_rate, LookupMode::Interpolate)
    }
}

/// 이미 고른 표 안에서 크기와 유량으로 압력손실을 조회한다.
pub fn lookup_in_table(
    table: &PipeSizeTable,
    pipe_size_mm: f64,
    flow_rate: f64,
    mode: LookupMode,
) -> Option<PressureLossLookup> {
    let entry = select_size(table, pipe_size_mm)?;
    let (pressure_loss, actual_flow, clamped) = match mode {
        LookupMode::NextRow => next_row(entry, flow_rate)?,
        LookupMode::Interpolate => interpolate(entry, flow_rate)?,
    };
    let exact = entry.size_mm == pipe_size_mm;
    if !exact {
        tracing::debug!(
            "배관 크기 {pipe_size_mm}mm → {} (보수적 선택)",
            entry.label
        );
    }
    Some(PressureLossLookup {
        pressure_loss,
        actual_flow,
        actual_size: entry.label.clone(),
        size_info: SizeInfo {
            requested_mm: pipe_size_mm,
            actual_label: entry.label.clone(),
            actual_mm: entry.size_mm,
            exact,
        },
        clamped,
    })
}

fn select_size(table: &PipeSizeTable, pipe_size_mm: f64) -> Option<&PipeSizeEntry> {
    let chosen = nearest_conservative(pipe_size_mm, &table.size_values())?;
    table.sizes.iter().find(|s| s.size_mm == chosen)
}

fn next_row(entry: &PipeSizeEntry, flow_rate: f64) -> Option<(f64, f64, bool)> {
    match entry.rows.iter().find(|r| r.flow >= flow_rate) {
        Some(row) => Some((row.pressure_loss, row.flow, false)),
        None => entry
            .rows
            .last()
            .map(|row| (row.pressure_loss, row.flow, true)),
    }
}

fn interpolate(entry: &PipeSizeEntry, flow_rate: f64) -> Option<(f64, f64, bool)> {
    let first = *entry.rows.first()?;
    let last = *entry.rows.last()?;
    if flow_rate <= first.flow {
        return Some((first.pressure_loss, first.flow, flow_rate < first.flow));
    }
    if flow_rate >= last.flow {
        return Some((last.pressure_loss, last.flow, flow_rate > last.flow));
    }
    for pair in entry.rows.windows(2) {
        let a = pair[0];
        let b = pair[1];
        if flow_rate >= a.flow && flow_rate <= b.flow {
            let span = b.flow - a.flow;
            if span <= 0.0 {
                return Some((b.pressure_loss, b.flow, false));
            }
            let ratio = (flow_rate - a.flow) / span;
            let loss = a.pressure_loss + ratio * (b.pressure_loss - a.pressure_loss);
            return Some((loss, flow_rate, false));
        }
    }
    None
}
