use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 압력 단위. 내부 기준은 bar(게이지)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    Bar,
    KiloPascal,
    KgPerCm2,
    Psi,
    /// 수두 [m H2O]
    MeterWaterColumn,
}

const KPA_PER_BAR: f64 = 100.0;
const BAR_PER_KGF_CM2: f64 = 0.980665;
const BAR_PER_PSI: f64 = 0.0689476;
/// 1 bar에 해당하는 물기둥 높이 [m]
const MWC_PER_BAR: f64 = 10.1972;

fn to_bar(value: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Bar => value,
        PressureUnit::KiloPascal => value / KPA_PER_BAR,
        PressureUnit::KgPerCm2 => value * BAR_PER_KGF_CM2,
        PressureUnit::Psi => value * BAR_PER_PSI,
        PressureUnit::MeterWaterColumn => value / MWC_PER_BAR,
    }
}

fn from_bar(value_bar: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Bar => value_bar,
        PressureUnit::KiloPascal => value_bar * KPA_PER_BAR,
        PressureUnit::KgPerCm2 => value_bar / BAR_PER_KGF_CM2,
        PressureUnit::Psi => value_bar / BAR_PER_PSI,
        PressureUnit::MeterWaterColumn => value_bar * MWC_PER_BAR,
    }
}

/// 압력을 원하는 단위로 변환한다.
pub fn convert_pressure(value: f64, from: PressureUnit, to: PressureUnit) -> f64 {
    from_bar(to_bar(value, from), to)
}

impl PressureUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            PressureUnit::Bar => "bar",
            PressureUnit::KiloPascal => "kPa",
            PressureUnit::KgPerCm2 => "kgf/cm²",
            PressureUnit::Psi => "psi",
            PressureUnit::MeterWaterColumn => "m",
        }
    }
}

impl FromStr for PressureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(PressureUnit::Bar),
            "kpa" => Ok(PressureUnit::KiloPascal),
            "kgf/cm2" | "kg/cm2" | "ksc" => Ok(PressureUnit::KgPerCm2),
            "psi" => Ok(PressureUnit::Psi),
            "m" | "mwc" | "mh2o" => Ok(PressureUnit::MeterWaterColumn),
            other => Err(format!("알 수 없는 압력 단위: {other}")),
        }
    }
}
