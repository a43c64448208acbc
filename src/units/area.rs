use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 면적 단위. 내부 기준은 제곱미터이다.
///
/// 라이(rai)=1600 m², 응안(ngan)=400 m², 타랑와(square wah)=4 m².
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    SquareMeter,
    SquareWah,
    Ngan,
    Rai,
    Hectare,
}

fn square_meters_per_unit(unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareMeter => 1.0,
        AreaUnit::SquareWah => 4.0,
        AreaUnit::Ngan => 400.0,
        AreaUnit::Rai => 1600.0,
        AreaUnit::Hectare => 10_000.0,
    }
}

/// 면적을 변환한다.
pub fn convert_area(value: f64, from: AreaUnit, to: AreaUnit) -> f64 {
    value * square_meters_per_unit(from) / square_meters_per_unit(to)
}

impl AreaUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            AreaUnit::SquareMeter => "m²",
            AreaUnit::SquareWah => "sq.wah",
            AreaUnit::Ngan => "ngan",
            AreaUnit::Rai => "rai",
            AreaUnit::Hectare => "ha",
        }
    }
}

impl FromStr for AreaUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m2" | "sqm" => Ok(AreaUnit::SquareMeter),
            "wah2" | "sqwah" => Ok(AreaUnit::SquareWah),
            "ngan" => Ok(AreaUnit::Ngan),
            "rai" => Ok(AreaUnit::Rai),
            "ha" => Ok(AreaUnit::Hectare),
            other => Err(format!("알 수 없는 면적 단위: {other}")),
        }
    }
}
