use serde::{Deserialize, Serialize};

use super::tables::PipeTableSet;

/// 출구 수 보정 계수 조회 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionFactorMatch {
    pub correction_factor: f64,
    /// 실제로 참조한 표의 출구 수
    pub actual_outlet_count: u32,
}

impl PipeTableSet {
    /// 출구 수 이하인 마지막 표 행의 보정 계수를 돌려준다.
    ///
    /// 표의 최솟값보다 작으면 첫 행을 쓴다. 표가 비어 있으면 보정하지 않는다(1.0).
    pub fn find_correction_factor(&self, outlet_count: u32) -> CorrectionFactorMatch {
        let entries = self.correction_factors();
        let Some(first) = entries.first() else {
            return CorrectionFactorMatch {
                correction_factor: 1.0,
                actual_outlet_count: outlet_count,
            };
        };
        let mut chosen = first;
        for entry in entries {
            if entry.number_of_outlets <= outlet_count {
                chosen = entry;
            }
        }
        CorrectionFactorMatch {
            correction_factor: chosen.correction_factor,
            actual_outlet_count: chosen.number_of_outlets,
        }
    }
}
