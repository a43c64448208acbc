//! 구간(메인/서브메인/가지/에미터)별 배관 후보 선택.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::head_loss::{BestPipeInfo, PipeCalculationResult};
use super::pressure_loss::LookupMode;
use super::tables::{PipeMaterial, PipeTableSet};

/// 선택 목표 손실 수두 기본값 [m].
pub const DEFAULT_TARGET_HEAD_LOSS: f64 = 1.9;

/// 가지관/에미터관 최대 크기 [mm].
pub const BRANCH_MAX_SIZE_MM: f64 = 32.0;

/// 배관 구간 종류. 메인에서 에미터 쪽으로 갈수록 가늘어져야 한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipeTier {
    Main,
    Secondary,
    Branch,
    Emitter,
}

impl PipeTier {
    pub fn label(self) -> &'static str {
        match self {
            PipeTier::Main => "main",
            PipeTier::Secondary => "secondary",
            PipeTier::Branch => "branch",
            PipeTier::Emitter => "emitter",
        }
    }

    fn has_size_ceiling(self) -> bool {
        matches!(self, PipeTier::Branch | PipeTier::Emitter)
    }
}

impl fmt::Display for PipeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PipeTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" => Ok(PipeTier::Main),
            "secondary" | "submain" => Ok(PipeTier::Secondary),
            "branch" | "lateral" => Ok(PipeTier::Branch),
            "emitter" => Ok(PipeTier::Emitter),
            other => Err(format!("알 수 없는 배관 구간: {other}")),
        }
    }
}

/// 같은 구역에서 다른 구간에 이미 정해진 크기 [mm]. 미정이면 None.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TierSizes {
    pub main: Option<f64>,
    pub secondary: Option<f64>,
    pub branch: Option<f64>,
    pub emitter: Option<f64>,
}

impl TierSizes {
    fn max_of(values: &[Option<f64>]) -> f64 {
        values.iter().flatten().copied().fold(0.0, f64::max)
    }
}

/// 구간별 크기 위계를 지키는지 검사한다.
///
/// - main: 다른 모든 구간보다 커야 한다.
/// - secondary: main보다 작고 branch/emitter보다 커야 한다.
/// - branch/emitter: 32mm 이하이고 main/secondary보다 작아야 한다.
pub fn validate_pipe_size_hierarchy(tier: PipeTier, size_mm: f64, others: &TierSizes) -> bool {
    match tier {
        PipeTier::Main => {
            size_mm > TierSizes::max_of(&[others.secondary, others.branch, others.emitter])
        }
        PipeTier::Secondary => {
            others.main.map_or(true, |main| size_mm < main)
                && size_mm > TierSizes::max_of(&[others.branch, others.emitter])
        }
        PipeTier::Branch | PipeTier::Emitter => {
            size_mm <= BRANCH_MAX_SIZE_MM
                && others.main.map_or(true, |main| size_mm < main)
                && others.secondary.map_or(true, |sec| size_mm < sec)
        }
    }
}

/// 선택 대상 배관 후보 (같은 재질).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeCandidate {
    pub name: String,
    pub size_mm: f64,
    pub pressure_class: String,
}

/// 후보 선택 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeSelection<'a> {
    pub candidate: &'a PipeCandidate,
    pub calculation: Option<PipeCalculationResult>,
    /// 손실 수두 기준으로 고른 경우 true, 최소 크기 대체인 경우 false
    pub by_head_loss: bool,
}

impl PipeTableSet {
    /// 손실 수두가 목표값에 가장 가까운 후보를 고른다 (보간 없는 조회).
    pub fn select_best_pipe_by_head_loss<'a>(
        &self,
        candidates: &'a [PipeCandidate],
        tier: PipeTier,
        info: &BestPipeInfo,
        material: PipeMaterial,
        others: &TierSizes,
        target_head_loss: f64,
    ) -> Option<PipeSelection<'a>> {
        self.select_best_pipe_with_mode(
            candidates,
            tier,
            info,
            material,
            others,
            target_head_loss,
            LookupMode::NextRow,
        )
    }

    /// 조회 방식을 지정해 후보를 고른다.
    ///
    /// 위계를 만족하는 후보 중 |손실 수두 - 목표|가 가장 작은 것을 고르고, 같으면 작은 크기를 택한다.
    /// 위계를 만족하는 후보가 없으면 가장 작은 후보로 대체한다(가지/에미터는 32mm 이하만).
    #[allow(clippy::too_many_arguments)]
    pub fn select_best_pipe_with_mode<'a>(
        &self,
        candidates: &'a [PipeCandidate],
        tier: PipeTier,
        info: &BestPipeInfo,
        material: PipeMaterial,
        others: &TierSizes,
        target_head_loss: f64,
        mode: LookupMode,
    ) -> Option<PipeSelection<'a>> {
        let mut best: Option<(f64, &PipeCandidate, PipeCalculationResult)> = None;
        for candidate in candidates
            .iter()
            .filter(|c| validate_pipe_size_hierarchy(tier, c.size_mm, others))
        {
            let Some(result) = self.calculate_head_loss_with_mode(
                info,
                material,
                &candidate.pressure_class,
                candidate.size_mm,
                mode,
            ) else {
                continue;
            };
            let distance = (result.head_loss - target_head_loss).abs();
            let better = match &best {
                None => true,
                Some((best_distance, best_candidate, _)) => {
                    distance < *best_distance
                        || (distance == *best_distance
                            && candidate.size_mm < best_candidate.size_mm)
                }
            };
            if better {
                best = Some((distance, candidate, result));
            }
        }
        if let Some((_, candidate, result)) = best {
            return Some(PipeSelection {
                candidate,
                calculation: Some(result),
                by_head_loss: true,
            });
        }

        let fallback = candidates
            .iter()
            .filter(|c| !tier.has_size_ceiling() || c.size_mm <= BRANCH_MAX_SIZE_MM)
            .min_by(|a, b| a.size_mm.total_cmp(&b.size_mm))?;
        tracing::debug!(
            "{tier} 위계를 만족하는 후보 없음, 최소 크기 {} 사용",
            fallback.name
        );
        Some(PipeSelection {
            candidate: fallback,
            calculation: self.calculate_head_loss_with_mode(
                info,
                material,
                &fallback.pressure_class,
                fallback.size_mm,
                mode,
            ),
            by_head_loss: false,
        })
    }
}
