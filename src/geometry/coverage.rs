use serde::{Deserialize, Serialize};

use super::clip::{clip_circle_with, ClipOptions, ClipOutput, ClipResult};
use super::measure::{calculate_distance, calculate_polygon_area};
use super::point::{LinearScale, Point2D};
use super::polygon::{is_point_in_polygon, BoundingBox};

/// 격자 샘플링 기본 해상도 (축당 칸 수).
pub const DEFAULT_GRID_RESOLUTION: usize = 100;

/// 배치된 스프링클러 한 개.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SprinklerPlacement {
    pub center: Point2D,
    /// 살수 반경. `scale`이 있으면 미터, 없으면 좌표 단위.
    pub radius: f64,
}

/// 구역 살수 커버리지 통계.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneCoverage {
    pub zone_area_m2: f64,
    pub covered_area_m2: f64,
    /// 0.0 ~ 1.0
    pub coverage_ratio: f64,
    pub full_circles: usize,
    pub partial_circles: usize,
    pub outside: usize,
}

/// 구역 면적 중 하나 이상의 스프링클러가 닿는 비율을 격자 샘플링으로 추정한다.
///
/// 경계 상자를 `grid_resolution`² 칸으로 나누고 칸 중심점을 검사한 뒤,
/// 그 비율을 신발끈 공식으로 구한 정확한 구역 면적에 곱한다.
pub fn zone_coverage(
    zone: &[Point2D],
    sprinklers: &[SprinklerPlacement],
    scale: Option<LinearScale>,
    grid_resolution: usize,
) -> ZoneCoverage {
    let zone_area_m2 = calculate_polygon_area(zone, scale);
    let Some(bbox) = BoundingBox::of(zone) else {
        return ZoneCoverage::default();
    };
    if zone_area_m2 <= 0.0 {
        return ZoneCoverage::default();
    }

    let mut report = ZoneCoverage {
        zone_area_m2,
        ..ZoneCoverage::default()
    };
    let mask_only = ClipOptions {
        output: ClipOutput::Mask,
        ..ClipOptions::default()
    };
    for s in sprinklers {
        match clip_circle_with(s.center, s.radius, zone, scale, &mask_only) {
            ClipResult::FullCircle => report.full_circles += 1,
            ClipResult::NoCoverage => report.outside += 1,
            ClipResult::MaskedCircle | ClipResult::Polygon(_) => report.partial_circles += 1,
        }
    }

    let n = grid_resolution.max(1);
    let step_x = bbox.width() / n as f64;
    let step_y = bbox.height() / n as f64;
    let mut in_zone = 0usize;
    let mut covered = 0usize;
    for ix in 0..n {
        for iy in 0..n {
            let p = Point2D::new(
                bbox.min.x + (ix as f64 + 0.5) * step_x,
                bbox.min.y + (iy as f64 + 0.5) * step_y,
            );
            if !is_point_in_polygon(p, zone) {
                continue;
            }
            in_zone += 1;
            if sprinklers
                .iter()
                .any(|s| calculate_distance(s.center, p, scale) <= s.radius)
            {
                covered += 1;
            }
        }
    }
    if in_zone > 0 {
        report.coverage_ratio = covered as f64 / in_zone as f64;
        report.covered_area_m2 = zone_area_m2 * report.coverage_ratio;
    }
    report
}
