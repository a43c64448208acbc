//! 스프링클러 살수 원과 구역 다각형의 교차 판정.
//!
//! 원 둘레를 일정 개수로 샘플링해 구역 안/밖을 분류하고, 부분 중첩이면
//! 렌더러가 마스킹할지(`MaskedCircle`) 교차 다각형을 직접 받을지(`Polygon`) 고른다.

use geo::{Area, BooleanOps, Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

use super::measure::{calculate_distance, calculate_polygon_area};
use super::point::{LatLng, LinearScale, Point2D};
use super::polygon::{is_point_in_polygon, sort_by_angle_around_centroid};

/// 원 둘레 기본 샘플 수. 화면상 매끄러움을 기준으로 정한 값이다.
pub const DEFAULT_SAMPLE_COUNT: usize = 64;

/// 샘플 수 하한 (삼각형).
pub const MIN_SAMPLE_COUNT: usize = 3;

/// 원-다각형 클리핑 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipResult<P = Point2D> {
    /// 원 전체가 구역 안에 있음
    FullCircle,
    /// 부분 중첩. 렌더러가 구역 모양으로 원을 잘라 그린다.
    MaskedCircle,
    /// 보이는 살수 영역을 근사한 교차 다각형 (꼭짓점 3개 이상)
    Polygon(Vec<P>),
    /// 살수 영역 없음
    NoCoverage,
}

impl<P> ClipResult<P> {
    /// 다각형 꼭짓점 좌표를 변환한다. 나머지 변형은 그대로 유지된다.
    pub fn map<Q>(self, f: impl FnMut(P) -> Q) -> ClipResult<Q> {
        match self {
            ClipResult::FullCircle => ClipResult::FullCircle,
            ClipResult::MaskedCircle => ClipResult::MaskedCircle,
            ClipResult::Polygon(points) => ClipResult::Polygon(points.into_iter().map(f).collect()),
            ClipResult::NoCoverage => ClipResult::NoCoverage,
        }
    }

    pub fn is_covered(&self) -> bool {
        !matches!(self, ClipResult::NoCoverage)
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, ClipResult::MaskedCircle | ClipResult::Polygon(_))
    }

    /// 렌더링 계층에서 쓰는 분류 이름.
    pub fn label(&self) -> &'static str {
        match self {
            ClipResult::FullCircle => "FULL_CIRCLE",
            ClipResult::MaskedCircle => "MASKED_CIRCLE",
            ClipResult::Polygon(_) => "POLYGON",
            ClipResult::NoCoverage => "NO_COVERAGE",
        }
    }
}

/// 부분 중첩 시 반환 형태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClipOutput {
    /// 항상 `MaskedCircle`을 돌려주고 자르기는 렌더러에 맡긴다.
    Mask,
    /// 교차 다각형을 만든다.
    #[default]
    Polygon,
}

/// 교차 다각형 구성 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClipStrategy {
    /// 구역 안의 원 둘레 샘플 + 원 안의 구역 꼭짓점을 각도 정렬
    #[default]
    Sampled,
    /// 원을 근사한 정다각형과 구역의 불리언 교집합
    Exact,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipOptions {
    pub sample_count: usize,
    pub output: ClipOutput,
    pub strategy: ClipStrategy,
}

impl Default for ClipOptions {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            output: ClipOutput::default(),
            strategy: ClipStrategy::default(),
        }
    }
}

/// 기본 옵션(64 샘플, 교차 다각형 생성)으로 원을 구역에 클리핑한다.
///
/// `radius`는 `scale`이 있으면 미터, 없으면 다각형 좌표 단위이다.
pub fn clip_circle_to_polygon(
    center: Point2D,
    radius: f64,
    zone: &[Point2D],
    scale: Option<LinearScale>,
) -> ClipResult {
    clip_circle_with(center, radius, zone, scale, &ClipOptions::default())
}

/// 옵션을 지정해 원을 구역에 클리핑한다. 잘못된 입력은 예외 없이 `NoCoverage`가 된다.
///
/// 꼭짓점이 3개 미만이거나 면적이 0인(일직선) 구역은 잘못된 입력으로 본다.
pub fn clip_circle_with(
    center: Point2D,
    radius: f64,
    zone: &[Point2D],
    scale: Option<LinearScale>,
    options: &ClipOptions,
) -> ClipResult {
    if zone.len() < 3
        || calculate_polygon_area(zone, None) == 0.0
        || !radius.is_finite()
        || radius <= 0.0
    {
        return ClipResult::NoCoverage;
    }
    let scale = LinearScale::or_identity(scale);
    let samples = circle_boundary(center, radius, scale, options.sample_count);

    let inside_samples: Vec<Point2D> = samples
        .iter()
        .copied()
        .filter(|p| is_point_in_polygon(*p, zone))
        .collect();
    if inside_samples.len() == samples.len() {
        return ClipResult::FullCircle;
    }

    let vertices_in_circle: Vec<Point2D> = zone
        .iter()
        .copied()
        .filter(|v| calculate_distance(center, *v, Some(scale)) <= radius)
        .collect();
    if inside_samples.is_empty()
        && vertices_in_circle.is_empty()
        && !is_point_in_polygon(center, zone)
    {
        return ClipResult::NoCoverage;
    }

    match (options.output, options.strategy) {
        (ClipOutput::Mask, _) => ClipResult::MaskedCircle,
        (ClipOutput::Polygon, ClipStrategy::Sampled) => {
            sampled_intersection(inside_samples, vertices_in_circle)
        }
        (ClipOutput::Polygon, ClipStrategy::Exact) => exact_intersection(&samples, zone),
    }
}

/// 위경도 구역에 대한 클리핑. 원 중심 위도에서 선형화하며 반지름은 미터이다.
pub fn clip_circle_to_geo_polygon(
    center: LatLng,
    radius_m: f64,
    zone: &[LatLng],
    options: &ClipOptions,
) -> ClipResult<LatLng> {
    let points: Vec<Point2D> = zone.iter().map(|p| p.to_point()).collect();
    let scale = LinearScale::geographic(center.lat);
    clip_circle_with(center.to_point(), radius_m, &points, Some(scale), options)
        .map(LatLng::from_point)
}

/// 원 둘레를 `sample_count`개 점으로 샘플링한다 (0 rad에서 시작, 반시계).
pub fn circle_boundary(
    center: Point2D,
    radius_m: f64,
    scale: LinearScale,
    sample_count: usize,
) -> Vec<Point2D> {
    let n = sample_count.max(MIN_SAMPLE_COUNT);
    (0..n)
        .map(|i| {
            let theta = std::f64::consts::TAU * i as f64 / n as f64;
            let (dx, dy) = scale.meters_to_units(radius_m * theta.cos(), radius_m * theta.sin());
            Point2D::new(center.x + dx, center.y + dy)
        })
        .collect()
}

fn sampled_intersection(
    mut inside_samples: Vec<Point2D>,
    vertices_in_circle: Vec<Point2D>,
) -> ClipResult {
    inside_samples.extend(vertices_in_circle);
    let mut points = inside_samples;
    match points.len() {
        0 => ClipResult::NoCoverage,
        1 | 2 => ClipResult::MaskedCircle,
        _ => {
            sort_by_angle_around_centroid(&mut points);
            ClipResult::Polygon(points)
        }
    }
}

fn exact_intersection(circle: &[Point2D], zone: &[Point2D]) -> ClipResult {
    let circle = to_geo_polygon(circle);
    let zone = to_geo_polygon(zone);
    let overlap = circle.intersection(&zone);
    let Some(largest) = overlap
        .0
        .iter()
        .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
    else {
        return ClipResult::NoCoverage;
    };
    let ring = &largest.exterior().0;
    // geo 링은 첫 점이 마지막에 반복된다.
    let open = ring.len().saturating_sub(1);
    if open < 3 {
        return ClipResult::MaskedCircle;
    }
    ClipResult::Polygon(ring[..open].iter().map(|c| Point2D::new(c.x, c.y)).collect())
}

fn to_geo_polygon(points: &[Point2D]) -> Polygon<f64> {
    let coords: Vec<Coord<f64>> = points.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    Polygon::new(LineString::from(coords), vec![])
}
