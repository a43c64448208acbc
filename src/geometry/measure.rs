//! 거리, 면적, 둘레 계산. 결과는 모두 미터 기준이다.

use super::point::{LatLng, LinearScale, Point2D};

/// 두 점 사이 거리 [m].
///
/// `scale`이 없으면 좌표 단위를 그대로 쓴다. 캔버스는 `LinearScale::uniform(px_per_m)`,
/// 지리 좌표는 `LinearScale::geographic(기준 위도)`를 넘긴다.
pub fn calculate_distance(a: Point2D, b: Point2D, scale: Option<LinearScale>) -> f64 {
    let scale = LinearScale::or_identity(scale);
    let (dx, dy) = scale.units_to_meters(b.x - a.x, b.y - a.y);
    dx.hypot(dy)
}

/// 위경도 두 점 사이 거리 [m]. 두 점의 중간 위도로 선형화한다.
pub fn calculate_geo_distance(a: LatLng, b: LatLng) -> f64 {
    let scale = LinearScale::geographic((a.lat + b.lat) / 2.0);
    calculate_distance(a.to_point(), b.to_point(), Some(scale))
}

/// 신발끈 공식으로 다각형 면적 [m²]을 구한다. 꼭짓점이 3개 미만이면 0.
pub fn calculate_polygon_area(polygon: &[Point2D], scale: Option<LinearScale>) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let n = polygon.len();
    let twice_area: f64 = (0..n)
        .map(|i| {
            let p = polygon[i];
            let q = polygon[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum();
    let raw = twice_area.abs() / 2.0;
    raw * LinearScale::or_identity(scale).square_meters_per_unit_area()
}

/// 위경도 다각형 면적 [m²]. 꼭짓점 평균 위도에서 선형화한다.
pub fn calculate_geo_polygon_area(polygon: &[LatLng]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mean_lat = polygon.iter().map(|p| p.lat).sum::<f64>() / polygon.len() as f64;
    let points: Vec<Point2D> = polygon.iter().map(|p| p.to_point()).collect();
    calculate_polygon_area(&points, Some(LinearScale::geographic(mean_lat)))
}

/// 닫힌 다각형의 둘레 [m]. 꼭짓점이 2개 미만이면 0.
pub fn calculate_polygon_perimeter(polygon: &[Point2D], scale: Option<LinearScale>) -> f64 {
    if polygon.len() < 2 {
        return 0.0;
    }
    let n = polygon.len();
    (0..n)
        .map(|i| calculate_distance(polygon[i], polygon[(i + 1) % n], scale))
        .sum()
}
