use super::point::Point2D;

/// 광선 투사(even-odd) 방식으로 점이 다각형 내부에 있는지 판정한다.
///
/// 점에서 +x 방향으로 반직선을 쏘아 변과의 교차 횟수를 센다.
/// 변 위에 정확히 놓인 점의 판정은 정의하지 않는다. 꼭짓점이 3개 미만이면 false.
pub fn is_point_in_polygon(point: Point2D, polygon: &[Point2D]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// 꼭짓점 평균으로 계산한 중심점. 빈 입력이면 None.
pub fn polygon_centroid(points: &[Point2D]) -> Option<Point2D> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point2D::new(sx / n, sy / n))
}

/// 중심점 기준 각도(atan2) 오름차순으로 정렬해 자기교차 없는 순서를 만든다.
pub fn sort_by_angle_around_centroid(points: &mut [Point2D]) {
    let Some(c) = polygon_centroid(points) else {
        return;
    };
    points.sort_by(|a, b| {
        let ta = (a.y - c.y).atan2(a.x - c.x);
        let tb = (b.y - c.y).atan2(b.x - c.x);
        ta.total_cmp(&tb)
    });
}

/// 축 정렬 경계 상자.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point2D,
    pub max: Point2D,
}

impl BoundingBox {
    pub fn of(points: &[Point2D]) -> Option<Self> {
        let first = *points.first()?;
        let mut bb = BoundingBox {
            min: first,
            max: first,
        };
        for p in &points[1..] {
            bb.min.x = bb.min.x.min(p.x);
            bb.min.y = bb.min.y.min(p.y);
            bb.max.x = bb.max.x.max(p.x);
            bb.max.y = bb.max.y.max(p.y);
        }
        Some(bb)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}
