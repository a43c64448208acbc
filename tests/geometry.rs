//! 점-다각형 판정, 거리, 면적 회귀 테스트.
use irrigation_design_core::geometry::{
    calculate_distance, calculate_geo_distance, calculate_geo_polygon_area,
    calculate_polygon_area, calculate_polygon_perimeter, is_point_in_polygon, polygon_centroid,
    sort_by_angle_around_centroid, BoundingBox, LatLng, LinearScale, Point2D,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

fn square() -> Vec<Point2D> {
    vec![
        Point2D::new(0.0, 0.0),
        Point2D::new(10.0, 0.0),
        Point2D::new(10.0, 10.0),
        Point2D::new(0.0, 10.0),
    ]
}

#[test]
fn point_in_square() {
    let sq = square();
    assert!(is_point_in_polygon(Point2D::new(5.0, 5.0), &sq));
    assert!(!is_point_in_polygon(Point2D::new(15.0, 5.0), &sq));
    assert!(!is_point_in_polygon(Point2D::new(-1.0, -1.0), &sq));
}

#[test]
fn point_in_concave_l_shape() {
    let l_shape = vec![
        Point2D::new(0.0, 0.0),
        Point2D::new(10.0, 0.0),
        Point2D::new(10.0, 4.0),
        Point2D::new(4.0, 4.0),
        Point2D::new(4.0, 10.0),
        Point2D::new(0.0, 10.0),
    ];
    assert!(is_point_in_polygon(Point2D::new(2.0, 8.0), &l_shape));
    assert!(is_point_in_polygon(Point2D::new(8.0, 2.0), &l_shape));
    // 오목한 부분
    assert!(!is_point_in_polygon(Point2D::new(8.0, 8.0), &l_shape));
}

#[test]
fn degenerate_polygon_contains_nothing() {
    let line = vec![Point2D::new(0.0, 0.0), Point2D::new(10.0, 10.0)];
    assert!(!is_point_in_polygon(Point2D::new(5.0, 5.0), &line));
    assert_eq!(calculate_polygon_area(&line, None), 0.0);
    assert_eq!(calculate_polygon_area(&[], None), 0.0);
}

#[test]
fn square_area_without_and_with_scale() {
    let sq = square();
    assert_close("raw", calculate_polygon_area(&sq, None), 100.0, 1e-12);
    // 2 px/m 이면 10 px = 5 m 이므로 25 m²
    assert_close(
        "scaled",
        calculate_polygon_area(&sq, Some(LinearScale::uniform(2.0))),
        25.0,
        1e-12,
    );
}

#[test]
fn area_ignores_winding_direction() {
    let mut sq = square();
    sq.reverse();
    assert_close("cw", calculate_polygon_area(&sq, None), 100.0, 1e-12);
}

#[test]
fn canvas_distance_divides_by_scale() {
    let a = Point2D::new(0.0, 0.0);
    let b = Point2D::new(30.0, 40.0);
    assert_close("raw", calculate_distance(a, b, None), 50.0, 1e-12);
    assert_close(
        "scaled",
        calculate_distance(a, b, Some(LinearScale::uniform(10.0))),
        5.0,
        1e-12,
    );
}

#[test]
fn geographic_distance_along_meridian() {
    let a = LatLng::new(13.75, 100.5);
    let b = LatLng::new(13.76, 100.5);
    assert_close("north", calculate_geo_distance(a, b), 1113.2, 1e-6);
}

#[test]
fn geographic_distance_along_parallel_shrinks_with_latitude() {
    let lat: f64 = 60.0;
    let d = calculate_geo_distance(LatLng::new(lat, 0.0), LatLng::new(lat, 0.01));
    assert_close("east", d, 0.01 * 111_320.0 * lat.to_radians().cos(), 1e-6);
}

#[test]
fn geographic_area_near_equator() {
    let poly = vec![
        LatLng::new(0.0, 0.0),
        LatLng::new(0.0, 0.001),
        LatLng::new(0.001, 0.001),
        LatLng::new(0.001, 0.0),
    ];
    assert_close("area", calculate_geo_polygon_area(&poly), 111.32 * 111.32, 1e-3);
}

#[test]
fn perimeter_of_scaled_square() {
    let p = calculate_polygon_perimeter(&square(), Some(LinearScale::uniform(2.0)));
    assert_close("perimeter", p, 20.0, 1e-12);
}

#[test]
fn angular_sort_produces_simple_polygon() {
    let mut pts = vec![
        Point2D::new(10.0, 10.0),
        Point2D::new(0.0, 0.0),
        Point2D::new(0.0, 10.0),
        Point2D::new(10.0, 0.0),
    ];
    sort_by_angle_around_centroid(&mut pts);
    assert_eq!(
        polygon_centroid(&pts),
        Some(Point2D::new(5.0, 5.0))
    );
    // 각도 정렬 후에는 대각선이 아닌 변으로 이어져 면적이 100이 된다.
    assert_close("sorted area", calculate_polygon_area(&pts, None), 100.0, 1e-12);
}

#[test]
fn bounding_box_of_points() {
    let bb = BoundingBox::of(&square()).expect("bbox");
    assert_eq!(bb.width(), 10.0);
    assert_eq!(bb.height(), 10.0);
    assert!(BoundingBox::of(&[]).is_none());
}
