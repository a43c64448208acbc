use serde::{Deserialize, Serialize};

/// 위도 1도에 해당하는 거리 [m]. 경도는 cos(위도)를 곱해 사용한다.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// 평면 좌표. 캔버스 모드에서는 픽셀, 지도 모드에서는 x=경도, y=위도(도)이다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 지리 좌표 [도].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// 경도를 x, 위도를 y로 하는 평면 좌표로 옮긴다.
    pub fn to_point(self) -> Point2D {
        Point2D::new(self.lng, self.lat)
    }

    pub fn from_point(p: Point2D) -> Self {
        Self::new(p.y, p.x)
    }
}

/// 좌표 단위와 미터 사이의 선형 환산 계수.
///
/// 축마다 "미터당 좌표 단위"를 따로 둔다. 캔버스는 두 축이 같고(px/m),
/// 지리 좌표는 기준 위도에서 등장방형(equirectangular) 근사로 선형화한 값을 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub x_units_per_meter: f64,
    pub y_units_per_meter: f64,
}

impl LinearScale {
    /// 좌표 단위가 곧 미터인 경우.
    pub const IDENTITY: LinearScale = LinearScale {
        x_units_per_meter: 1.0,
        y_units_per_meter: 1.0,
    };

    /// 캔버스/도면 이미지용: 미터당 픽셀 수.
    pub fn uniform(units_per_meter: f64) -> Self {
        Self {
            x_units_per_meter: units_per_meter,
            y_units_per_meter: units_per_meter,
        }
    }

    /// 기준 위도에서 국소 선형화한 지리 좌표 환산.
    pub fn geographic(reference_lat: f64) -> Self {
        // 극점 근처에서 0으로 나누지 않도록 하한을 둔다.
        let cos_lat = reference_lat.to_radians().cos().abs().max(1e-9);
        Self {
            x_units_per_meter: 1.0 / (METERS_PER_DEGREE * cos_lat),
            y_units_per_meter: 1.0 / METERS_PER_DEGREE,
        }
    }

    pub(crate) fn or_identity(scale: Option<LinearScale>) -> LinearScale {
        scale.unwrap_or(Self::IDENTITY)
    }

    /// 좌표 차이를 미터 단위 (dx, dy)로 바꾼다.
    pub fn units_to_meters(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.x_units_per_meter, dy / self.y_units_per_meter)
    }

    /// 미터 단위 (dx, dy)를 좌표 차이로 바꾼다.
    pub fn meters_to_units(&self, dx_m: f64, dy_m: f64) -> (f64, f64) {
        (dx_m * self.x_units_per_meter, dy_m * self.y_units_per_meter)
    }

    /// 좌표 면적 1단위가 차지하는 제곱미터.
    pub fn square_meters_per_unit_area(&self) -> f64 {
        1.0 / (self.x_units_per_meter * self.y_units_per_meter)
    }
}
