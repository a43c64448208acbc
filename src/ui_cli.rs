use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::app::AppError;
use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::geometry::{
    self, ClipOutput, ClipResult, ClipStrategy, LatLng, LinearScale, Point2D, SprinklerPlacement,
    DEFAULT_GRID_RESOLUTION,
};
use crate::hydraulics::{
    assess_head_loss, BestPipeInfo, PipeCalculationResult, PipeCandidate, PipeMaterial,
    PipeTableSet, PipeTier, TierSizes,
};
use crate::units::{convert_area, convert_pressure, AreaUnit, PressureUnit};

/// 명령행 인자.
#[derive(Debug, Parser)]
#[command(
    name = "irrigation_design_cli",
    version,
    about = "살수 범위 클리핑과 배관 손실 수두 계산"
)]
pub struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

/// 하위 명령.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 두 점 사이 거리
    Distance {
        /// 시작점 "x,y" (--geo이면 "lat,lng")
        from: String,
        /// 끝점
        to: String,
        /// 미터당 픽셀 수
        #[arg(long)]
        scale: Option<f64>,
        #[arg(long)]
        geo: bool,
    },
    /// 구역 면적과 둘레
    Area {
        /// "x1,y1;x2,y2;..."
        #[arg(long)]
        zone: String,
        #[arg(long)]
        scale: Option<f64>,
        #[arg(long)]
        geo: bool,
        /// m2, wah2, ngan, rai, ha
        #[arg(long)]
        unit: Option<AreaUnit>,
    },
    /// 스프링클러 살수 원을 구역에 클리핑
    Clip {
        #[arg(long)]
        center: String,
        /// 반경 (scale/geo 사용 시 미터)
        #[arg(long)]
        radius: f64,
        #[arg(long)]
        zone: String,
        #[arg(long)]
        scale: Option<f64>,
        #[arg(long)]
        geo: bool,
        /// 부분 중첩 시 다각형 대신 마스킹 결과 반환
        #[arg(long)]
        mask: bool,
        /// 불리언 교집합으로 교차 다각형 계산
        #[arg(long)]
        exact: bool,
        #[arg(long)]
        samples: Option<usize>,
    },
    /// 구역 살수 커버리지
    Coverage {
        #[arg(long)]
        zone: String,
        /// "x,y,반경" (여러 번 지정, --geo이면 "lat,lng,반경[m]")
        #[arg(long = "sprinkler")]
        sprinklers: Vec<String>,
        #[arg(long)]
        scale: Option<f64>,
        #[arg(long)]
        geo: bool,
        #[arg(long, default_value_t = DEFAULT_GRID_RESOLUTION)]
        grid: usize,
    },
    /// 배관 구간 손실 수두
    HeadLoss {
        /// PE 또는 PVC
        #[arg(long)]
        material: PipeMaterial,
        /// 압력 등급 (예: PN4, Class8.5)
        #[arg(long)]
        class: String,
        /// 배관 크기 [mm]
        #[arg(long)]
        size: f64,
        /// 유량 [L/min]
        #[arg(long)]
        flow: f64,
        /// 길이 [m]
        #[arg(long)]
        length: f64,
        /// 출구 수
        #[arg(long, default_value_t = 1)]
        outlets: u32,
        /// 유량 행 선형 보간
        #[arg(long)]
        interpolate: bool,
        /// 스프링클러 운전 압력 [bar]. 지정하면 허용 손실 판정도 출력한다.
        #[arg(long)]
        sprinkler_pressure: Option<f64>,
    },
    /// 후보 중 손실 수두가 목표에 가장 가까운 배관 선택
    Select {
        /// main, secondary, branch, emitter
        #[arg(long)]
        tier: PipeTier,
        #[arg(long)]
        material: PipeMaterial,
        #[arg(long)]
        flow: f64,
        #[arg(long)]
        length: f64,
        #[arg(long, default_value_t = 1)]
        outlets: u32,
        /// "크기:등급" (예: 25:PN4), 여러 번 지정
        #[arg(long = "candidate", required = true)]
        candidates: Vec<String>,
        #[arg(long)]
        main: Option<f64>,
        #[arg(long)]
        secondary: Option<f64>,
        #[arg(long)]
        branch: Option<f64>,
        #[arg(long)]
        emitter: Option<f64>,
        /// 목표 손실 수두 [m]
        #[arg(long)]
        target: Option<f64>,
    },
    /// 출구 수 보정 계수
    Correction {
        #[arg(long)]
        outlets: u32,
    },
}

/// 하위 명령을 실행하고 결과를 출력한다.
pub fn dispatch(command: Command, cfg: &Config, tables: &PipeTableSet) -> Result<(), AppError> {
    match command {
        Command::Distance {
            from,
            to,
            scale,
            geo,
        } => handle_distance(&from, &to, scale, geo),
        Command::Area {
            zone,
            scale,
            geo,
            unit,
        } => handle_area(cfg, &zone, scale, geo, unit),
        Command::Clip {
            center,
            radius,
            zone,
            scale,
            geo,
            mask,
            exact,
            samples,
        } => {
            let mut options = cfg.clip.options();
            if mask {
                options.output = ClipOutput::Mask;
            }
            if exact {
                options.strategy = ClipStrategy::Exact;
            }
            if let Some(n) = samples {
                options.sample_count = n;
            }
            handle_clip(&center, radius, &zone, scale, geo, &options)
        }
        Command::Coverage {
            zone,
            sprinklers,
            scale,
            geo,
            grid,
        } => handle_coverage(cfg, &zone, &sprinklers, scale, geo, grid),
        Command::HeadLoss {
            material,
            class,
            size,
            flow,
            length,
            outlets,
            interpolate,
            sprinkler_pressure,
        } => {
            let info = BestPipeInfo {
                length,
                count: outlets,
                water_flow_rate: flow,
            };
            let mode = if interpolate {
                crate::hydraulics::LookupMode::Interpolate
            } else {
                cfg.hydraulics.lookup_mode
            };
            let result = tables
                .calculate_head_loss_with_mode(&info, material, &class, size, mode)
                .ok_or_else(|| AppError::Unresolved(format!("{material} {class} 배관 표 없음")))?;
            print_calculation(&result);
            if let Some(pressure) = sprinkler_pressure {
                print_assessment(cfg, result.head_loss, pressure);
            }
            Ok(())
        }
        Command::Select {
            tier,
            material,
            flow,
            length,
            outlets,
            candidates,
            main,
            secondary,
            branch,
            emitter,
            target,
        } => {
            let candidates = candidates
                .iter()
                .map(|c| parse_candidate(c, material))
                .collect::<Result<Vec<_>, _>>()?;
            let info = BestPipeInfo {
                length,
                count: outlets,
                water_flow_rate: flow,
            };
            let others = TierSizes {
                main,
                secondary,
                branch,
                emitter,
            };
            let target = target.unwrap_or(cfg.hydraulics.target_head_loss);
            let selection = tables
                .select_best_pipe_with_mode(
                    &candidates,
                    tier,
                    &info,
                    material,
                    &others,
                    target,
                    cfg.hydraulics.lookup_mode,
                )
                .ok_or_else(|| AppError::Unresolved(format!("{tier} 구간에 쓸 후보 없음")))?;
            println!(
                "선택: {} ({}){}",
                selection.candidate.name,
                tier,
                if selection.by_head_loss {
                    ""
                } else {
                    " [위계 조건 불만족, 최소 크기 대체]"
                }
            );
            if let Some(result) = &selection.calculation {
                print_calculation(result);
            }
            Ok(())
        }
        Command::Correction { outlets } => {
            let m = tables.find_correction_factor(outlets);
            println!(
                "출구 {outlets}개 → 표 행 {}개, 보정 계수 {:.3}",
                m.actual_outlet_count, m.correction_factor
            );
            Ok(())
        }
    }
}

fn handle_distance(from: &str, to: &str, scale: Option<f64>, geo: bool) -> Result<(), AppError> {
    let meters = if geo {
        geometry::calculate_geo_distance(parse_latlng(from)?, parse_latlng(to)?)
    } else {
        geometry::calculate_distance(
            parse_point(from)?,
            parse_point(to)?,
            scale.map(LinearScale::uniform),
        )
    };
    println!("거리: {meters:.3} m");
    Ok(())
}

fn handle_area(
    cfg: &Config,
    zone: &str,
    scale: Option<f64>,
    geo: bool,
    unit: Option<AreaUnit>,
) -> Result<(), AppError> {
    let (area_m2, perimeter_m) = if geo {
        let polygon = parse_latlng_polygon(zone)?;
        let mean_lat = polygon.iter().map(|p| p.lat).sum::<f64>() / polygon.len() as f64;
        let points: Vec<Point2D> = polygon.iter().map(|p| p.to_point()).collect();
        (
            geometry::calculate_geo_polygon_area(&polygon),
            geometry::calculate_polygon_perimeter(
                &points,
                Some(LinearScale::geographic(mean_lat)),
            ),
        )
    } else {
        let polygon = parse_polygon(zone)?;
        let scale = scale.map(LinearScale::uniform);
        (
            geometry::calculate_polygon_area(&polygon, scale),
            geometry::calculate_polygon_perimeter(&polygon, scale),
        )
    };
    let unit = unit.unwrap_or(cfg.display.area_unit);
    println!(
        "면적: {:.3} {} ({area_m2:.2} m²), 둘레: {perimeter_m:.2} m",
        convert_area(area_m2, AreaUnit::SquareMeter, unit),
        unit.symbol()
    );
    Ok(())
}

fn handle_clip(
    center: &str,
    radius: f64,
    zone: &str,
    scale: Option<f64>,
    geo: bool,
    options: &geometry::ClipOptions,
) -> Result<(), AppError> {
    if geo {
        let result = geometry::clip_circle_to_geo_polygon(
            parse_latlng(center)?,
            radius,
            &parse_latlng_polygon(zone)?,
            options,
        );
        println!("분류: {}", result.label());
        if let ClipResult::Polygon(points) = &result {
            for p in points {
                println!("  {:.7}, {:.7}", p.lat, p.lng);
            }
        }
    } else {
        let result = geometry::clip_circle_with(
            parse_point(center)?,
            radius,
            &parse_polygon(zone)?,
            scale.map(LinearScale::uniform),
            options,
        );
        println!("분류: {}", result.label());
        if let ClipResult::Polygon(points) = &result {
            for p in points {
                println!("  {:.3}, {:.3}", p.x, p.y);
            }
        }
    }
    Ok(())
}

fn handle_coverage(
    cfg: &Config,
    zone: &str,
    sprinklers: &[String],
    scale: Option<f64>,
    geo: bool,
    grid: usize,
) -> Result<(), AppError> {
    let (zone, scale) = if geo {
        let polygon = parse_latlng_polygon(zone)?;
        let mean_lat = polygon.iter().map(|p| p.lat).sum::<f64>() / polygon.len() as f64;
        (
            polygon.iter().map(|p| p.to_point()).collect::<Vec<_>>(),
            Some(LinearScale::geographic(mean_lat)),
        )
    } else {
        (parse_polygon(zone)?, scale.map(LinearScale::uniform))
    };
    let sprinklers = sprinklers
        .iter()
        .map(|s| parse_sprinkler(s, geo))
        .collect::<Result<Vec<_>, _>>()?;
    let report = geometry::zone_coverage(&zone, &sprinklers, scale, grid);
    let unit = cfg.display.area_unit;
    println!(
        "구역 면적: {:.2} {}, 살수 면적: {:.2} {} ({:.1}%)",
        convert_area(report.zone_area_m2, AreaUnit::SquareMeter, unit),
        unit.symbol(),
        convert_area(report.covered_area_m2, AreaUnit::SquareMeter, unit),
        unit.symbol(),
        report.coverage_ratio * 100.0
    );
    println!(
        "스프링클러: 전체 원 {}, 부분 {}, 구역 밖 {}",
        report.full_circles, report.partial_circles, report.outside
    );
    Ok(())
}

fn print_calculation(result: &PipeCalculationResult) {
    println!(
        "{} {} {}: 손실 수두 {:.3} m",
        result.material, result.pressure_class_used, result.actual_size, result.head_loss
    );
    println!(
        "  압력손실 {:.3} kgf/cm²/km, 보정 계수 {:.3}, 길이 {:.2} m, 유량 {:.2} L/min",
        result.pressure_loss, result.correction_factor, result.pipe_length, result.flow_rate
    );
    for line in &result.calculation_trace {
        println!("  - {line}");
    }
}

fn print_assessment(cfg: &Config, head_loss_m: f64, sprinkler_pressure_bar: f64) {
    let a = assess_head_loss(
        head_loss_m,
        sprinkler_pressure_bar,
        cfg.hydraulics.head_loss_ratio,
    );
    let unit = cfg.display.pressure_unit;
    let allowed = convert_pressure(
        a.allowed_head_loss_m,
        PressureUnit::MeterWaterColumn,
        unit,
    );
    println!(
        "허용 손실 {:.3} m ({allowed:.3} {}), 스프링클러 수두 {:.2} m → {}",
        a.allowed_head_loss_m,
        unit.symbol(),
        a.sprinkler_head_m,
        if a.within_limit { "적합" } else { "경고: 허용치 초과" }
    );
}

fn parse_pair(s: &str) -> Result<(f64, f64), AppError> {
    let mut parts = s.split(',').map(str::trim);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Ok((parse_number(a)?, parse_number(b)?)),
        _ => Err(AppError::InvalidInput(format!(
            "좌표는 \"a,b\" 형식이어야 합니다: {s}"
        ))),
    }
}

fn parse_number(s: &str) -> Result<f64, AppError> {
    s.parse::<f64>()
        .map_err(|_| AppError::InvalidInput(format!("숫자가 아닙니다: {s}")))
}

fn parse_point(s: &str) -> Result<Point2D, AppError> {
    let (x, y) = parse_pair(s)?;
    Ok(Point2D::new(x, y))
}

fn parse_latlng(s: &str) -> Result<LatLng, AppError> {
    let (lat, lng) = parse_pair(s)?;
    Ok(LatLng::new(lat, lng))
}

fn split_vertices(s: &str) -> impl Iterator<Item = &str> {
    s.split(';').map(str::trim).filter(|v| !v.is_empty())
}

fn parse_polygon(s: &str) -> Result<Vec<Point2D>, AppError> {
    let points = split_vertices(s)
        .map(parse_point)
        .collect::<Result<Vec<_>, _>>()?;
    require_polygon(points.len())?;
    Ok(points)
}

fn parse_latlng_polygon(s: &str) -> Result<Vec<LatLng>, AppError> {
    let points = split_vertices(s)
        .map(parse_latlng)
        .collect::<Result<Vec<_>, _>>()?;
    require_polygon(points.len())?;
    Ok(points)
}

fn require_polygon(n: usize) -> Result<(), AppError> {
    if n < 3 {
        return Err(AppError::InvalidInput(format!(
            "구역은 꼭짓점이 3개 이상이어야 합니다 (입력 {n}개)"
        )));
    }
    Ok(())
}

fn parse_sprinkler(s: &str, geo: bool) -> Result<SprinklerPlacement, AppError> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [a, b, r] => {
            let (a, b) = (parse_number(a)?, parse_number(b)?);
            let center = if geo {
                LatLng::new(a, b).to_point()
            } else {
                Point2D::new(a, b)
            };
            Ok(SprinklerPlacement {
                center,
                radius: parse_number(r)?,
            })
        }
        _ => Err(AppError::InvalidInput(format!(
            "스프링클러는 \"x,y,반경\" 형식이어야 합니다: {s}"
        ))),
    }
}

fn parse_candidate(s: &str, material: PipeMaterial) -> Result<PipeCandidate, AppError> {
    let (size, class) = s.split_once(':').ok_or_else(|| {
        AppError::InvalidInput(format!("후보는 \"크기:등급\" 형식이어야 합니다: {s}"))
    })?;
    let size_mm = parse_number(size.trim())?;
    Ok(PipeCandidate {
        name: format!("{material} {}mm {}", size.trim(), class.trim()),
        size_mm,
        pressure_class: class.trim().to_string(),
    })
}
