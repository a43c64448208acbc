use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::geometry::{ClipOptions, ClipOutput, ClipStrategy, DEFAULT_SAMPLE_COUNT};
use crate::hydraulics::{LookupMode, DEFAULT_HEAD_LOSS_RATIO, DEFAULT_TARGET_HEAD_LOSS};
use crate::units::{AreaUnit, PressureUnit};

/// 설정 파일 기본 경로.
pub const DEFAULT_CONFIG_PATH: &str = "irrigation.toml";

/// 살수 범위 클리핑 설정.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipSettings {
    pub sample_count: usize,
    pub output: ClipOutput,
    pub strategy: ClipStrategy,
}

impl Default for ClipSettings {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            output: ClipOutput::Polygon,
            strategy: ClipStrategy::Sampled,
        }
    }
}

impl ClipSettings {
    pub fn options(&self) -> ClipOptions {
        ClipOptions {
            sample_count: self.sample_count,
            output: self.output,
            strategy: self.strategy,
        }
    }
}

/// 수리 계산 설정.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HydraulicsSettings {
    pub lookup_mode: LookupMode,
    /// 배관 선택 시 목표 손실 수두 [m]
    pub target_head_loss: f64,
    /// 허용 손실 수두 / 스프링클러 수두
    pub head_loss_ratio: f64,
    /// 내장 표 대신 사용할 배관 표 TOML 경로
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables_path: Option<PathBuf>,
}

impl Default for HydraulicsSettings {
    fn default() -> Self {
        Self {
            lookup_mode: LookupMode::NextRow,
            target_head_loss: DEFAULT_TARGET_HEAD_LOSS,
            head_loss_ratio: DEFAULT_HEAD_LOSS_RATIO,
            tables_path: None,
        }
    }
}

/// 출력 단위 설정.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub area_unit: AreaUnit,
    pub pressure_unit: PressureUnit,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            area_unit: AreaUnit::SquareMeter,
            pressure_unit: PressureUnit::Bar,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub clip: ClipSettings,
    #[serde(default)]
    pub hydraulics: HydraulicsSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 만들어 저장한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 TOML로 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
