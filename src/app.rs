use crate::config::{self, ConfigError};
use crate::hydraulics::{PipeTableSet, TableError};
use crate::ui_cli::{self, Cli};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 배관 표 로드 오류
    Tables(TableError),
    /// 명령행 입력 오류
    InvalidInput(String),
    /// 표에서 값을 찾을 수 없어 계산 불가
    Unresolved(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Tables(e) => write!(f, "배관 표 오류: {e}"),
            AppError::InvalidInput(msg) => write!(f, "입력 오류: {msg}"),
            AppError::Unresolved(msg) => write!(f, "계산 불가: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<TableError> for AppError {
    fn from(value: TableError) -> Self {
        AppError::Tables(value)
    }
}

/// 설정과 배관 표를 준비한 뒤 명령을 실행한다.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let cfg = config::load_or_default(&cli.config)?;
    let custom;
    let tables: &PipeTableSet = match &cfg.hydraulics.tables_path {
        Some(path) => {
            tracing::info!("사용자 배관 표 로드: {}", path.display());
            custom = PipeTableSet::load(path)?;
            &custom
        }
        None => PipeTableSet::embedded(),
    };
    ui_cli::dispatch(cli.command, &cfg, tables)
}
