//! 배관 마찰손실 표와 출구 수 보정 계수 표.
//!
//! 표 자체는 `data/pipe_tables.toml`에 데이터로 두고, 실행 시 한 번 읽어 불변으로 공유한다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use super::conservative::parse_numeric_label;

const EMBEDDED_TABLES: &str = include_str!("../../data/pipe_tables.toml");

/// 배관 재질.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipeMaterial {
    #[serde(rename = "PE")]
    Pe,
    #[serde(rename = "PVC")]
    Pvc,
}

impl PipeMaterial {
    pub fn label(self) -> &'static str {
        match self {
            PipeMaterial::Pe => "PE",
            PipeMaterial::Pvc => "PVC",
        }
    }
}

impl fmt::Display for PipeMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PipeMaterial {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PE" => Ok(PipeMaterial::Pe),
            "PVC" => Ok(PipeMaterial::Pvc),
            other => Err(format!("알 수 없는 배관 재질: {other}")),
        }
    }
}

/// 유량별 압력손실 한 행. 유량 [L/min], 압력손실 [kgf/cm²/km].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeFlowDatum {
    pub flow: f64,
    pub pressure_loss: f64,
}

/// 호칭 크기 하나의 유량-손실 데이터 (유량 오름차순).
#[derive(Debug, Clone, PartialEq)]
pub struct PipeSizeEntry {
    /// 호칭 크기 표기 (예: "25mm")
    pub label: String,
    pub size_mm: f64,
    pub rows: Vec<PipeFlowDatum>,
}

/// 재질/압력 등급 하나에 대한 크기별 표 (크기 오름차순).
#[derive(Debug, Clone, PartialEq)]
pub struct PipeSizeTable {
    pub material: PipeMaterial,
    /// 압력 등급 표기 (예: "PN6.3", "Class8.5")
    pub pressure_class: String,
    pub class_value: Option<f64>,
    pub sizes: Vec<PipeSizeEntry>,
}

impl PipeSizeTable {
    /// 표에 있는 호칭 크기 값 [mm], 오름차순.
    pub fn size_values(&self) -> Vec<f64> {
        self.sizes.iter().map(|s| s.size_mm).collect()
    }
}

/// 출구 수 보정 계수 표의 한 행.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionFactorEntry {
    #[serde(rename = "outlets")]
    pub number_of_outlets: u32,
    #[serde(rename = "factor")]
    pub correction_factor: f64,
}

/// 표 로드 시 발생 가능한 오류.
#[derive(Debug)]
pub enum TableError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 파싱 오류
    Parse(toml::de::Error),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Io(e) => write!(f, "배관 표 파일 입출력 오류: {e}"),
            TableError::Parse(e) => write!(f, "배관 표 파싱 오류: {e}"),
        }
    }
}

impl std::error::Error for TableError {}

impl From<std::io::Error> for TableError {
    fn from(value: std::io::Error) -> Self {
        TableError::Io(value)
    }
}

impl From<toml::de::Error> for TableError {
    fn from(value: toml::de::Error) -> Self {
        TableError::Parse(value)
    }
}

#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    table: Vec<RawSizeTable>,
    #[serde(default)]
    correction_factors: Vec<CorrectionFactorEntry>,
}

#[derive(Debug, Deserialize)]
struct RawSizeTable {
    material: PipeMaterial,
    pressure_class: String,
    size: String,
    rows: Vec<PipeFlowDatum>,
}

/// 전체 참조 표 묶음. 만든 뒤에는 변경하지 않는다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipeTableSet {
    tables: Vec<PipeSizeTable>,
    correction_factors: Vec<CorrectionFactorEntry>,
}

impl PipeTableSet {
    /// 바이너리에 포함된 기본 표. 프로세스당 한 번만 파싱한다.
    ///
    /// 내장 데이터가 깨져 있으면 빈 표를 돌려주며, 이후 모든 조회는 None이 된다.
    pub fn embedded() -> &'static PipeTableSet {
        static TABLES: OnceLock<PipeTableSet> = OnceLock::new();
        TABLES.get_or_init(|| match Self::from_toml_str(EMBEDDED_TABLES) {
            Ok(set) => set,
            Err(e) => {
                tracing::error!("내장 배관 표를 읽지 못했습니다: {e}");
                PipeTableSet::default()
            }
        })
    }

    /// 외부 TOML 파일에서 표를 읽는다.
    pub fn load(path: &Path) -> Result<PipeTableSet, TableError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<PipeTableSet, TableError> {
        let file: TableFile = toml::from_str(content)?;
        let mut tables: Vec<PipeSizeTable> = Vec::new();
        for raw in file.table {
            let Some(size_mm) = parse_numeric_label(&raw.size) else {
                tracing::warn!("크기 표기에서 숫자를 찾지 못해 건너뜁니다: {}", raw.size);
                continue;
            };
            let mut rows = raw.rows;
            rows.sort_by(|a, b| a.flow.total_cmp(&b.flow));
            let entry = PipeSizeEntry {
                label: raw.size,
                size_mm,
                rows,
            };
            match tables
                .iter_mut()
                .find(|t| t.material == raw.material && t.pressure_class == raw.pressure_class)
            {
                Some(table) => table.sizes.push(entry),
                None => tables.push(PipeSizeTable {
                    material: raw.material,
                    class_value: parse_numeric_label(&raw.pressure_class),
                    pressure_class: raw.pressure_class,
                    sizes: vec![entry],
                }),
            }
        }
        for table in &mut tables {
            table.sizes.sort_by(|a, b| a.size_mm.total_cmp(&b.size_mm));
        }
        let mut correction_factors = file.correction_factors;
        correction_factors.sort_by_key(|e| e.number_of_outlets);
        Ok(PipeTableSet {
            tables,
            correction_factors,
        })
    }

    pub fn tables_for(&self, material: PipeMaterial) -> impl Iterator<Item = &PipeSizeTable> {
        self.tables.iter().filter(move |t| t.material == material)
    }

    /// 재질별 압력 등급 숫자값, 오름차순.
    pub fn pressure_class_values(&self, material: PipeMaterial) -> Vec<f64> {
        let mut values: Vec<f64> = self
            .tables_for(material)
            .filter_map(|t| t.class_value)
            .collect();
        values.sort_by(f64::total_cmp);
        values.dedup();
        values
    }

    /// 재질별 가장 높은 압력 등급의 표.
    pub fn max_pressure_class(&self, material: PipeMaterial) -> Option<&PipeSizeTable> {
        self.tables_for(material)
            .filter(|t| t.class_value.is_some())
            .max_by(|a, b| {
                a.class_value
                    .unwrap_or_default()
                    .total_cmp(&b.class_value.unwrap_or_default())
            })
    }

    pub fn correction_factors(&self) -> &[CorrectionFactorEntry] {
        &self.correction_factors
    }
}
