//! 압력 등급과 배관 크기 선택에 공통으로 쓰는 "보수적 올림" 규칙.

/// 요청값 이상인 값 중 가장 작은 것을 고른다. 모두 작으면 최댓값으로 고정한다.
///
/// `available`은 오름차순이어야 한다. 비어 있거나 요청값이 유한하지 않으면 None.
pub fn nearest_conservative(requested: f64, available: &[f64]) -> Option<f64> {
    if !requested.is_finite() {
        return None;
    }
    available
        .iter()
        .copied()
        .find(|v| *v >= requested)
        .or_else(|| available.last().copied())
}

/// "PN6.3", "Class8.5", "25mm" 같은 표기에서 첫 숫자를 읽는다.
pub fn parse_numeric_label(label: &str) -> Option<f64> {
    let start = label.find(|c: char| c.is_ascii_digit())?;
    let rest = &label[start..];
    let end = rest
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*c == '.' && *i > 0)))
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    rest[..end].trim_end_matches('.').parse().ok()
}
