//! 배관 표 조회, 보정 계수, 손실 수두 공식 회귀 테스트.
use irrigation_design_core::hydraulics::{
    assess_head_loss, head_loss_formula, nearest_conservative, parse_numeric_label, BestPipeInfo,
    LookupMode, PipeMaterial, PipeTableSet, DEFAULT_HEAD_LOSS_RATIO,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

fn tables() -> &'static PipeTableSet {
    PipeTableSet::embedded()
}

#[test]
fn embedded_tables_cover_both_materials() {
    let t = tables();
    assert_eq!(t.pressure_class_values(PipeMaterial::Pe), vec![2.5, 4.0, 6.3]);
    assert_eq!(t.pressure_class_values(PipeMaterial::Pvc), vec![5.0, 8.5]);
    assert_eq!(t.correction_factors().len(), 12);
}

#[test]
fn conservative_rounding_rules() {
    let available = [2.5, 4.0, 6.3];
    assert_eq!(nearest_conservative(1.0, &available), Some(2.5));
    assert_eq!(nearest_conservative(4.0, &available), Some(4.0));
    assert_eq!(nearest_conservative(5.0, &available), Some(6.3));
    assert_eq!(nearest_conservative(10.0, &available), Some(6.3));
    assert_eq!(nearest_conservative(1.0, &[]), None);
}

#[test]
fn numeric_labels() {
    assert_eq!(parse_numeric_label("PN4"), Some(4.0));
    assert_eq!(parse_numeric_label("Class8.5"), Some(8.5));
    assert_eq!(parse_numeric_label("25mm"), Some(25.0));
    assert_eq!(parse_numeric_label("PN"), None);
}

#[test]
fn pipe_data_rounds_pressure_class_up() {
    let t = tables();
    let pe = t.get_pipe_data(PipeMaterial::Pe, "PN5").expect("PE PN5");
    assert_eq!(pe.pressure_class, "PN6.3");
    let pe_low = t.get_pipe_data(PipeMaterial::Pe, "PN2").expect("PE PN2");
    assert_eq!(pe_low.pressure_class, "PN2.5");
    let pvc = t.get_pipe_data(PipeMaterial::Pvc, "Class10").expect("PVC Class10");
    assert_eq!(pvc.pressure_class, "Class8.5");
}

#[test]
fn pipe_data_without_numeric_class_is_unresolved() {
    assert!(tables().get_pipe_data(PipeMaterial::Pe, "heavy").is_none());
    assert!(PipeTableSet::default()
        .get_pipe_data(PipeMaterial::Pe, "PN4")
        .is_none());
}

#[test]
fn pressure_loss_snaps_to_next_flow_row() {
    let t = tables();
    let hit = t
        .find_pressure_loss(PipeMaterial::Pe, "PN6.3", 25.0, 20.0)
        .expect("exact row");
    assert_eq!(hit.pressure_loss, 4.219);
    assert_eq!(hit.actual_flow, 20.0);
    assert!(hit.size_info.exact);

    let next = t
        .find_pressure_loss(PipeMaterial::Pe, "PN6.3", 25.0, 22.0)
        .expect("next row");
    assert_eq!(next.actual_flow, 25.0);
    assert_eq!(next.pressure_loss, 6.377);
    assert!(!next.clamped);
}

#[test]
fn pressure_loss_above_table_uses_last_row() {
    let hit = tables()
        .find_pressure_loss(PipeMaterial::Pe, "PN6.3", 25.0, 1000.0)
        .expect("last row");
    assert_eq!(hit.actual_flow, 60.0);
    assert_eq!(hit.pressure_loss, 32.27);
    assert!(hit.clamped);
}

#[test]
fn pipe_size_rounds_up_and_clamps() {
    let t = tables();
    let up = t
        .find_pressure_loss(PipeMaterial::Pe, "PN4", 30.0, 20.0)
        .expect("32mm");
    assert_eq!(up.actual_size, "32mm");
    assert!(!up.size_info.exact);
    let clamp = t
        .find_pressure_loss(PipeMaterial::Pe, "PN4", 90.0, 20.0)
        .expect("63mm");
    assert_eq!(clamp.actual_size, "63mm");
}

#[test]
fn interpolation_between_bracketing_rows() {
    let hit = tables()
        .interpolate_pressure_loss(PipeMaterial::Pe, "PN6.3", 25.0, 22.5)
        .expect("interpolated");
    assert_close("midpoint", hit.pressure_loss, (4.219 + 6.377) / 2.0, 1e-9);
    assert_eq!(hit.actual_flow, 22.5);
    assert!(!hit.clamped);

    let below = tables()
        .interpolate_pressure_loss(PipeMaterial::Pe, "PN6.3", 25.0, 1.0)
        .expect("below table");
    assert_eq!(below.pressure_loss, 0.324);
    assert!(below.clamped);
}

#[test]
fn correction_factor_picks_last_row_not_above() {
    let t = tables();
    let m = t.find_correction_factor(25);
    assert_eq!(m.actual_outlet_count, 20);
    assert_eq!(m.correction_factor, 0.354);
    assert_eq!(t.find_correction_factor(1).correction_factor, 1.0);
    assert_eq!(t.find_correction_factor(0).actual_outlet_count, 1);
    assert_eq!(t.find_correction_factor(500).actual_outlet_count, 100);
}

#[test]
fn head_loss_formula_matches_table_values() {
    let t = tables();
    let cases = [
        (PipeMaterial::Pe, "PN6.3", 25.0, 20.0, 50.0, 5),
        (PipeMaterial::Pe, "PN4", 32.0, 40.0, 120.0, 20),
        (PipeMaterial::Pvc, "Class8.5", 40.0, 100.0, 35.5, 1),
    ];
    for (material, class, size, flow, length, outlets) in cases {
        let info = BestPipeInfo {
            length,
            count: outlets,
            water_flow_rate: flow,
        };
        let r = t
            .calculate_new_head_loss(&info, material, class, size)
            .expect("head loss");
        let lookup = t
            .find_pressure_loss(material, class, size, flow)
            .expect("lookup");
        let y = t.find_correction_factor(outlets).correction_factor;
        assert_eq!(r.pressure_loss, lookup.pressure_loss);
        assert_eq!(r.correction_factor, y);
        assert_close(
            "head loss",
            r.head_loss,
            (lookup.pressure_loss / 10.0) * length * y,
            1e-12,
        );
    }
}

#[test]
fn head_loss_known_value() {
    let info = BestPipeInfo {
        length: 50.0,
        count: 5,
        water_flow_rate: 20.0,
    };
    let r = tables()
        .calculate_new_head_loss(&info, PipeMaterial::Pe, "PN6.3", 25.0)
        .expect("head loss");
    assert_close("hl", r.head_loss, 0.4219 * 50.0 * 0.457, 1e-9);
    assert_eq!(r.pressure_class_used, "PN6.3");
    assert_eq!(r.lookup_mode, LookupMode::NextRow);
}

#[test]
fn missing_pressure_class_falls_back_to_maximum() {
    let info = BestPipeInfo {
        length: 10.0,
        count: 1,
        water_flow_rate: 20.0,
    };
    let r = tables()
        .calculate_new_head_loss(&info, PipeMaterial::Pvc, "standard", 25.0)
        .expect("fallback");
    assert_eq!(r.pressure_class_used, "Class8.5");
    assert!(r.calculation_trace.iter().any(|l| l.contains("Class8.5")));
}

#[test]
fn head_loss_unresolved_without_tables() {
    let info = BestPipeInfo {
        length: 10.0,
        count: 1,
        water_flow_rate: 20.0,
    };
    assert!(PipeTableSet::default()
        .calculate_new_head_loss(&info, PipeMaterial::Pe, "PN4", 25.0)
        .is_none());
}

#[test]
fn zero_inputs_give_zero_head_loss() {
    let info = BestPipeInfo {
        length: 0.0,
        count: 0,
        water_flow_rate: 0.0,
    };
    let r = tables()
        .calculate_new_head_loss(&info, PipeMaterial::Pe, "PN4", 25.0)
        .expect("zero");
    assert_eq!(r.head_loss, 0.0);
    assert_eq!(head_loss_formula(12.0, 0.0, 0.5), 0.0);
}

#[test]
fn interpolated_mode_changes_only_pressure_loss() {
    let info = BestPipeInfo {
        length: 50.0,
        count: 5,
        water_flow_rate: 22.5,
    };
    let t = tables();
    let snap = t
        .calculate_head_loss_with_mode(&info, PipeMaterial::Pe, "PN6.3", 25.0, LookupMode::NextRow)
        .expect("snap");
    let interp = t
        .calculate_head_loss_with_mode(
            &info,
            PipeMaterial::Pe,
            "PN6.3",
            25.0,
            LookupMode::Interpolate,
        )
        .expect("interp");
    assert!(interp.head_loss < snap.head_loss);
    assert_eq!(interp.correction_factor, snap.correction_factor);
}

#[test]
fn twenty_percent_head_threshold() {
    let ok = assess_head_loss(2.0, 2.0, DEFAULT_HEAD_LOSS_RATIO);
    assert_close("head", ok.sprinkler_head_m, 20.3944, 1e-9);
    assert_close("allowed", ok.allowed_head_loss_m, 4.07888, 1e-9);
    assert!(ok.within_limit);
    assert!(!assess_head_loss(5.0, 2.0, DEFAULT_HEAD_LOSS_RATIO).within_limit);
}

#[test]
fn custom_tables_from_toml() {
    let content = r#"
correction_factors = [
    { outlets = 1, factor = 1.0 },
]

[[table]]
material = "PE"
pressure_class = "PN4"
size = "20mm"
rows = [
    { flow = 20.0, pressure_loss = 2.0 },
    { flow = 10.0, pressure_loss = 1.0 },
]
"#;
    let t = PipeTableSet::from_toml_str(content).expect("custom tables");
    // 행은 유량 순으로 정렬된다.
    let hit = t
        .find_pressure_loss(PipeMaterial::Pe, "PN4", 20.0, 5.0)
        .expect("row");
    assert_eq!(hit.pressure_loss, 1.0);
    assert!(t.get_pipe_data(PipeMaterial::Pvc, "Class5").is_none());
}

#[test]
fn malformed_tables_are_rejected() {
    assert!(PipeTableSet::from_toml_str("table = 3").is_err());
}
