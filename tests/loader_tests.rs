use railview::config::ViewDefaults;
use railview::color::ColorScale;
use railview::error::PlaybackError;
use railview::loaders::{
    parse_camera_params, parse_camera_timestamps, parse_chunk_timestamps, parse_csv_table,
    parse_scene_definition, parse_space_table, translations_from_rows, RecordingParts,
};
use railview::pose::projection_matrix;

#[test]
fn test_csv_table_skips_trailing_empty_line() {
    let table = parse_csv_table("1.0, 2.0, 3.0\n4.0, 5.0, 6.0\n\n").unwrap();
    assert_eq!(table, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
}

#[test]
fn test_csv_table_reports_bad_row() {
    let err = parse_csv_table("1.0,2.0\n3.0,oops\n").unwrap_err();
    assert!(matches!(err, PlaybackError::MalformedRow { row: 1, .. }));
}

#[test]
fn test_space_table() {
    let table = parse_space_table("1 2 3\n4  5\t6\n").unwrap();
    assert_eq!(table, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
}

#[test]
fn test_camera_timestamps_normalized_to_seconds() {
    let input = "timestamp,field\n1700000001000000000,a\n1700000001500000000,b\n1700000002000000000,c\n";
    let stamps = parse_camera_timestamps(input).unwrap();
    assert_eq!(stamps.len(), 3);
    assert_eq!(stamps[0].as_seconds(), 0.0);
    assert_eq!(stamps[1].as_seconds(), 0.5);
    assert_eq!(stamps[2].as_seconds(), 1.0);
}

#[test]
fn test_camera_timestamps_empty_is_not_ready() {
    let err = parse_camera_timestamps("timestamp,field\n").unwrap_err();
    assert!(err.is_recoverable());
    let err = err.with_retry_after(3000);
    assert!(matches!(
        err,
        PlaybackError::DataNotReady {
            retry_after_ms: 3000,
            ..
        }
    ));
}

#[test]
fn test_chunk_timestamps_second_column() {
    let input = "0 0.00\n1 0.50\nmalformed-short-line\n2 1.00\n";
    let stamps = parse_chunk_timestamps(input).unwrap();
    assert_eq!(stamps.len(), 3);
    assert_eq!(stamps[1].as_seconds(), 0.5);
}

#[test]
fn test_translations_reorder_columns() {
    let rows = parse_csv_table("1.0,2.0,3.0\n").unwrap();
    let translations = translations_from_rows(&rows).unwrap();
    // stored y-z-x, returned x-y-z
    assert_eq!(translations[0].x, 3.0);
    assert_eq!(translations[0].y, 1.0);
    assert_eq!(translations[0].z, 2.0);
}

#[test]
fn test_scene_definition_merges_styles() {
    let json = r#"{
        "views": [{"projectionMatrix": [1.0, 0.0], "controller": false}],
        "layers": [
            {"pointSize": 16, "pointColor": "yp", "opacity": 0.7, "visible": true},
            {"color": [232, 175, 16], "width": 60, "visible": true},
            {"color": [225, 80, 255], "width": 40, "visible": false},
            {"color": [250, 101, 15], "width": 60, "visible": true}
        ]
    }"#;
    let scene = parse_scene_definition(json).unwrap();
    assert_eq!(scene.views[0].projection_matrix.len(), 2);

    let styles = scene.styles(&ViewDefaults::default());
    assert_eq!(styles.point_cloud.color_scale, ColorScale::YellowPurple);
    assert_eq!(styles.profile_line.color, [232, 175, 16]);
    assert!(!styles.profile.visible);
    assert_eq!(styles.profile.width, 40);
}

#[test]
fn test_camera_params_yaml() {
    let yaml = r#"
"Camera.width": 1920.0
"Camera.height": 1080.0
CameraMat:
  rows: 3
  cols: 3
  data: [960.0, 0.0, 950.0, 0.0, 962.0, 545.0, 0.0, 0.0, 1.0]
"#;
    let intrinsics = parse_camera_params(yaml).unwrap();
    assert_eq!(intrinsics.fx, 960.0);
    assert_eq!(intrinsics.fy, 962.0);
    assert_eq!(intrinsics.cx, 950.0);
    assert_eq!(intrinsics.cy, 545.0);

    let flat = projection_matrix(&intrinsics, 0.1, 300.0);
    assert!(flat.iter().all(|v| v.is_finite()));
    assert_eq!(flat[0], 2.0 * 960.0 / 1920.0);
}

#[test]
fn test_camera_params_rejects_short_matrix() {
    let yaml = r#"
"Camera.width": 1920.0
"Camera.height": 1080.0
CameraMat:
  data: [1.0, 2.0]
"#;
    assert!(parse_camera_params(yaml).is_err());
}

fn synthetic_parts(frames: usize, chunks: usize) -> RecordingParts {
    let mut translations_csv = String::new();
    let mut rotations_csv = String::new();
    for i in 0..frames {
        // columns stored y-z-x
        translations_csv.push_str(&format!("0.0,0.5,{}\n", i as f64 * 0.5));
        rotations_csv.push_str(&format!("0.0,{},0.0\n", i as f64 * 0.01));
    }

    let mut camera_timestamps_csv = String::from("timestamp,frame\n");
    for i in 0..frames {
        camera_timestamps_csv.push_str(&format!("{},{}\n", 1_000_000_000 + i * 40_000_000, i));
    }

    let mut chunk_timestamps_txt = String::new();
    for i in 0..chunks {
        chunk_timestamps_txt.push_str(&format!("{} {}\n", i, i as f64 * 0.08));
    }

    let mut profile_table = String::new();
    let mut profile_rot_table = String::new();
    for i in 0..frames {
        profile_table.push_str(&format!("0.0 0.3 {}\n", i as f64 * 0.5 + 25.0));
        profile_rot_table.push_str("0.0 0.0 0.0\n");
    }

    RecordingParts {
        translations_csv,
        rotations_csv,
        camera_timestamps_csv,
        chunk_timestamps_txt,
        profile_translations: [(); 4].map(|_| profile_table.clone()),
        profile_rotations: [(); 4].map(|_| profile_rot_table.clone()),
        profile_outline_csv: "0.0,-1.5,0.0\n0.0,1.5,0.0\n0.0,1.5,4.0\n".to_string(),
    }
}

#[test]
fn test_assemble_recording() {
    let recording = synthetic_parts(50, 25).assemble().unwrap();
    assert_eq!(recording.frame_count(), 50);
    assert_eq!(recording.chunk_count(), 25);
    assert_eq!(recording.profile_outline.len(), 3);

    // camera timestamps were normalized to start at zero
    assert_eq!(recording.timeline.timestamp(0).as_seconds(), 0.0);
    assert_eq!(recording.timeline.timestamp(1).as_seconds(), 0.04);
}

#[test]
fn test_assemble_rejects_mismatched_tables() {
    let mut parts = synthetic_parts(50, 25);
    parts.translations_csv.push_str("0.0,0.5,100.0\n");
    let err = parts.assemble().unwrap_err();
    assert!(matches!(err, PlaybackError::TableLengthMismatch { .. }));
}

#[test]
fn test_assemble_empty_camera_timestamps_is_recoverable() {
    let mut parts = synthetic_parts(10, 5);
    parts.camera_timestamps_csv = "timestamp,frame\n".to_string();
    let err = parts.assemble().unwrap_err();
    assert!(err.is_recoverable());
}
