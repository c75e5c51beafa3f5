//! Tests for mesh file decoding and encoding.

use mesh_format::{decode, decode_str, encode, write, Bounds, FormatError, Grid, MeshError};
use test_utils::fixtures::{self, malformed};
use test_utils::{create_index_field, mesh_text, temp_test_dir, write_test_file};

// ============================================================================
// Well-formed documents
// ============================================================================

#[test]
fn test_decode_simple_scenario() {
    let grid = decode_str(fixtures::SIMPLE_2X2).unwrap();

    assert_eq!(grid.step(), "42");
    assert_eq!(grid.width(), 2);
    assert_eq!(grid.height(), 2);
    assert_eq!(grid.bounds(), Bounds::new(0.0, 0.0, 2.0, 2.0));
    assert_eq!(grid.row(0), Some(&[1.0, 2.0][..]));
    assert_eq!(grid.row(1), Some(&[3.0, 4.0][..]));
}

#[test]
fn test_decode_preserves_token_order() {
    let (width, height) = (7, 4);
    let values = create_index_field(width, height);
    let text = mesh_text("9", (-1.0, -2.0, 1.0, 2.0), height, width, &values);

    let grid = decode_str(&text).unwrap();

    assert_eq!(grid.shape(), (height, width));
    assert_eq!(grid.values(), values.as_slice());
    for row in 0..height {
        for col in 0..width {
            assert_eq!(grid.get(row, col), Some((row * 1000 + col) as f64));
        }
    }
}

#[test]
fn test_decode_trailing_space_in_field() {
    let grid = decode_str(fixtures::RECT_2X3).unwrap();
    assert_eq!(grid.shape(), (2, 3));
    assert_eq!(grid.values(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_step_label_is_verbatim() {
    let text = "  iteration 12 (final)\n0 0 1 1\n1 1\n5";
    let grid = decode_str(text).unwrap();
    assert_eq!(grid.step(), "  iteration 12 (final)");
}

#[test]
fn test_extra_records_are_ignored() {
    let text = format!("{}\n\ntrailing notes", fixtures::SIMPLE_2X2);
    let grid = decode_str(&text).unwrap();
    assert_eq!(grid.values(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_scientific_notation_values() {
    let grid = decode_str("0\n0 0 1 1\n1 3\n1e-3 -2.5E2 inf").unwrap();
    assert_eq!(grid.values()[0], 0.001);
    assert_eq!(grid.values()[1], -250.0);
    assert!(grid.values()[2].is_infinite());
}

// ============================================================================
// Malformed documents
// ============================================================================

#[test]
fn test_missing_records() {
    let err = decode_str(malformed::MISSING_FIELD).unwrap_err();
    assert_eq!(err, FormatError::MissingRecords { found: 3 });

    let err = decode_str("").unwrap_err();
    assert_eq!(err, FormatError::MissingRecords { found: 1 });
}

#[test]
fn test_short_field_is_shape_mismatch() {
    let err = decode_str(malformed::SHORT_FIELD).unwrap_err();
    assert_eq!(
        err,
        FormatError::ShapeMismatch {
            height: 2,
            width: 2,
            expected: 4,
            actual: 3
        }
    );
}

#[test]
fn test_long_field_is_shape_mismatch() {
    let err = decode_str(malformed::LONG_FIELD).unwrap_err();
    assert!(matches!(
        err,
        FormatError::ShapeMismatch {
            expected: 4,
            actual: 5,
            ..
        }
    ));
}

#[test]
fn test_bounds_token_count() {
    let err = decode_str(malformed::SHORT_BOUNDS).unwrap_err();
    assert_eq!(err, FormatError::BoundsTokenCount { found: 3 });
}

#[test]
fn test_shape_token_count() {
    let err = decode_str(malformed::LONG_SHAPE).unwrap_err();
    assert_eq!(err, FormatError::ShapeTokenCount { found: 3 });
}

#[test]
fn test_non_numeric_value() {
    let err = decode_str(malformed::BAD_VALUE).unwrap_err();
    match err {
        FormatError::InvalidNumber { record, token, .. } => {
            assert_eq!(record, 3);
            assert_eq!(token, "two");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_empty_shape() {
    let err = decode_str(malformed::EMPTY_SHAPE).unwrap_err();
    assert_eq!(err, FormatError::EmptyShape { height: 0, width: 2 });
}

#[test]
fn test_degenerate_bounds() {
    let err = decode_str("0\n1 0 1 2\n2 2\n1 2 3 4").unwrap_err();
    assert!(matches!(err, FormatError::InvalidBounds { .. }));
}

#[test]
fn test_format_error_message_mentions_counts() {
    let err = decode_str(malformed::SHORT_FIELD).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains('3'));
    assert!(msg.contains('4'));
}

// ============================================================================
// File access
// ============================================================================

#[test]
fn test_decode_file() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "zagros_loss_42.data", fixtures::SIMPLE_2X2);

    let grid = decode(&path).unwrap();
    assert_eq!(grid.values(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_decode_missing_file_is_io_error() {
    let dir = temp_test_dir();
    let err = decode(dir.path().join("absent.data")).unwrap_err();
    assert!(matches!(err, MeshError::Io { .. }));
    assert!(!err.is_format());
}

#[test]
fn test_decode_malformed_file_carries_path() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "short.data", malformed::SHORT_FIELD);

    let err = decode(&path).unwrap_err();
    assert!(err.is_format());
    assert!(err.to_string().contains("short.data"));
    assert!(matches!(
        err.format_error(),
        Some(FormatError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_write_then_decode_file() {
    let dir = temp_test_dir();
    let path = dir.path().join("out.data");
    let grid = Grid::new(
        "5",
        Bounds::new(-3.0, -3.0, 3.0, 3.0),
        2,
        3,
        vec![0.1, 0.2, 0.3, -0.4, 1e-9, 7.0],
    )
    .unwrap();

    write(&grid, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, encode(&grid));
    assert!(text.ends_with(' '));
    assert_eq!(decode(&path).unwrap(), grid);
}
