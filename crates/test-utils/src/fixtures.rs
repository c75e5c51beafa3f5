//! Mesh document fixtures for decoder and renderer tests.
//!
//! Each constant is the full text of a mesh file. The `malformed` module
//! holds documents that must be rejected.

/// 2x2 field over `[0, 2) x [0, 2)` at step 42.
pub const SIMPLE_2X2: &str = "42\n0 0 2 2\n2 2\n1 2 3 4";

/// 2 rows by 3 columns, written with the optimizer's trailing space.
pub const RECT_2X3: &str = "7\n-1.5 -1 1.5 1\n2 3\n0 1 2 3 4 5 ";

/// Uniform 4x4 field; no iso-value crossings exist.
pub const UNIFORM_4X4: &str = "0\n0 0 4 4\n4 4\n3 3 3 3 3 3 3 3 3 3 3 3 3 3 3 3";

/// 5x5 field with a single peak in the center over a symmetric domain.
pub const PEAK_5X5: &str = "1\n-2.5 -2.5 2.5 2.5\n5 5\n\
0 0 0 0 0 \
0 2 4 2 0 \
0 4 8 4 0 \
0 2 4 2 0 \
0 0 0 0 0 ";

/// Documents that must fail to decode.
pub mod malformed {
    /// Only three records.
    pub const MISSING_FIELD: &str = "42\n0 0 2 2\n2 2";

    /// Field record holds 3 values for a 2x2 shape.
    pub const SHORT_FIELD: &str = "42\n0 0 2 2\n2 2\n1 2 3";

    /// Field record holds 5 values for a 2x2 shape.
    pub const LONG_FIELD: &str = "42\n0 0 2 2\n2 2\n1 2 3 4 5";

    /// Bounds record with only three values.
    pub const SHORT_BOUNDS: &str = "42\n0 0 2\n2 2\n1 2 3 4";

    /// Shape record with three values.
    pub const LONG_SHAPE: &str = "42\n0 0 2 2\n2 2 1\n1 2 3 4";

    /// Non-numeric value in the field record.
    pub const BAD_VALUE: &str = "42\n0 0 2 2\n2 2\n1 two 3 4";

    /// Zero-sized shape.
    pub const EMPTY_SHAPE: &str = "42\n0 0 2 2\n0 2\n";
}

/// Run log with per-group best values, as written by grouped optimizers.
pub const GROUPED_RUN_LOG: &str = "step,group,best\n\
0,0,9.5\n\
0,1,7.25\n\
1,0,6.0\n\
1,1,6.5\n\
2,0,6.0\n\
2,1,2.0\n";

/// Run log with a single best value per step.
pub const SINGLE_RUN_LOG: &str = "step,best\n0,12.0\n1,8.5\n2,8.5\n3,1.25\n";

/// Run log using the time/tribe/value column naming.
pub const TRIBE_RUN_LOG: &str = "time,tribe,value\n0,0,4.0\n0,1,3.0\n1,0,2.0\n1,1,2.5\n";
