//! Gauge swatch arithmetic.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DocId;

pub const CM_PER_INCH: f64 = 2.54;

/// Stitch and row density derived from a measured swatch.
///
/// A zero width or height yields `None` for the affected densities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeMetrics {
    pub stitches_per_cm: Option<f64>,
    pub rows_per_cm: Option<f64>,
    pub stitches_per_inch: Option<f64>,
    pub rows_per_inch: Option<f64>,
}

impl GaugeMetrics {
    pub fn compute(stitches: f64, rows: f64, width_cm: f64, height_cm: f64) -> Self {
        let stitches_per_cm = per_cm(stitches, width_cm);
        let rows_per_cm = per_cm(rows, height_cm);
        Self {
            stitches_per_cm,
            rows_per_cm,
            stitches_per_inch: stitches_per_cm.map(|v| v * CM_PER_INCH),
            rows_per_inch: rows_per_cm.map(|v| v * CM_PER_INCH),
        }
    }
}

fn per_cm(count: f64, length_cm: f64) -> Option<f64> {
    (length_cm > 0.0).then(|| count / length_cm)
}

/// A swatch is worked with either needles or a hook, never both.
pub fn check_tool_exclusivity(
    needle: Option<DocId>,
    hook: Option<DocId>,
) -> Result<(), CoreError> {
    if needle.is_some() && hook.is_some() {
        return Err(CoreError::Validation(
            "A gauge cannot reference both a needle and a hook".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn computes_densities() {
        let m = GaugeMetrics::compute(20.0, 28.0, 10.0, 10.0);
        assert_eq!(m.stitches_per_cm, Some(2.0));
        assert_eq!(m.rows_per_cm, Some(2.8));
        assert!((m.stitches_per_inch.unwrap() - 5.08).abs() < 1e-9);
        assert!((m.rows_per_inch.unwrap() - 7.112).abs() < 1e-9);
    }

    #[test]
    fn zero_dimension_yields_none() {
        let m = GaugeMetrics::compute(20.0, 28.0, 0.0, 10.0);
        assert_eq!(m.stitches_per_cm, None);
        assert_eq!(m.stitches_per_inch, None);
        assert!(m.rows_per_cm.is_some());
    }

    #[test]
    fn needle_and_hook_are_exclusive() {
        assert!(check_tool_exclusivity(Some(Uuid::new_v4()), None).is_ok());
        assert!(check_tool_exclusivity(None, Some(Uuid::new_v4())).is_ok());
        assert!(check_tool_exclusivity(Some(Uuid::new_v4()), Some(Uuid::new_v4())).is_err());
    }
}
