use crate::types::SliceStore;

/// Lower bound used when no slice has a finite power value.
pub const DEFAULT_MIN_DB: f64 = -130.0;
/// Upper bound used when no slice has a finite power value.
pub const DEFAULT_MAX_DB: f64 = 0.0;
/// Fraction of the observed range added to each end.
const MARGIN_FRACTION: f64 = 0.05;

/// Power range (dB) mapped onto the palette. Frozen for a loaded capture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self { min: DEFAULT_MIN_DB, max: DEFAULT_MAX_DB }
    }
}

impl ColorScale {
    /// Scan every slice once and derive global bounds with a 5% margin.
    pub fn from_store(store: &SliceStore) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (_, slice) in store.iter() {
            for &p in &slice.power {
                let p = p as f64;
                if !p.is_finite() {
                    continue;
                }
                min = min.min(p);
                max = max.max(p);
            }
        }
        if !min.is_finite() || !max.is_finite() {
            return Self::default();
        }
        let margin = (max - min) * MARGIN_FRACTION;
        Self { min: min - margin, max: max + margin }
    }

    /// Clamp `power` into the scale and map it to [0, 1].
    pub fn normalize(&self, power: f64) -> f64 {
        let range = self.max - self.min;
        if range <= 0.0 || !power.is_finite() {
            return 0.0;
        }
        ((power.clamp(self.min, self.max) - self.min) / range).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Slice;

    fn store(slices: Vec<Vec<f32>>) -> SliceStore {
        SliceStore::new(
            slices
                .into_iter()
                .map(|power| Some(Slice { sample_rate: 1.0, power }))
                .collect(),
        )
    }

    #[test]
    fn test_scale_applies_five_percent_margin() {
        let scale = ColorScale::from_store(&store(vec![vec![-80.0, -50.0], vec![-20.0, -60.0]]));
        assert!((scale.min - -83.0).abs() < 1e-9);
        assert!((scale.max - -17.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_defaults_when_empty() {
        assert_eq!(ColorScale::from_store(&SliceStore::empty()), ColorScale::default());
        assert_eq!(ColorScale::default(), ColorScale { min: -130.0, max: 0.0 });
    }

    #[test]
    fn test_scale_ignores_non_finite_values() {
        let scale = ColorScale::from_store(&store(vec![vec![f32::NAN, f32::NEG_INFINITY]]));
        assert_eq!(scale, ColorScale::default());

        let scale = ColorScale::from_store(&store(vec![vec![f32::NAN, -10.0, -30.0]]));
        assert!((scale.min - -31.0).abs() < 1e-9);
        assert!((scale.max - -9.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_clamps() {
        let scale = ColorScale { min: -100.0, max: 0.0 };
        assert_eq!(scale.normalize(-150.0), 0.0);
        assert_eq!(scale.normalize(10.0), 1.0);
        assert!((scale.normalize(-25.0) - 0.75).abs() < 1e-12);
        assert_eq!(scale.normalize(f64::NAN), 0.0);
    }
}
