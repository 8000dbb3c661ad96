//! Frequency-domain trace of the selected slice.

use crate::types::{Slice, SliceStore};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartPoint {
    /// Frequency offset from centre, Hz.
    pub x: f64,
    /// Power, dB.
    pub y: f64,
}

/// Receives the point list for redraw. Implemented by the host chart.
pub trait ChartSink {
    fn show(&mut self, index: Option<usize>, points: &[ChartPoint]);
}

/// 1-based slice number shown to users, matching the `k / total` counter.
pub fn slice_number(index: usize) -> usize {
    index + 1
}

/// Chart heading for the selected slice.
pub fn chart_title(index: Option<usize>) -> String {
    match index {
        Some(i) => format!("Periodogram: slice {}", slice_number(i)),
        None => "Periodogram".to_string(),
    }
}

/// Zero-centred frequency axis: `(i - N/2) * sample_rate / N`.
pub fn periodogram_points(slice: &Slice) -> Vec<ChartPoint> {
    let n = slice.power.len();
    if n == 0 {
        return Vec::new();
    }
    let bin_hz = slice.sample_rate / n as f64;
    let half = n as f64 / 2.0;
    slice
        .power
        .iter()
        .enumerate()
        .map(|(i, &p)| ChartPoint { x: (i as f64 - half) * bin_hz, y: p as f64 })
        .collect()
}

/// Pushes the current slice's trace to a chart whenever the selection moves.
#[derive(Debug, Default)]
pub struct PeriodogramView {
    shown: Option<usize>,
}

impl PeriodogramView {
    pub fn shown(&self) -> Option<usize> {
        self.shown
    }

    /// Forget what was shown so the next update always redraws.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Redraw for `current` if it differs from what the chart holds.
    /// Absent slices show an empty trace.
    pub fn update<C: ChartSink>(&mut self, store: &SliceStore, current: Option<usize>, chart: &mut C) -> bool {
        if current.is_some() && current == self.shown {
            return false;
        }
        let points = current
            .and_then(|i| store.get(i))
            .map(periodogram_points)
            .unwrap_or_default();
        chart.show(current, &points);
        self.shown = current;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Captured(Vec<(Option<usize>, usize)>);

    impl ChartSink for Captured {
        fn show(&mut self, index: Option<usize>, points: &[ChartPoint]) {
            self.0.push((index, points.len()));
        }
    }

    #[test]
    fn test_frequency_axis_is_zero_centred() {
        let slice = Slice { sample_rate: 1000.0, power: vec![-1.0, -2.0, -3.0, -4.0] };
        let pts = periodogram_points(&slice);
        let xs: Vec<f64> = pts.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![-500.0, -250.0, 0.0, 250.0]);
        assert_eq!(pts[2].y, -3.0);
    }

    #[test]
    fn test_chart_title_is_one_based() {
        assert_eq!(chart_title(Some(0)), "Periodogram: slice 1");
        assert_eq!(chart_title(Some(249)), "Periodogram: slice 250");
        assert_eq!(chart_title(None), "Periodogram");
    }

    #[test]
    fn test_view_redraws_only_on_change() {
        let store = SliceStore::new(vec![
            Some(Slice { sample_rate: 10.0, power: vec![0.0; 8] }),
            None,
        ]);
        let mut view = PeriodogramView::default();
        let mut chart = Captured::default();
        assert!(view.update(&store, Some(0), &mut chart));
        assert!(!view.update(&store, Some(0), &mut chart));
        assert!(view.update(&store, Some(1), &mut chart));
        view.invalidate();
        assert!(view.update(&store, Some(1), &mut chart));
        assert_eq!(chart.0, vec![(Some(0), 8), (Some(1), 0), (Some(1), 0)]);
    }
}
