use serde_json::Value;

/// One decoded power spectrum. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    pub sample_rate: f64,
    /// Power per FFT bin, in dB.
    pub power: Vec<f32>,
}

impl Slice {
    pub fn bins(&self) -> usize {
        self.power.len()
    }
}

/// Slice object as served by the download endpoint. A field that is
/// missing or of the wrong type comes through as `None`, so one malformed
/// entry only costs its own slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawSlice {
    /// Base64 of little-endian f32 power values.
    pub data: Option<String>,
    pub sample_rate: Option<f64>,
}

impl RawSlice {
    pub fn new(data: impl Into<String>, sample_rate: f64) -> Self {
        Self { data: Some(data.into()), sample_rate: Some(sample_rate) }
    }

    pub fn from_value(value: &Value) -> Self {
        Self {
            data: value.get("data").and_then(Value::as_str).map(str::to_owned),
            sample_rate: value.get("sample_rate").and_then(Value::as_f64),
        }
    }
}

/// Ordered slices of one capture, index 0 = oldest.
///
/// Slots whose payload failed to decode stay in place as `None` so indices
/// keep matching the server's ordering.
#[derive(Clone, Debug, Default)]
pub struct SliceStore {
    slots: Vec<Option<Slice>>,
}

impl SliceStore {
    pub fn new(slots: Vec<Option<Slice>>) -> Self {
        Self { slots }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of index slots, including absent slices.
    pub fn total(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slices that decoded successfully.
    pub fn valid_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn get(&self, index: usize) -> Option<&Slice> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    /// Iterate present slices with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Slice)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (i, s)))
    }

    /// FFT bin count, taken from the first present slice.
    pub fn bins(&self) -> usize {
        self.iter().next().map(|(_, s)| s.bins()).unwrap_or(0)
    }
}
