//! Tri-state signal columns

use serde::Serialize;

/// Per-candle signal: `Some(true)` fires, `Some(false)` does not, `None` is not yet computable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SignalColumn(Vec<Option<bool>>);

impl SignalColumn {
    pub fn new(values: Vec<Option<bool>>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.0.get(index).copied().flatten()
    }

    pub fn last(&self) -> Option<bool> {
        self.0.last().copied().flatten()
    }

    /// Dataframe-style value: 1, 0 or unset
    pub fn flag(&self, index: usize) -> Option<u8> {
        self.get(index).map(u8::from)
    }

    pub fn as_flags(&self) -> Vec<Option<u8>> {
        self.0.iter().map(|v| v.map(u8::from)).collect()
    }

    /// Indices where the signal fires
    pub fn fired(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, v)| (*v == Some(true)).then_some(i))
    }

    /// First index with a computed value
    pub fn first_computed(&self) -> Option<usize> {
        self.0.iter().position(Option::is_some)
    }

    pub fn values(&self) -> &[Option<bool>] {
        &self.0
    }
}

impl FromIterator<Option<bool>> for SignalColumn {
    fn from_iter<T: IntoIterator<Item = Option<bool>>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
