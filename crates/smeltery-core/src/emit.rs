//! Hand-off of newly classified materials to persistent storage.

use crate::classifier::Classification;
use crate::id::ItemId;
use crate::material::Tier;

/// Destination for newly classified materials. Implementations append;
/// they never remove or reorder existing entries.
pub trait MaterialSink {
    type Error;

    fn append(&mut self, tier: Tier, items: &[ItemId]) -> Result<(), Self::Error>;
}

/// What [`emit`] wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitSummary {
    pub basic_written: usize,
    pub rare_written: usize,
}

impl EmitSummary {
    pub fn wrote_anything(&self) -> bool {
        self.basic_written + self.rare_written > 0
    }
}

/// Append newly classified items to `sink`. An empty tier is not written.
pub fn emit<S: MaterialSink>(
    classification: &Classification,
    sink: &mut S,
) -> Result<EmitSummary, S::Error> {
    let mut summary = EmitSummary::default();
    if !classification.newly_basic.is_empty() {
        sink.append(Tier::Basic, &classification.newly_basic)?;
        summary.basic_written = classification.newly_basic.len();
    }
    if !classification.newly_rare.is_empty() {
        sink.append(Tier::Rare, &classification.newly_rare)?;
        summary.rare_written = classification.newly_rare.len();
    }
    Ok(summary)
}

/// In-memory sink, handy for hosts that persist elsewhere.
impl MaterialSink for Vec<(Tier, Vec<ItemId>)> {
    type Error = std::convert::Infallible;

    fn append(&mut self, tier: Tier, items: &[ItemId]) -> Result<(), Self::Error> {
        self.push((tier, items.to_vec()));
        Ok(())
    }
}
