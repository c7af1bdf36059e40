//! Smeltery Core -- raw-material tier classification for crafting catalogs.
//!
//! Given a catalog of crafting recipes and two seed lists of raw materials
//! (basic and rare), this crate finds the intermediate items that should join
//! those lists: items that are crafted at a relevant station, consumed by
//! another recipe, and craftable entirely from already-classified materials.
//!
//! # Pipeline
//!
//! [`pipeline::classify`] runs three stages over one immutable
//! [`registry::Registry`]:
//!
//! 1. **Scan** -- [`filter::scan_recipes`] keeps recipes crafted at an
//!    allowed station whose result is not yet a material, and collects the
//!    ingredient universe (unclassified, non-forbidden ingredients).
//! 2. **Group** -- [`candidate::group_candidates`] keeps the result-eligible
//!    recipes whose result is in the ingredient universe and stores their
//!    minimal ingredient alternatives in a [`candidate::CandidateIndex`].
//! 3. **Fixed point** -- [`classifier::classify_candidates`] promotes results
//!    to basic (some alternative entirely basic) or rare (some alternative
//!    entirely basic or rare) until a full pass promotes nothing.
//!
//! The result is handed to storage through [`emit::emit`] and a
//! [`emit::MaterialSink`].
//!
//! # Key Types
//!
//! - [`registry::Registry`] -- Immutable records, keywords, and recipes
//!   (frozen at startup). Resolves raw [`id::RecordRef`]s to items.
//! - [`material::MaterialSets`] -- The basic and rare sets; grow only.
//! - [`config::ClassifierConfig`] -- Allowed, result-eligible, and forbidden
//!   keywords.
//! - [`pipeline::ClassificationReport`] -- Newly classified items plus the
//!   per-stage counts.

pub mod candidate;
pub mod classifier;
pub mod config;
pub mod emit;
pub mod filter;
pub mod id;
pub mod material;
pub mod pipeline;
pub mod registry;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
