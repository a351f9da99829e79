//! Canonical workflow stages and their ordering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One canonical, ordered step of the sample-processing pipeline.
///
/// Declaration order is the canonical workflow order, so the derived `Ord`
/// sorts stages by pipeline position. [`Stage::Unknown`] is a sentinel for
/// records whose status could not be mapped to a workflow step; it is not a
/// valid stage for tracking purposes and sorts after every canonical stage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Stage {
    /// Request received, samples not yet in any workflow.
    #[serde(rename = "Submitted")]
    Submitted,
    /// Sample is queued ahead of its first workflow.
    #[serde(rename = "Awaiting Processing")]
    AwaitingProcessing,
    /// Nucleic acid extraction.
    #[serde(rename = "Extraction")]
    Extraction,
    /// Library preparation, capture, pooling and normalization workflows.
    #[serde(rename = "Library Preparation")]
    LibraryPreparation,
    /// Library/pool quality control.
    #[serde(rename = "Quality Control")]
    QualityControl,
    /// Illumina sequencing workflows.
    ///
    /// A sample needing re-sequencing stays in Data QC, so Sequencing sorts
    /// before it.
    #[serde(rename = "Sequencing")]
    Sequencing,
    /// Post-sequencing data quality control.
    #[serde(rename = "Data QC")]
    DataQc,
    /// All processing done, request delivered.
    #[serde(rename = "IGO Complete")]
    IgoComplete,
    /// Sentinel: the stage could not be determined from the status.
    #[serde(rename = "unknown")]
    Unknown,
}

/// The canonical stage order. Fixed for the lifetime of the process.
pub const CANONICAL_STAGES: [Stage; 8] = [
    Stage::Submitted,
    Stage::AwaitingProcessing,
    Stage::Extraction,
    Stage::LibraryPreparation,
    Stage::QualityControl,
    Stage::Sequencing,
    Stage::DataQc,
    Stage::IgoComplete,
];

impl Stage {
    /// Returns the stage's display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::AwaitingProcessing => "Awaiting Processing",
            Self::Extraction => "Extraction",
            Self::LibraryPreparation => "Library Preparation",
            Self::QualityControl => "Quality Control",
            Self::Sequencing => "Sequencing",
            Self::DataQc => "Data QC",
            Self::IgoComplete => "IGO Complete",
            Self::Unknown => "unknown",
        }
    }

    /// Resolves a label back to its stage.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Submitted" => Some(Self::Submitted),
            "Awaiting Processing" => Some(Self::AwaitingProcessing),
            "Extraction" => Some(Self::Extraction),
            "Library Preparation" => Some(Self::LibraryPreparation),
            "Quality Control" => Some(Self::QualityControl),
            "Sequencing" => Some(Self::Sequencing),
            "Data QC" => Some(Self::DataQc),
            "IGO Complete" => Some(Self::IgoComplete),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Returns true iff the stage is a canonical workflow stage that may be
    /// tracked in per-stage aggregates. Sentinels are not valid.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns the next stage in the canonical order, or `None` for the last
    /// stage and for sentinels.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        let position = CANONICAL_STAGES.iter().position(|s| *s == self)?;
        CANONICAL_STAGES.get(position + 1).copied()
    }

    /// Returns the stage's position in the canonical order.
    ///
    /// Sentinels return the canonical length so they sort after every valid
    /// stage; this keeps ordering total over all stages.
    #[must_use]
    pub fn order(self) -> usize {
        CANONICAL_STAGES
            .iter()
            .position(|s| *s == self)
            .unwrap_or(CANONICAL_STAGES.len())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Returns the position of a stage label in the canonical order.
///
/// Unrecognized labels return the canonical length rather than failing,
/// which makes label comparison total over arbitrary strings.
#[must_use]
pub fn stage_order(label: &str) -> usize {
    CANONICAL_STAGES
        .iter()
        .position(|s| s.label() == label)
        .map_or(CANONICAL_STAGES.len(), |position| position)
}
