// Draft phase and the signal weights used in each.

use std::fmt;

use serde::Serialize;

/// Coarse stage of the draft, by fraction of rounds completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftPhase {
    Early,
    Mid,
    Late,
    Final,
}

impl DraftPhase {
    pub fn label(&self) -> &'static str {
        match self {
            DraftPhase::Early => "early",
            DraftPhase::Mid => "mid",
            DraftPhase::Late => "late",
            DraftPhase::Final => "final",
        }
    }
}

impl fmt::Display for DraftPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weight of each signal in the composite score. Each set sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseWeights {
    pub vor: f64,
    pub scarcity: f64,
    pub need: f64,
    pub adp_value: f64,
}

impl PhaseWeights {
    pub fn total(&self) -> f64 {
        self.vor + self.scarcity + self.need + self.adp_value
    }
}

/// Phase for `current_round` of `total_rounds`:
///
/// | progress (round / total) | phase |
/// |--------------------------|-------|
/// | <= 0.20                  | early |
/// | <= 0.55                  | mid   |
/// | <= 0.80                  | late  |
/// | otherwise                | final |
///
/// Rounds past the end are `Final`. A zero-round draft is treated as final.
pub fn draft_phase(current_round: usize, total_rounds: usize) -> DraftPhase {
    if total_rounds == 0 {
        return DraftPhase::Final;
    }
    let progress = current_round as f64 / total_rounds as f64;

    if progress <= 0.2 {
        DraftPhase::Early
    } else if progress <= 0.55 {
        DraftPhase::Mid
    } else if progress <= 0.8 {
        DraftPhase::Late
    } else {
        DraftPhase::Final
    }
}

/// Signal weights for `phase`. Early drafts lean on raw value; late drafts
/// lean on filling the roster.
pub fn phase_weights(phase: DraftPhase) -> PhaseWeights {
    match phase {
        DraftPhase::Early => PhaseWeights {
            vor: 0.50,
            scarcity: 0.20,
            need: 0.10,
            adp_value: 0.20,
        },
        DraftPhase::Mid => PhaseWeights {
            vor: 0.30,
            scarcity: 0.25,
            need: 0.25,
            adp_value: 0.20,
        },
        DraftPhase::Late => PhaseWeights {
            vor: 0.15,
            scarcity: 0.20,
            need: 0.45,
            adp_value: 0.20,
        },
        DraftPhase::Final => PhaseWeights {
            vor: 0.10,
            scarcity: 0.10,
            need: 0.60,
            adp_value: 0.20,
        },
    }
}
