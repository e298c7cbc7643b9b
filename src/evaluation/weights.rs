use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::prelude::*;

/// Weight vector for [`HeuristicEvaluator`](crate::evaluation::HeuristicEvaluator).
///
/// Supplied by an external adaptation process, either as a TOML file or
/// through [`EvalWeights::set`]/[`EvalWeights::apply`] by name. The engine
/// reads these; it never persists or learns them itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalWeights {
    /// Base value of a man.
    pub man_value: i32,
    /// Base value of a king, several-fold a man.
    pub king_value: i32,
    /// Penalty when a piece can be captured next ply.
    pub threat_penalty: i32,
    /// Threat penalty for kings, scaled further.
    pub king_threat_penalty: i32,
    /// Per-row bonus for a man's advancement toward promotion.
    pub advance_bonus: i32,
    /// Extra bonus for men within two rows of promotion.
    pub promotion_zone_bonus: i32,
    /// Bonus per same-side diagonal neighbour.
    pub cohesion_bonus: i32,
    /// Penalty for a piece with no same-side diagonal neighbour.
    pub isolation_penalty: i32,
    /// Weight on the quiet-move mobility count.
    pub mobility_weight: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            man_value: MAN_VALUE,
            king_value: KING_VALUE,
            threat_penalty: 40,
            king_threat_penalty: 130,
            advance_bonus: 4,
            promotion_zone_bonus: 18,
            cohesion_bonus: 6,
            isolation_penalty: 12,
            mobility_weight: 2,
        }
    }
}

impl EvalWeights {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("reading weights file {}", path.display()))?;
        toml::from_str(&text)
            .into_diagnostic()
            .with_context(|| format!("parsing weights file {}", path.display()))
    }

    /// Sets one weight by name. Unknown names are an error so an external
    /// adaptation layer cannot silently drift out of sync.
    pub fn set(&mut self, name: &str, value: i32) -> Result<()> {
        let slot = match name {
            "man_value" => &mut self.man_value,
            "king_value" => &mut self.king_value,
            "threat_penalty" => &mut self.threat_penalty,
            "king_threat_penalty" => &mut self.king_threat_penalty,
            "advance_bonus" => &mut self.advance_bonus,
            "promotion_zone_bonus" => &mut self.promotion_zone_bonus,
            "cohesion_bonus" => &mut self.cohesion_bonus,
            "isolation_penalty" => &mut self.isolation_penalty,
            "mobility_weight" => &mut self.mobility_weight,
            _ => miette::bail!("unknown evaluation weight '{name}'"),
        };
        *slot = value;
        Ok(())
    }

    /// Applies a name -> value map, the external weight-adaptation contract.
    pub fn apply(&mut self, overrides: &HashMap<String, i32>) -> Result<()> {
        for (name, &value) in overrides {
            self.set(name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_known_and_unknown_names() {
        let mut weights = EvalWeights::default();
        weights.set("king_value", 400).unwrap();
        assert_eq!(weights.king_value, 400);
        assert!(weights.set("queen_value", 900).is_err());
    }

    #[test]
    fn apply_overrides() {
        let mut weights = EvalWeights::default();
        let overrides = HashMap::from([
            ("man_value".to_string(), 90),
            ("cohesion_bonus".to_string(), 9),
        ]);
        weights.apply(&overrides).unwrap();
        assert_eq!(weights.man_value, 90);
        assert_eq!(weights.cohesion_bonus, 9);
    }

    #[test]
    fn parses_partial_toml() {
        let weights: EvalWeights = toml::from_str("king_value = 350\nmobility_weight = 3\n").unwrap();
        assert_eq!(weights.king_value, 350);
        assert_eq!(weights.mobility_weight, 3);
        assert_eq!(weights.man_value, EvalWeights::default().man_value);
    }
}
