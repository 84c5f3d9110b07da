use serde::Serialize;

/// Score derived from a session's answer records.
///
/// `answered` counts committed questions, so `correct / answered` is the
/// running accuracy and `correct / total` the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub correct: usize,
    pub answered: usize,
    pub total: usize,
}

impl Score {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }

    pub fn percentage(&self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Pass,
    Marginal,
    Fail,
}

/// Optional result banding. Without a pass threshold no band is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Banding {
    pub pass_threshold: Option<f64>,
    pub marginal_threshold: Option<f64>,
}

impl Banding {
    /// Thresholds are fractions of the total; marginal must not exceed pass.
    pub fn new(pass_threshold: Option<f64>, marginal_threshold: Option<f64>) -> Result<Self, String> {
        for (name, value) in [("pass", pass_threshold), ("marginal", marginal_threshold)] {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(format!("{} threshold {} must be within 0..=1", name, v));
                }
            }
        }

        match (pass_threshold, marginal_threshold) {
            (None, Some(_)) => Err("marginal threshold requires a pass threshold".to_string()),
            (Some(pass), Some(marginal)) if marginal > pass => Err(format!(
                "marginal threshold {} is above pass threshold {}",
                marginal, pass
            )),
            _ => Ok(Banding {
                pass_threshold,
                marginal_threshold,
            }),
        }
    }

    pub fn classify(&self, score: &Score) -> Option<Band> {
        let pass = self.pass_threshold?;
        let fraction = score.fraction();

        if fraction >= pass {
            Some(Band::Pass)
        } else if self.marginal_threshold.is_some_and(|m| fraction >= m) {
            Some(Band::Marginal)
        } else {
            Some(Band::Fail)
        }
    }
}
