use thiserror::Error;

/// A star rating in the valid range 1-5.
///
/// The questionnaire form encodes "unanswered" as 0; that sentinel never
/// becomes a `Rating` - it maps to `None` at the edge, so downstream code
/// cannot confuse an unanswered question with a real answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(u8);

#[derive(Error, Debug, PartialEq, Eq)]
#[error("rating out of range: {0}")]
pub struct InvalidRating(pub u8);

impl Rating {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = InvalidRating;

    fn try_from(raw: u8) -> Result<Self, InvalidRating> {
        if (1..=5).contains(&raw) {
            Ok(Rating(raw))
        } else {
            Err(InvalidRating(raw))
        }
    }
}

/// The five questionnaire answers, each possibly still unanswered.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionnaireAnswers {
    pub q1: Option<Rating>,
    pub q2: Option<Rating>,
    pub q3: Option<Rating>,
    pub q4: Option<Rating>,
    pub q5: Option<Rating>,
}

impl QuestionnaireAnswers {
    /// Decode raw form values. 0 and anything out of range count as
    /// unanswered.
    pub fn from_raw(raw: [u8; 5]) -> Self {
        let [q1, q2, q3, q4, q5] = raw.map(|value| Rating::try_from(value).ok());
        Self { q1, q2, q3, q4, q5 }
    }

    /// All five answers, or `None` while any question is unanswered.
    /// Submission is blocked until this returns `Some`.
    pub fn complete(&self) -> Option<[Rating; 5]> {
        Some([self.q1?, self.q2?, self.q3?, self.q4?, self.q5?])
    }

    /// Raw form values for re-rendering, unanswered questions as 0.
    pub fn raw(&self) -> [u8; 5] {
        [self.q1, self.q2, self.q3, self.q4, self.q5]
            .map(|answer| answer.map(Rating::value).unwrap_or(0))
    }
}

/// Overall rating for a completed questionnaire: the rounded mean of the
/// five answers, half away from zero. Always lands back in 1-5.
pub fn overall_rating(answers: [Rating; 5]) -> Rating {
    let sum: u32 = answers.iter().map(|rating| rating.value() as u32).sum();
    let rounded = (sum as f64 / answers.len() as f64).round() as u8;
    Rating(rounded)
}
