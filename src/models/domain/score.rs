use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Score {
    pub id: i64,
    pub user_id: i64,
    pub question_id: i64,
    pub correct: bool,
    pub points: i32,
    pub runtime: i32, // seconds
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewScore {
    pub user_id: i64,
    pub question_id: i64,
    pub correct: bool,
    pub points: i32,
    pub runtime: i32,
}

impl NewScore {
    pub fn into_score(self, id: i64) -> Score {
        Score {
            id,
            user_id: self.user_id,
            question_id: self.question_id,
            correct: self.correct,
            points: self.points,
            runtime: self.runtime,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScoreChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<i32>,
}

impl ScoreChanges {
    pub fn apply_to(&self, score: &mut Score) {
        if let Some(correct) = self.correct {
            score.correct = correct;
        }
        if let Some(points) = self.points {
            score.points = points;
        }
        if let Some(runtime) = self.runtime {
            score.runtime = runtime;
        }
    }
}
