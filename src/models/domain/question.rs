use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: i64,
    pub author_id: i64,
    pub body: String,
    pub test_code: String,
    pub test_solution: String,
    pub difficulty: String, // Easy | Moderate | Hard, not enforced
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewQuestion {
    pub author_id: i64,
    pub body: String,
    pub test_code: String,
    pub test_solution: String,
    pub difficulty: String,
}

impl NewQuestion {
    pub fn into_question(self, id: i64) -> Question {
        Question {
            id,
            author_id: self.author_id,
            body: self.body,
            test_code: self.test_code,
            test_solution: self.test_solution,
            difficulty: self.difficulty,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QuestionChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_solution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl QuestionChanges {
    pub fn apply_to(&self, question: &mut Question) {
        if let Some(body) = &self.body {
            question.body = body.clone();
        }
        if let Some(test_code) = &self.test_code {
            question.test_code = test_code.clone();
        }
        if let Some(test_solution) = &self.test_solution {
            question.test_solution = test_solution.clone();
        }
        if let Some(difficulty) = &self.difficulty {
            question.difficulty = difficulty.clone();
        }
    }
}
