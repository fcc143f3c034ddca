use anyhow::Result;

use crate::model::{Quiz, QuizQuestion};

use super::percentage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
    pub percent: u32,
}

/// How an option renders once the quiz has been submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerMark {
    Correct,
    WrongPick,
    Neutral,
}

/// One pass through a quiz: answers can change until `submit`.
#[derive(Clone, Debug)]
pub struct QuizSession {
    quiz: Quiz,
    questions: Vec<QuizQuestion>,
    answers: Vec<Option<usize>>,
    score: Option<QuizScore>,
}

impl QuizSession {
    pub fn new(quiz: Quiz, questions: Vec<QuizQuestion>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            quiz,
            questions,
            answers,
            score: None,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn answer_for(&self, question: usize) -> Option<usize> {
        self.answers.get(question).copied().flatten()
    }

    pub fn answered(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_submitted(&self) -> bool {
        self.score.is_some()
    }

    pub fn score(&self) -> Option<QuizScore> {
        self.score
    }

    pub fn answer(&mut self, question: usize, option: usize) -> Result<()> {
        if self.is_submitted() {
            anyhow::bail!("quiz already submitted");
        }
        let q = self
            .questions
            .get(question)
            .ok_or_else(|| anyhow::anyhow!("no question {}", question + 1))?;
        if option >= q.options.len() {
            anyhow::bail!(
                "question {} has {} options",
                question + 1,
                q.options.len()
            );
        }
        self.answers[question] = Some(option);
        Ok(())
    }

    /// Scores the quiz. Unanswered questions count as wrong; submitting
    /// twice returns the first score.
    pub fn submit(&mut self) -> QuizScore {
        if let Some(score) = self.score {
            return score;
        }
        let correct = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| **a == Some(q.correct_answer))
            .count();
        let total = self.questions.len();
        let score = QuizScore {
            correct,
            total,
            percent: percentage(correct, total),
        };
        self.score = Some(score);
        score
    }

    pub fn mark(&self, question: usize, option: usize) -> AnswerMark {
        if !self.is_submitted() {
            return AnswerMark::Neutral;
        }
        let Some(q) = self.questions.get(question) else {
            return AnswerMark::Neutral;
        };
        if option == q.correct_answer {
            AnswerMark::Correct
        } else if self.answer_for(question) == Some(option) {
            AnswerMark::WrongPick
        } else {
            AnswerMark::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> QuizSession {
        let quiz = Quiz {
            id: "q".to_string(),
            course_id: "c".to_string(),
            title: "Basics".to_string(),
        };
        let question = |id: &str, correct: usize| QuizQuestion {
            id: id.to_string(),
            quiz_id: "q".to_string(),
            question: format!("Question {}", id),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_answer: correct,
        };
        QuizSession::new(quiz, vec![question("1", 0), question("2", 2), question("3", 1)])
    }

    #[test]
    fn scores_answers_and_counts_blanks_as_wrong() {
        let mut s = session();
        s.answer(0, 0).unwrap();
        s.answer(1, 1).unwrap();
        s.answer(1, 2).unwrap();
        assert_eq!(s.answered(), 2);

        let score = s.submit();
        assert_eq!(
            score,
            QuizScore {
                correct: 2,
                total: 3,
                percent: 67
            }
        );
        assert!(s.answer(2, 1).is_err());
        assert_eq!(s.submit(), score);
    }

    #[test]
    fn out_of_range_answers_are_rejected() {
        let mut s = session();
        assert!(s.answer(5, 0).is_err());
        assert!(s.answer(0, 3).is_err());
        assert_eq!(s.answered(), 0);
    }

    #[test]
    fn marks_appear_only_after_submit() {
        let mut s = session();
        s.answer(0, 1).unwrap();
        assert_eq!(s.mark(0, 0), AnswerMark::Neutral);

        s.submit();
        assert_eq!(s.mark(0, 0), AnswerMark::Correct);
        assert_eq!(s.mark(0, 1), AnswerMark::WrongPick);
        assert_eq!(s.mark(0, 2), AnswerMark::Neutral);
    }
}
