
use serde::{Serialize, Deserialize};

use std::time::Duration;

use crate::admission::workflow::{Denial, Destination, InterviewHost, Notice};


// one asked question with the applicant's reply; `expected` and `correct`
// are only present for scored quiz runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
}

impl TranscriptEntry {

    pub fn scored(question: &str, answer: &str, expected: &str, correct: bool) -> Self {
        TranscriptEntry {
            question: question.to_string(),
            answer: answer.to_string(),
            expected: Some(expected.to_string()),
            correct: Some(correct),
        }
    }

    pub fn plain(question: &str, answer: &str) -> Self {
        TranscriptEntry {
            question: question.to_string(),
            answer: answer.to_string(),
            expected: None,
            correct: None,
        }
    }

}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuizOutcome {
    Passed,
    Failed,
    Cancelled,
    TimedOut,
}

#[derive(Debug, Clone)]
pub struct QuizReport {
    pub outcome: QuizOutcome,
    pub score: u32,
    pub total: u32,
    pub transcript: Vec<TranscriptEntry>,
}

#[derive(Debug, Clone)]
pub struct QuizSettings {
    pub questions: Vec<String>,
    pub expected_answers: Vec<String>,
    pub passing_score: u32,
    pub question_timeout: Duration,
    pub cancel_keyword: String,
}

impl QuizSettings {

    pub fn has_questions(&self) -> bool {
        !self.questions.is_empty()
    }

    pub fn validate(&self) -> std::result::Result<(), Denial> {
        if self.questions.len() != self.expected_answers.len() {
            return Err(Denial::BrokenQuizConfig {
                questions: self.questions.len(),
                answers: self.expected_answers.len(),
            });
        }
        Ok(())
    }

}

// the number of keywords an expected answer contributes is capped, question
// sets are written against exactly this containment check
const ANSWER_KEYWORD_CAP: usize = 3;

pub fn answer_keywords(expected: &str) -> Vec<String> {
    expected
        .to_lowercase()
        .split_whitespace()
        .take(ANSWER_KEYWORD_CAP)
        .map(|keyword| keyword.to_string())
        .collect()
}

pub fn is_correct_answer(expected: &str, reply: &str) -> bool {
    let reply = reply.to_lowercase();
    answer_keywords(expected)
        .iter()
        .all(|keyword| reply.contains(keyword))
}

// per-interview state, lives exactly as long as one quiz run
struct QuizSession {
    questions: Vec<(String, String)>,
    answers: Vec<TranscriptEntry>,
    score: u32,
    current: usize,
}

impl QuizSession {

    fn new(settings: &QuizSettings) -> Self {
        QuizSession {
            questions: settings.questions.iter().cloned()
                .zip(settings.expected_answers.iter().cloned())
                .collect(),
            answers: Vec::new(),
            score: 0,
            current: 0,
        }
    }

    fn record(&mut self, question: &str, answer: &str, expected: &str) {
        let correct = is_correct_answer(expected, answer);
        if correct {
            self.score += 1;
        }
        self.answers.push(TranscriptEntry::scored(question, answer, expected, correct));
        self.current += 1;
    }

    fn report(self, outcome: QuizOutcome) -> QuizReport {
        QuizReport {
            outcome,
            score: self.score,
            total: self.questions.len() as u32,
            transcript: self.answers,
        }
    }

}

// asks, collects and scores; recording and announcing the outcome is the
// caller's job
pub struct QuizEngine<'a> {
    host: &'a dyn InterviewHost,
}

impl<'a> QuizEngine<'a> {

    pub fn new(host: &'a dyn InterviewHost) -> QuizEngine<'a> {
        QuizEngine { host }
    }

    pub async fn run(&self,
            applicant_id: &str,
            destination: &Destination,
            settings: &QuizSettings) -> std::result::Result<QuizReport, Denial> {

        // a broken question set must never leave the applicant waiting
        settings.validate()?;

        let mut session = QuizSession::new(settings);
        let total = session.questions.len();

        while session.current < total {
            let (question, expected) = session.questions[session.current].clone();

            let notice = Notice::new(
                &format!("Question {}/{}", session.current + 1, total),
                &question);
            let _ = self.host.send(destination, &notice).await;

            let reply = self.host
                .await_reply(applicant_id, destination, settings.question_timeout)
                .await;

            match reply {
                None => return Ok(session.report(QuizOutcome::TimedOut)),
                Some(reply) => {
                    let reply = reply.trim().to_string();
                    if reply.to_lowercase() == settings.cancel_keyword.to_lowercase() {
                        return Ok(session.report(QuizOutcome::Cancelled));
                    }
                    session.record(&question, &reply, &expected);
                }
            }
        }

        let outcome = match session.score >= settings.passing_score {
            true  => QuizOutcome::Passed,
            false => QuizOutcome::Failed,
        };
        Ok(session.report(outcome))
    }

}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::admission::testkit::ScriptedHost;

    fn settings(questions: Vec<&str>, expected: Vec<&str>, passing_score: u32) -> QuizSettings {
        QuizSettings {
            questions: questions.into_iter().map(|q| q.to_string()).collect(),
            expected_answers: expected.into_iter().map(|a| a.to_string()).collect(),
            passing_score,
            question_timeout: Duration::from_secs(60),
            cancel_keyword: "cancel".to_string(),
        }
    }

    #[test]
    fn keyword_containment_scores_loosely() {
        assert!(is_correct_answer("red fast car", "the car is red and fast"));
        assert!(!is_correct_answer("red fast car extra", "red fast"));
    }

    #[test]
    fn keyword_extraction_is_capped_and_folded() {
        assert_eq!(answer_keywords("Red FAST car extra words"),
                   vec!["red", "fast", "car"]);
        assert_eq!(answer_keywords("one"), vec!["one"]);
    }

    #[tokio::test]
    async fn mismatched_configuration_sends_no_questions() {
        let host = ScriptedHost::new(vec![]);
        let settings = settings(vec!["q1", "q2"], vec!["a1"], 1);
        let verdict = QuizEngine::new(&host)
            .run("applicant", &Destination::Channel(1), &settings).await;
        assert!(matches!(verdict, Err(Denial::BrokenQuizConfig { questions: 2, answers: 1 })));
        assert_eq!(host.sent().len(), 0);
    }

    #[tokio::test]
    async fn full_run_scores_and_passes() {
        let host = ScriptedHost::new(vec![
            Some("beta alpha yes".to_string()),
            Some("no idea".to_string()),
        ]);
        let settings = settings(vec!["q1", "q2"], vec!["alpha beta", "gamma delta"], 1);
        let report = QuizEngine::new(&host)
            .run("applicant", &Destination::Channel(1), &settings).await.unwrap();
        assert_eq!(report.outcome, QuizOutcome::Passed);
        assert_eq!(report.score, 1);
        assert_eq!(report.total, 2);
        assert_eq!(report.transcript.len(), 2);
        assert_eq!(report.transcript[0].correct, Some(true));
        assert_eq!(report.transcript[1].correct, Some(false));
    }

    #[tokio::test]
    async fn cancel_keyword_stops_the_interview() {
        let host = ScriptedHost::new(vec![
            Some("first answer".to_string()),
            Some("  CANCEL  ".to_string()),
        ]);
        let settings = settings(
            vec!["q1", "q2", "q3", "q4", "q5"],
            vec!["a1", "a2", "a3", "a4", "a5"],
            3);
        let report = QuizEngine::new(&host)
            .run("applicant", &Destination::Channel(1), &settings).await.unwrap();
        assert_eq!(report.outcome, QuizOutcome::Cancelled);
        // question 3 was never sent
        assert_eq!(host.sent().len(), 2);
    }

    #[tokio::test]
    async fn timeout_stops_the_interview() {
        let host = ScriptedHost::new(vec![
            Some("first answer".to_string()),
            None,
        ]);
        let settings = settings(vec!["q1", "q2", "q3"], vec!["a1", "a2", "a3"], 1);
        let report = QuizEngine::new(&host)
            .run("applicant", &Destination::Channel(1), &settings).await.unwrap();
        assert_eq!(report.outcome, QuizOutcome::TimedOut);
        assert_eq!(host.sent().len(), 2);
        assert_eq!(report.transcript.len(), 1);
    }

    #[tokio::test]
    async fn failing_score_fails_the_quiz() {
        let host = ScriptedHost::new(vec![
            Some("wrong".to_string()),
            Some("also wrong".to_string()),
        ]);
        let settings = settings(vec!["q1", "q2"], vec!["alpha beta", "gamma delta"], 1);
        let report = QuizEngine::new(&host)
            .run("applicant", &Destination::Channel(1), &settings).await.unwrap();
        assert_eq!(report.outcome, QuizOutcome::Failed);
        assert_eq!(report.score, 0);
    }

}
