//! Topic dispatch with short-term repetition avoidance.

use std::collections::{BTreeMap, VecDeque};

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::generators::{self, Generator};
use super::{ExamGroup, Question, Topic};

const MAX_ATTEMPTS: usize = 20;
const HASH_HISTORY: usize = 30;
const TOPIC_HISTORY: usize = 10;
const EXAM_RECENT_TOPICS: usize = 3;
const ALL_RECENT_TOPICS: usize = 5;

/// Per-user history. Lives in the dialogue state, so it is persisted with it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    last_text: Option<String>,
    last_hash: Option<u64>,
    /// Oldest first.
    recent_hashes: VecDeque<u64>,
    /// Most recent first.
    recent_topics: VecDeque<Topic>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, question: &Question) {
        let hash = question.fingerprint();
        self.last_text = Some(question.text.clone());
        self.last_hash = Some(hash);

        self.recent_hashes.push_back(hash);
        while self.recent_hashes.len() > HASH_HISTORY {
            self.recent_hashes.pop_front();
        }

        self.recent_topics.push_front(question.topic);
        self.recent_topics.truncate(TOPIC_HISTORY);
    }

    fn repeats_last(&self, candidate: &Question, previous: Option<&Question>) -> bool {
        previous.is_some_and(|p| p.text == candidate.text)
            || self.last_hash == Some(candidate.fingerprint())
            || self.last_text.as_deref() == Some(candidate.text.as_str())
    }

    fn is_recent(&self, candidate: &Question, previous: Option<&Question>) -> bool {
        self.repeats_last(candidate, previous)
            || self.recent_hashes.contains(&candidate.fingerprint())
    }
}

/// Registry of topic generators.
pub struct QuestionBank {
    registry: BTreeMap<Topic, Generator>,
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionBank {
    pub fn new() -> Self {
        let registry = Topic::ALL
            .iter()
            .map(|topic| (*topic, generators::for_topic(*topic)))
            .collect();
        Self { registry }
    }

    /// Replaces the generator behind `topic`.
    pub fn register(&mut self, topic: Topic, generator: Generator) {
        self.registry.insert(topic, generator);
    }

    fn generator(&self, topic: Topic) -> Generator {
        self.registry
            .get(&topic)
            .copied()
            .unwrap_or_else(|| generators::for_topic(topic))
    }

    /// Name-based entry point. Unknown topic or exam names are ignored.
    pub fn get_new_question(
        &self,
        session: &mut Session,
        topic: Option<&str>,
        exam: Option<&str>,
        previous: Option<&Question>,
    ) -> Question {
        let topic = topic.and_then(|name| {
            let parsed = Topic::from_name(name);
            if parsed.is_none() {
                debug!("Unknown topic {:?}, picking at random", name);
            }
            parsed
        });
        let exam = exam.and_then(|name| {
            let parsed = ExamGroup::from_name(name);
            if parsed.is_none() {
                debug!("Unknown exam group {:?}, picking at random", name);
            }
            parsed
        });
        self.next_question(session, topic, exam, previous, &mut rand::thread_rng())
    }

    /// Always returns a question. Repeats are only possible after
    /// `MAX_ATTEMPTS` rejected draws.
    pub fn next_question<R: Rng>(
        &self,
        session: &mut Session,
        topic: Option<Topic>,
        exam: Option<ExamGroup>,
        previous: Option<&Question>,
        rng: &mut R,
    ) -> Question {
        let chosen = self.choose_topic(session, topic, exam, rng);
        let generator = self.generator(chosen);
        for _ in 0..MAX_ATTEMPTS {
            let candidate = generator(rng);
            if !session.is_recent(&candidate, previous) {
                debug!("Serving {} ({})", candidate.kind, chosen);
                session.record(&candidate);
                return candidate;
            }
        }

        debug!(
            "No fresh {} question after {} attempts (exam: {:?})",
            chosen, MAX_ATTEMPTS, exam
        );
        let question = self.fallback(session, topic, previous, rng);
        session.record(&question);
        question
    }

    // Every generator in shuffled order, or only the requested topic's. Only
    // back-to-back repeats are rejected here, and only for a while; after
    // that a repeat is accepted.
    fn fallback<R: Rng>(
        &self,
        session: &Session,
        topic: Option<Topic>,
        previous: Option<&Question>,
        rng: &mut R,
    ) -> Question {
        let mut pool: Vec<Generator> = match topic {
            Some(topic) => vec![self.generator(topic)],
            None => self.registry.values().copied().collect(),
        };
        if pool.is_empty() {
            pool = Topic::ALL.iter().map(|t| generators::for_topic(*t)).collect();
        }
        pool.shuffle(rng);

        let mut candidate = pool[0](rng);
        let mut attempt = 1;
        while attempt < MAX_ATTEMPTS && session.repeats_last(&candidate, previous) {
            candidate = pool[attempt % pool.len()](rng);
            attempt += 1;
        }
        candidate
    }

    fn choose_topic<R: Rng>(
        &self,
        session: &Session,
        topic: Option<Topic>,
        exam: Option<ExamGroup>,
        rng: &mut R,
    ) -> Topic {
        if let Some(topic) = topic {
            return topic;
        }
        let (candidates, window): (&[Topic], usize) = match exam {
            Some(exam) => (exam.topics(), EXAM_RECENT_TOPICS),
            None => (&Topic::ALL[..], ALL_RECENT_TOPICS),
        };

        let recent: Vec<Topic> = session.recent_topics.iter().take(window).copied().collect();
        let mut pool: Vec<Topic> = candidates
            .iter()
            .filter(|t| !recent.contains(*t))
            .copied()
            .collect();
        if pool.is_empty() {
            let last = session.recent_topics.front();
            pool = candidates
                .iter()
                .filter(|t| Some(*t) != last)
                .copied()
                .collect();
        }
        if pool.is_empty() {
            pool = candidates.to_vec();
        }
        pool.choose(rng).copied().unwrap_or(Topic::DescriptiveStats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::options::Choices;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    fn constant(_: &mut dyn RngCore) -> Question {
        Question::new(
            Topic::ZScore,
            "fixed",
            "Always the same".to_string(),
            Choices {
                options: vec!["1".into(), "2".into()],
                correct: 0,
            },
            "It is 1".to_string(),
        )
    }

    #[test]
    fn never_repeats_back_to_back() {
        let bank = QuestionBank::new();
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut last: Option<Question> = None;
        for _ in 0..100 {
            let question = bank.next_question(&mut session, None, None, last.as_ref(), &mut rng);
            if let Some(previous) = &last {
                assert_ne!(previous.fingerprint(), question.fingerprint());
            }
            last = Some(question);
        }
    }

    #[test]
    fn requested_topic_is_always_served() {
        let bank = QuestionBank::new();
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(2);
        for topic in [Topic::Counting, Topic::VariableTypes, Topic::ProbabilityTrueFalse] {
            for _ in 0..50 {
                let question = bank.next_question(&mut session, Some(topic), None, None, &mut rng);
                assert_eq!(question.topic, topic);
            }
        }
    }

    #[test]
    fn exam_group_restricts_and_rotates_topics() {
        let bank = QuestionBank::new();
        let mut rng = StdRng::seed_from_u64(3);
        for exam in ExamGroup::ALL {
            let mut session = Session::new();
            let mut served = Vec::new();
            for _ in 0..60 {
                let question = bank.next_question(&mut session, None, Some(exam), None, &mut rng);
                assert!(exam.topics().contains(&question.topic));
                served.push(question.topic);
            }
            for (i, topic) in served.iter().enumerate().skip(1) {
                let window = &served[i.saturating_sub(EXAM_RECENT_TOPICS)..i];
                assert!(!window.contains(topic), "{:?} repeated within {:?}", topic, window);
            }
        }
    }

    #[test]
    fn unfiltered_dispatch_avoids_the_five_latest_topics() {
        let bank = QuestionBank::new();
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(4);
        let mut served = Vec::new();
        for _ in 0..60 {
            served.push(bank.next_question(&mut session, None, None, None, &mut rng).topic);
        }
        for (i, topic) in served.iter().enumerate().skip(1) {
            let window = &served[i.saturating_sub(ALL_RECENT_TOPICS)..i];
            assert!(!window.contains(topic));
        }
    }

    #[test]
    fn history_is_bounded() {
        let bank = QuestionBank::new();
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..80 {
            bank.next_question(&mut session, None, None, None, &mut rng);
        }
        assert_eq!(session.recent_hashes.len(), HASH_HISTORY);
        assert_eq!(session.recent_topics.len(), TOPIC_HISTORY);
    }

    #[test]
    fn exhausted_retries_accept_a_duplicate() {
        let mut bank = QuestionBank::new();
        bank.register(Topic::ZScore, constant);
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(6);
        let first = bank.next_question(&mut session, Some(Topic::ZScore), None, None, &mut rng);
        let second =
            bank.next_question(&mut session, Some(Topic::ZScore), None, Some(&first), &mut rng);
        assert_eq!(first, second);
        assert_eq!(session.recent_hashes.len(), 2);
    }

    #[test]
    fn retries_redraw_the_chosen_topic_instead_of_switching() {
        let mut bank = QuestionBank::new();
        for topic in ExamGroup::Exam1.topics() {
            if *topic != Topic::DescriptiveStats {
                bank.register(*topic, constant);
            }
        }
        let mut left_the_exam = 0;
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut session = Session::new();
            let first = bank.next_question(&mut session, Some(Topic::ZScore), None, None, &mut rng);
            let second =
                bank.next_question(&mut session, None, Some(ExamGroup::Exam1), Some(&first), &mut rng);
            assert_ne!(second.text, first.text);
            // A stuck topic exhausts its retries and falls back to every
            // generator; switching topics mid-retry would always land on
            // descriptive stats instead.
            if !ExamGroup::Exam1.topics().contains(&second.topic) {
                left_the_exam += 1;
            }
        }
        assert!(left_the_exam > 0);
    }

    #[test]
    fn exhausted_exam_retries_widen_to_every_generator() {
        let mut bank = QuestionBank::new();
        for topic in ExamGroup::Exam1.topics() {
            bank.register(*topic, constant);
        }
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(9);
        let first = bank.next_question(&mut session, None, Some(ExamGroup::Exam1), None, &mut rng);
        assert_eq!(first.text, "Always the same");
        let second =
            bank.next_question(&mut session, None, Some(ExamGroup::Exam1), Some(&first), &mut rng);
        assert_ne!(second.text, first.text);
        assert!(ExamGroup::Exam2.topics().contains(&second.topic));
    }

    #[test]
    fn sessions_are_isolated() {
        let bank = QuestionBank::new();
        let mut busy = Session::new();
        let idle = Session::new();
        let mut rng = StdRng::seed_from_u64(7);
        bank.next_question(&mut busy, None, None, None, &mut rng);
        assert_eq!(busy.recent_hashes.len(), 1);
        assert_eq!(idle, Session::default());
    }

    #[test]
    fn names_are_resolved_and_unknown_names_ignored() {
        let bank = QuestionBank::new();
        let mut session = Session::new();
        let question = bank.get_new_question(&mut session, Some("z-score"), None, None);
        assert_eq!(question.topic, Topic::ZScore);

        let question = bank.get_new_question(&mut session, None, Some("Exam 2"), None);
        assert!(ExamGroup::Exam2.topics().contains(&question.topic));

        let question = bank.get_new_question(&mut session, Some("astrology"), Some("exam 9"), None);
        assert!(!question.options.is_empty());
    }
}
