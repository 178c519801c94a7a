use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Topic {
    // Exam 1
    VariableTypes,
    DescriptiveStats,
    Regression,
    EmpiricalRule,
    Counting,
    MeanCorrection,
    ZScore,
    Formulas,
    EmpiricalRuleConcepts,
    ConceptualQuestions,
    TrueFalse,
    // Exam 2
    BasicProbability,
    ConditionalProbability,
    BinomialDistribution,
    NormalDistribution,
    SamplingDistributions,
    ProbabilityDistributions,
    VennDiagrams,
    ProbabilityTrueFalse,
}

impl Topic {
    pub const ALL: [Topic; 19] = [
        Topic::VariableTypes,
        Topic::DescriptiveStats,
        Topic::Regression,
        Topic::EmpiricalRule,
        Topic::Counting,
        Topic::MeanCorrection,
        Topic::ZScore,
        Topic::Formulas,
        Topic::EmpiricalRuleConcepts,
        Topic::ConceptualQuestions,
        Topic::TrueFalse,
        Topic::BasicProbability,
        Topic::ConditionalProbability,
        Topic::BinomialDistribution,
        Topic::NormalDistribution,
        Topic::SamplingDistributions,
        Topic::ProbabilityDistributions,
        Topic::VennDiagrams,
        Topic::ProbabilityTrueFalse,
    ];

    /// Name shown on buttons and in the topic menu.
    pub fn name(&self) -> &'static str {
        match self {
            Topic::VariableTypes => "Variable Types",
            Topic::DescriptiveStats => "Descriptive Stats",
            Topic::Regression => "Regression",
            Topic::EmpiricalRule => "Empirical Rule",
            Topic::Counting => "Counting",
            Topic::MeanCorrection => "Mean Correction",
            Topic::ZScore => "Z-Score",
            Topic::Formulas => "Formulas",
            Topic::EmpiricalRuleConcepts => "Empirical Rule Concepts",
            Topic::ConceptualQuestions => "Conceptual Questions",
            Topic::TrueFalse => "True/False",
            Topic::BasicProbability => "Assignment 7: Basic Probability",
            Topic::ConditionalProbability => "Assignment 8: Conditional Probability",
            Topic::BinomialDistribution => "Assignment 9: Binomial Distribution",
            Topic::NormalDistribution => "Assignment 10: Normal Distribution",
            Topic::SamplingDistributions => "Assignment 11: Sampling Distributions",
            Topic::ProbabilityDistributions => "Probability Distributions",
            Topic::VennDiagrams => "Venn Diagrams",
            Topic::ProbabilityTrueFalse => "Exam 2 True/False",
        }
    }

    /// Short tag stored on every generated question.
    pub fn slug(&self) -> &'static str {
        match self {
            Topic::VariableTypes => "variable-type",
            Topic::DescriptiveStats => "descriptive-stats",
            Topic::Regression => "regression",
            Topic::EmpiricalRule => "empirical-rule",
            Topic::Counting => "counting",
            Topic::MeanCorrection => "mean-correction",
            Topic::ZScore => "z-score",
            Topic::Formulas => "formula",
            Topic::EmpiricalRuleConcepts => "empirical-rule-concept",
            Topic::ConceptualQuestions => "conceptual",
            Topic::TrueFalse => "true-false",
            Topic::BasicProbability => "probability-basics",
            Topic::ConditionalProbability => "conditional-probability",
            Topic::BinomialDistribution => "binomial-distribution",
            Topic::NormalDistribution => "normal-distribution",
            Topic::SamplingDistributions => "central-limit-theorem",
            Topic::ProbabilityDistributions => "probability-distribution",
            Topic::VennDiagrams => "venn-diagram",
            Topic::ProbabilityTrueFalse => "true-false-exam2",
        }
    }

    /// Lenient lookup by display name or slug; `None` for anything unknown.
    pub fn from_name(name: &str) -> Option<Topic> {
        let name = name.trim();
        Topic::ALL.into_iter().find(|topic| {
            topic.name().eq_ignore_ascii_case(name) || topic.slug().eq_ignore_ascii_case(name)
        })
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownName(());

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown topic or exam name")
    }
}

impl std::error::Error for UnknownName {}

impl FromStr for Topic {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::from_name(s).ok_or(UnknownName(()))
    }
}

/// A cluster of topics covered by one exam.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ExamGroup {
    Exam1,
    Exam2,
}

impl ExamGroup {
    pub const ALL: [ExamGroup; 2] = [ExamGroup::Exam1, ExamGroup::Exam2];

    pub fn name(&self) -> &'static str {
        match self {
            ExamGroup::Exam1 => "Exam 1",
            ExamGroup::Exam2 => "Exam 2",
        }
    }

    pub fn topics(&self) -> &'static [Topic] {
        match self {
            ExamGroup::Exam1 => &Topic::ALL[..11],
            ExamGroup::Exam2 => &Topic::ALL[11..],
        }
    }

    pub fn from_name(name: &str) -> Option<ExamGroup> {
        let compact: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match compact.as_str() {
            "exam1" => Some(ExamGroup::Exam1),
            "exam2" => Some(ExamGroup::Exam2),
            _ => None,
        }
    }
}

impl fmt::Display for ExamGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExamGroup {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExamGroup::from_name(s).ok_or(UnknownName(()))
    }
}
