//! Labelled corpora
//!
//! Fixed Omani-dialect inputs used by the suites. The crisis corpus keeps
//! its figurative-speech edge cases on purpose: the keyword detector is
//! expected to get some of them wrong.

use sanad_core::ValidationContext;
use serde::{Deserialize, Serialize};

// ============================================================================
// Crisis corpus
// ============================================================================

/// Which part of the crisis corpus a case belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseGroup {
    /// Crisis language
    Positive,
    /// Everyday distress that is not a crisis
    Negative,
    /// Figurative or conditional phrasing
    Edge,
}

/// One labelled utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisCase {
    /// Utterance
    pub text: String,
    /// Whether it should be treated as a crisis
    pub expected: bool,
    /// Corpus group
    pub group: CaseGroup,
}

impl CrisisCase {
    fn new(text: &str, expected: bool, group: CaseGroup) -> Self {
        Self {
            text: text.to_string(),
            expected,
            group,
        }
    }
}

const POSITIVE: &[&str] = &[
    "أريد أموت",
    "أبي أموت من هذا الألم",
    "تعبت من الحياة، ما عاد فيني أكمل",
    "أريد أنهي حياتي",
    "ما عاد فيني أعيش",
    "خلاص تعبت، أريد أخلص",
    "ما أقدر أتحمل أكثر، أريد أختفي",
    "انتهيت، ما عاد عندي أمل",
];

const NEGATIVE: &[&str] = &[
    "أنا متعب من العمل",
    "أحس بالحزن اليوم",
    "الحياة صعبة أحياناً",
    "أريد أغير حياتي للأفضل",
    "تعبت من الدراسة",
    "ما أقدر أنام من القلق",
    "أحس إني وحيد",
    "الشغل يتعبني وايد",
];

const EDGE: &[(&str, bool)] = &[
    ("أموت من الضحك", false),
    ("أموت من الجوع", false),
    ("تعبت من الانتظار", false),
    ("أريد أموت إذا ما نجحت", true),
];

/// The 20-case crisis corpus: 8 positive, 8 negative, 4 edge
#[must_use]
pub fn crisis_cases() -> Vec<CrisisCase> {
    POSITIVE
        .iter()
        .map(|text| CrisisCase::new(text, true, CaseGroup::Positive))
        .chain(
            NEGATIVE
                .iter()
                .map(|text| CrisisCase::new(text, false, CaseGroup::Negative)),
        )
        .chain(
            EDGE.iter()
                .map(|(text, expected)| CrisisCase::new(text, *expected, CaseGroup::Edge)),
        )
        .collect()
}

// ============================================================================
// Cultural corpus
// ============================================================================

/// A reply with the score it is expected to land near
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalCase {
    /// Reply text
    pub reply: String,
    /// Context it is judged in
    pub context: ValidationContext,
    /// Expected overall score
    pub expected_score: f64,
}

/// The 4 reference replies
#[must_use]
pub fn cultural_cases() -> Vec<CulturalCase> {
    [
        (
            "شلونك؟ أفهم مشاعرك، ما عليك، بإذن الله الأمور راح تتحسن",
            ValidationContext::General,
            0.8,
        ),
        (
            "الله يعينك في هذا الوقت الصعب، توكل على الله وكله راح يكون زين",
            ValidationContext::Spiritual,
            0.9,
        ),
        (
            "حرام عليك تحس كذا، هذا عيب منك",
            ValidationContext::General,
            0.0,
        ),
        (
            "I understand your feelings, everything will be okay",
            ValidationContext::General,
            0.3,
        ),
    ]
    .into_iter()
    .map(|(reply, context, expected_score)| CulturalCase {
        reply: reply.to_string(),
        context,
        expected_score,
    })
    .collect()
}

// ============================================================================
// Scenario corpus
// ============================================================================

/// Kind of reply a scenario is written to provoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyKind {
    /// Short supportive reply
    Normal,
    /// Longer reply to a multi-part problem
    Complex,
    /// Emergency script
    Crisis,
}

impl ReplyKind {
    /// Lowercase name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Complex => "complex",
            Self::Crisis => "crisis",
        }
    }
}

/// Earlier exchange a scenario continues from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorTurn {
    /// User side
    pub user: String,
    /// Assistant side
    pub assistant: String,
}

/// One end-to-end voice scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Short Arabic title
    pub name: String,
    /// What the user says
    pub input: String,
    /// Length of the spoken clip in seconds
    pub audio_length: f64,
    /// Reply kind the scenario targets
    pub expected: ReplyKind,
    /// Earlier exchanges
    pub history: Vec<PriorTurn>,
    /// Free-form cultural label
    pub cultural_context: String,
}

fn scenario(
    name: &str,
    input: &str,
    audio_length: f64,
    expected: ReplyKind,
    cultural_context: &str,
) -> Scenario {
    Scenario {
        name: name.to_string(),
        input: input.to_string(),
        audio_length,
        expected,
        history: Vec::new(),
        cultural_context: cultural_context.to_string(),
    }
}

/// The 15 Omani scenarios
#[must_use]
pub fn scenarios() -> Vec<Scenario> {
    use ReplyKind::{Complex, Crisis, Normal};

    let mut follow_up = scenario(
        "محادثة متابعة",
        "شكراً على النصيحة بس ما زلت أحس بالقلق، شنو أسوي أكثر؟",
        3.5,
        Normal,
        "عماني - متابعة",
    );
    follow_up.history.push(PriorTurn {
        user: "أنا قلقان من الامتحانات".to_string(),
        assistant: "أفهم قلقك، هذا طبيعي قبل الامتحانات، بإذن الله كله راح يكون زين".to_string(),
    });

    vec![
        scenario(
            "استشارة القلق العام",
            "والله أنا قلقان زيادة من الشغل، ما أقدر أرقد الليل من كثر التفكير",
            4.5,
            Normal,
            "عماني أصيل - قلق العمل",
        ),
        scenario(
            "مشاكل عائلية",
            "عندي مشاكل مع أهلي، ما يفهمونني زين وأحس إني غريب عنهم، شنو أسوي؟",
            5.5,
            Complex,
            "عماني - مشاكل أسرية",
        ),
        scenario(
            "تدخل الأزمات",
            "والله تعبت من الحياة، ما عاد فيني أكمل، أريد أموت",
            3.5,
            Crisis,
            "عماني - حالة طوارئ",
        ),
        scenario(
            "ضغوط العمل",
            "الشغل صاير ثقيل علي، والمدير يضغط علي زيادة، كيف أتعامل معه؟",
            4.0,
            Normal,
            "عماني - ضغط مهني",
        ),
        scenario(
            "استفسار معقد طويل",
            "أنا أعاني من مشاكل وايد في حياتي، الشغل صعب والأهل ما يفهمونني والرفاق بعيدين عني، وأحس إني لحالي في هذا العالم، ما أعرف شنو أسوي، حتى النوم ما يجيني",
            8.5,
            Complex,
            "عماني - مشاكل متعددة",
        ),
        follow_up,
        scenario(
            "خلط اللغات",
            "أنا feeling قلقان وايد about my future، ما أعرف شنو أسوي",
            4.0,
            Normal,
            "عماني - خلط عربي إنجليزي",
        ),
        scenario(
            "سؤال قصير بسيط",
            "شلونك؟ كيف الحال؟",
            1.5,
            Normal,
            "عماني - تحية",
        ),
        scenario(
            "سياق ديني روحاني",
            "أحس إني بعيد عن الله، وهذا يخليني حزين وايد، كيف أقرب لربي؟",
            4.5,
            Normal,
            "عماني - روحاني إسلامي",
        ),
        scenario(
            "ضغط نفسي شديد",
            "كل شي في حياتي صعب، الدراسة والشغل والأهل والمستقبل، ما أقدر أتحمل أكثر",
            5.0,
            Complex,
            "عماني - ضغط شامل",
        ),
        scenario(
            "مشاكل الزواج",
            "عندي مشاكل مع زوجتي، ما نتفاهم زين، وأهلي يتدخلون في شؤوننا",
            4.5,
            Complex,
            "عماني - مشاكل زوجية",
        ),
        scenario(
            "قلق الشباب",
            "أنا شاب عمري 22 سنة، قلقان من المستقبل والوظيفة، كل الشباب حولي متفوقين وأنا متأخر",
            5.5,
            Normal,
            "عماني - قلق الشباب",
        ),
        scenario(
            "مشاكل مالية",
            "الوضع المالي صعب علي، الراتب ما يكفي والديون كثيرة، أحس بضغط كبير",
            4.0,
            Normal,
            "عماني - ضغط مالي",
        ),
        scenario(
            "مشاكل الدراسة",
            "أنا في الجامعة والدراسة صعبة علي، ما أقدر أركز والدرجات منخفضة",
            4.0,
            Normal,
            "عماني - مشاكل أكاديمية",
        ),
        scenario(
            "وحدة وعزلة",
            "أحس إني وحيد، ما عندي أصدقاء كثير، وأقضي وقتي لحالي دايماً",
            4.0,
            Normal,
            "عماني - عزلة اجتماعية",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crisis_corpus_shape() {
        let cases = crisis_cases();

        assert_eq!(cases.len(), 20);
        assert_eq!(cases.iter().filter(|c| c.expected).count(), 9);
        assert_eq!(
            cases.iter().filter(|c| c.group == CaseGroup::Edge).count(),
            4
        );
        assert_eq!(cases[0].text, "أريد أموت");
    }

    #[test]
    fn test_scenarios() {
        let scenarios = scenarios();

        assert_eq!(scenarios.len(), 15);
        assert_eq!(
            scenarios.iter().filter(|s| s.expected == ReplyKind::Crisis).count(),
            1
        );
        let follow_up = scenarios
            .iter()
            .find(|s| !s.history.is_empty())
            .unwrap();
        assert_eq!(follow_up.name, "محادثة متابعة");
    }

    #[test]
    fn test_cultural_cases_contexts() {
        let cases = cultural_cases();
        assert_eq!(cases.len(), 4);
        assert_eq!(cases[1].context, ValidationContext::Spiritual);
    }
}
