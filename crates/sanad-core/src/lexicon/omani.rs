//! Built-in Omani-dialect lexicon

use super::{ConcernGroup, ExpressionCategory, SeverityTier};

/// Crisis keywords in match order.
///
/// The last two entries are short forms the live session has always
/// treated as crisis language.
pub(super) const CRISIS_KEYWORDS: &[&str] = &[
    // Direct suicide references
    "انتحار",
    "أنتحر",
    "أقتل نفسي",
    // Death wishes
    "أريد أموت",
    "أبي أموت",
    "ودي أموت",
    "أتمنى أموت",
    "ليتني أموت",
    // Ending life
    "أنهي حياتي",
    "أخلص من الحياة",
    "أتخلص من نفسي",
    // Exhaustion with life
    "تعبت من الحياة",
    "ما عاد فيني أعيش",
    "ما أقدر أكمل",
    "خلاص ما أقدر",
    "انتهيت",
    "ما عاد عندي أمل",
    // Colloquial
    "ما عاد فيني",
    "خلاص تعبت",
    "ما أقدر أتحمل أكثر",
    "أريد أخلص",
    "ودي أختفي",
    "ما أبي أعيش",
    // Short forms
    "أموت",
    "ما فيني أعيش",
];

pub(super) const SEVERITY_TABLE: &[(&str, SeverityTier)] = &[
    ("انتحار", SeverityTier::VeryHigh),
    ("أقتل نفسي", SeverityTier::VeryHigh),
    ("أريد أموت", SeverityTier::VeryHigh),
    ("أبي أموت", SeverityTier::VeryHigh),
    ("أنهي حياتي", SeverityTier::High),
    ("أخلص من الحياة", SeverityTier::High),
    ("ما عاد فيني أعيش", SeverityTier::High),
    ("تعبت من الحياة", SeverityTier::Medium),
    ("ما أقدر أكمل", SeverityTier::Medium),
    ("انتهيت", SeverityTier::Medium),
];

pub(super) const EXPRESSIONS: &[(ExpressionCategory, &[&str])] = &[
    (
        ExpressionCategory::Greetings,
        &["شلونك؟", "كيف الحال؟", "أهلاً وسهلاً", "مرحبا وأهلاً"],
    ),
    (
        ExpressionCategory::SupportiveExpressions,
        &[
            "ما عليك",
            "لا تخاف",
            "بإذن الله",
            "إن شاء الله",
            "الله يعينك",
            "الله يوفقك",
            "ربي يسهل عليك",
        ],
    ),
    (
        ExpressionCategory::EmpatheticResponses,
        &[
            "أفهم شعورك",
            "أحس بك",
            "هذا طبيعي",
            "ما تلوم نفسك",
            "كلنا نمر بهذي الأوقات",
            "أنت مو لحالك",
        ],
    ),
    (
        ExpressionCategory::Encouragement,
        &[
            "أنت قوي",
            "تقدر تتجاوز هذا",
            "الأمور راح تتحسن",
            "خذ وقتك",
            "شوي شوي",
            "كل شي له حل",
        ],
    ),
    (
        ExpressionCategory::ReligiousContext,
        &[
            "الله سبحانه وتعالى",
            "بإذن الله",
            "إن شاء الله",
            "الله يعينك",
            "توكل على الله",
            "الله معك",
        ],
    ),
    (
        ExpressionCategory::LocalTerms,
        &["وايد", "زين", "شنو", "وين", "متى", "ليش"],
    ),
];

pub(super) const INAPPROPRIATE: &[(&str, ConcernGroup)] = &[
    ("حرام عليك تحس كذا", ConcernGroup::ReligiousInsensitivity),
    ("الله يعاقبك", ConcernGroup::ReligiousInsensitivity),
    ("هذا ذنب", ConcernGroup::ReligiousInsensitivity),
    ("هذا عيب", ConcernGroup::CulturalInsensitivity),
    ("الناس شيقولون عنك", ConcernGroup::CulturalInsensitivity),
    ("اخجل من نفسك", ConcernGroup::CulturalInsensitivity),
    ("تكلم مع رجال", ConcernGroup::GenderInsensitivity),
    ("البنت ما تقول كذا", ConcernGroup::GenderInsensitivity),
    ("الولد ما يبكي", ConcernGroup::GenderInsensitivity),
    ("أهلك غلط", ConcernGroup::FamilyDisrespect),
    ("عائلتك ما تفهم", ConcernGroup::FamilyDisrespect),
    ("اترك أهلك", ConcernGroup::FamilyDisrespect),
    ("خذ هذا الدواء", ConcernGroup::MedicalAdvice),
    ("أنت مريض نفسياً", ConcernGroup::MedicalAdvice),
    ("عندك اكتئاب", ConcernGroup::MedicalAdvice),
];
