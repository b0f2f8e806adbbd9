//! Built-in question tables.

use repertor_core::models::record::Sex;

use super::{CategoryConfig, CategorySource, DifferentialPair, SymptomClarification};

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn category(
    name: &str,
    weight: u32,
    min_required: usize,
    source: CategorySource,
    questions: &[&str],
) -> CategoryConfig {
    CategoryConfig {
        name: name.to_string(),
        weight,
        min_required,
        source,
        applicable_to: None,
        questions: owned(questions),
    }
}

pub(super) fn categories() -> Vec<CategoryConfig> {
    vec![
        category(
            "mental_emotional",
            10,
            2,
            CategorySource::MentalEmotional,
            &[
                "How would you describe your emotional state? (anxious, irritable, sad, fearful, etc.)",
                "Do you prefer company or solitude when unwell?",
                "What are your main fears or anxieties?",
                "How do you react to stress or bad news?",
                "Do you weep easily? If so, does consolation help or make it worse?",
                "Are you more irritable than usual?",
                "Do you have any recurring dreams or nightmares?",
                "How is your memory and concentration?",
                "Do you tend to be hurried or slow in your actions?",
                "Are you more critical of yourself or others lately?",
            ],
        ),
        category(
            "thermal_state",
            8,
            1,
            CategorySource::Thermal,
            &[
                "Are you generally a hot person or cold person?",
                "Do you prefer warm or cool rooms?",
                "Do you like fresh air or prefer windows closed?",
                "How are your hands and feet - usually warm or cold?",
                "Do you sweat easily? If so, where and when?",
                "Does your condition get worse in hot or cold weather?",
            ],
        ),
        category(
            "modalities",
            9,
            3,
            CategorySource::Modalities,
            &[
                "What makes your symptoms BETTER? (time, position, temperature, pressure, motion, rest, etc.)",
                "What makes your symptoms WORSE? (time, position, temperature, pressure, motion, rest, etc.)",
                "Is there a specific time of day when symptoms are worse?",
                "Does motion/walking make you feel better or worse?",
                "Does lying down help or worsen your symptoms?",
                "Does pressure or rubbing the affected area help?",
                "Are symptoms worse before, during, or after eating?",
                "Does weather affect your symptoms? (cold, damp, heat, storms, etc.)",
            ],
        ),
        category(
            "food_preferences",
            6,
            2,
            CategorySource::FoodPreferences,
            &[
                "What foods do you strongly CRAVE or desire?",
                "What foods do you have an AVERSION to or dislike?",
                "Do you prefer warm or cold drinks?",
                "How is your thirst - excessive, moderate, or little thirst?",
                "Do you crave salt, sweets, sour, spicy, or fatty foods?",
                "Are there foods that definitely disagree with you or make symptoms worse?",
            ],
        ),
        category(
            "sleep",
            7,
            2,
            CategorySource::Sleep,
            &[
                "How is your sleep quality?",
                "What position do you sleep in? (back, side, stomach, curled up, etc.)",
                "Do you feel refreshed after sleep or still tired?",
                "What time do you typically fall asleep and wake up?",
                "Do you have difficulty falling asleep or staying asleep?",
                "Do you wake at a specific time each night?",
                "Do you snore or have breathing issues during sleep?",
                "Do you sweat during sleep? If so, where?",
            ],
        ),
        category(
            "causation",
            9,
            1,
            CategorySource::Causation,
            &[
                "What do you think caused this condition? (physical, emotional, environmental)",
                "Did this start after any specific event? (grief, anger, fright, injury, exposure, etc.)",
                "Have you had any major emotional shocks or traumas recently?",
                "Did this begin after suppression of something? (skin eruption, discharge, emotions, etc.)",
                "Any recent changes in life circumstances?",
                "Exposure to cold, heat, damp, or weather changes before onset?",
            ],
        ),
        category(
            "laterality",
            6,
            1,
            CategorySource::Laterality,
            &[
                "Are symptoms more on the RIGHT side or LEFT side?",
                "Do symptoms move from one side to the other?",
                "Which side of the body is generally more affected by problems?",
            ],
        ),
        category(
            "discharges",
            5,
            1,
            CategorySource::Discharges,
            &[
                "Is there any discharge? (nasal, vaginal, wound, etc.)",
                "If yes, what color is it? (clear, yellow, green, white, bloody)",
                "What is the consistency? (thin, thick, stringy, watery)",
                "Does it have an odor?",
                "Is it irritating or bland?",
            ],
        ),
        CategoryConfig {
            applicable_to: Some(Sex::Female),
            ..category(
                "menstrual",
                7,
                2,
                CategorySource::Menstrual,
                &[
                    "Are your periods regular or irregular?",
                    "How is the flow - heavy, moderate, scanty?",
                    "What color is the menstrual blood?",
                    "Are periods painful? If so, what kind of pain?",
                    "Do you have PMS symptoms? What kind?",
                    "How do you feel emotionally before, during, and after periods?",
                    "Are other symptoms better or worse during menses?",
                ],
            )
        },
        category(
            "past_suppression",
            8,
            1,
            CategorySource::PastHistory,
            &[
                "Have you ever had skin eruptions that were suppressed with creams/ointments?",
                "Have any discharges been stopped with medications?",
                "Have you taken steroids or strong medications in the past?",
                "Were any symptoms suddenly stopped or suppressed?",
                "History of vaccinations and any reactions?",
            ],
        ),
    ]
}

pub(super) fn differential_pairs() -> Vec<DifferentialPair> {
    let pair = |first: &str, second: &str, questions: &[&str]| DifferentialPair {
        first: first.to_string(),
        second: second.to_string(),
        questions: owned(questions),
    };
    vec![
        pair(
            "Sulphur",
            "Pulsatilla",
            &[
                "Do you feel worse from heat or better from heat?",
                "Do you prefer to be alone or seek company when ill?",
                "Are you generally warm-blooded or chilly?",
            ],
        ),
        pair(
            "Arsenicum",
            "Phosphorus",
            &[
                "Are you anxious about your health and future?",
                "Do you feel better with company or prefer to be alone?",
                "Do you desire cold drinks or warm drinks?",
            ],
        ),
        pair(
            "Nux Vomica",
            "Lycopodium",
            &[
                "What time of day are symptoms worst? (morning vs afternoon/evening)",
                "Do you have digestive issues with bloating?",
                "Are you more irritable or lacking in confidence?",
            ],
        ),
        pair(
            "Natrum Mur",
            "Ignatia",
            &[
                "Do you weep alone or in company?",
                "Does consolation help or make you feel worse?",
                "Are symptoms changeable or consistent?",
            ],
        ),
        pair(
            "Bryonia",
            "Rhus Tox",
            &[
                "Does motion make symptoms better or worse?",
                "Do you feel better lying still or moving about?",
                "Is there stiffness that improves with continued motion?",
            ],
        ),
    ]
}

pub(super) fn generic_differential() -> Vec<String> {
    owned(&[
        "What is your exact thermal state? (hot/cold blooded)",
        "How do you respond emotionally to stress?",
        "What time of day are symptoms typically worst?",
        "Does motion make you feel better or worse overall?",
    ])
}

pub(super) fn symptom_clarifications() -> Vec<SymptomClarification> {
    let clarify = |keyword: &str, questions: &[&str]| SymptomClarification {
        keyword: keyword.to_string(),
        questions: owned(questions),
    };
    vec![
        clarify(
            "headache",
            &[
                "Describe the exact location of the headache",
                "What does the pain feel like? (throbbing, pressing, bursting, sharp, dull)",
                "Does it extend or radiate anywhere?",
                "What brings it on? (sun, mental exertion, hunger, etc.)",
                "Does pressure or binding the head help?",
            ],
        ),
        clarify(
            "cough",
            &[
                "Is the cough dry or with expectoration?",
                "If with expectoration, what color and consistency?",
                "What time of day is cough worse?",
                "What triggers the cough? (lying down, talking, cold air, etc.)",
                "Is there a tickling sensation? Where?",
            ],
        ),
        clarify(
            "pain",
            &[
                "Describe the exact character of pain (burning, stitching, cramping, etc.)",
                "Does the pain stay in one place or move around?",
                "Rate pain intensity (1-10)",
                "Does the pain come and go or is it constant?",
                "What position gives relief?",
            ],
        ),
        clarify(
            "fever",
            &[
                "Is there a pattern to the fever? (time of day, alternating with chills)",
                "Do you have chills? Before, during, or after fever?",
                "Is there sweating? When and where?",
                "Are you thirsty during fever? For what?",
                "Do you want to be covered or uncovered?",
            ],
        ),
        clarify(
            "anxiety",
            &[
                "When is anxiety worst? (time of day, situations)",
                "What are you anxious about specifically?",
                "Physical symptoms with anxiety? (palpitations, trembling, etc.)",
                "Does anticipation of events make you anxious?",
                "How does anxiety affect your daily functioning?",
            ],
        ),
        clarify(
            "eruption",
            &[
                "Describe the appearance (color, size, shape, texture)",
                "Is there itching? When is it worse?",
                "Does scratching help or make it worse?",
                "Any discharge? What kind?",
                "Does heat or cold affect it?",
                "Where did it first appear and how has it spread?",
            ],
        ),
        clarify(
            "digestive",
            &[
                "Describe the exact nature of digestive discomfort",
                "When does it occur in relation to eating?",
                "What foods make it better or worse?",
                "Is there bloating? When?",
                "Bowel movements - frequency, consistency, color, odor",
                "Any specific cravings or aversions?",
            ],
        ),
        clarify(
            "joint",
            &[
                "Which joints are affected? (be specific)",
                "Is there swelling, redness, or heat?",
                "Better or worse with first motion?",
                "Better or worse with continued motion?",
                "Better or worse with rest?",
                "Weather effects? (cold, damp, heat)",
                "Time of day when worst?",
            ],
        ),
    ]
}

pub(super) fn modality_questions() -> Vec<String> {
    owned(&[
        "What specific things make your symptoms BETTER? (Be as detailed as possible)",
        "What specific things make your symptoms WORSE? (Be as detailed as possible)",
        "Is there a specific time of day when you feel worst?",
        "Does weather affect your symptoms? How?",
        "Does eating affect your symptoms? Better or worse?",
        "Does position (lying, sitting, standing) affect symptoms?",
        "Does motion or rest help more?",
        "Does warmth or cold application help?",
    ])
}

pub(super) fn constitutional_questions() -> Vec<String> {
    owned(&[
        "Describe your general energy level (high, moderate, low, exhausted)",
        "How do you handle stress generally?",
        "What is your general body temperature tendency? (always hot/cold/variable)",
        "Describe your personality in a few words",
        "What are your main life concerns or worries?",
        "How is your overall vitality and resilience?",
        "Do you catch colds easily or have strong immunity?",
        "How do you typically react to medications?",
    ])
}
