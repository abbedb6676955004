//! Verification question templates.
//!
//! Each known category carries a fixed set of multiple-choice questions the
//! finder answers when reporting. `Lainnya` has no fixed set; the finder
//! writes their own questions starting from editable placeholders.

use lostfound_db::entities::{Category, QuestionAnswer};
use serde::{Deserialize, Serialize};

/// Number of placeholder questions offered for `Lainnya`.
pub const OTHER_QUESTION_COUNT: usize = 5;
/// Number of placeholder options per question for `Lainnya`.
pub const OTHER_OPTION_COUNT: usize = 3;

/// A fixed question with its answer choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionTemplate {
    pub question: &'static str,
    pub options: &'static [&'static str],
}

/// A question as offered to the finder for editing or answering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftQuestion {
    pub question: String,
    pub options: Vec<String>,
}

impl DraftQuestion {
    /// Turn into a stored question with the given answer.
    #[must_use]
    pub fn answered(self, answer: impl Into<String>) -> QuestionAnswer {
        QuestionAnswer {
            question: self.question,
            answer: answer.into(),
            options: self.options,
        }
    }
}

impl From<&QuestionTemplate> for DraftQuestion {
    fn from(template: &QuestionTemplate) -> Self {
        Self {
            question: template.question.to_string(),
            options: template.options.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Questions available for a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSet {
    /// Fixed questions for a known category.
    Known(&'static [QuestionTemplate]),
    /// Editable placeholders for `Lainnya`.
    Other(Vec<DraftQuestion>),
}

impl QuestionSet {
    /// Look up the question set for a category.
    #[must_use]
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Dompet => Self::Known(DOMPET),
            Category::Tas => Self::Known(TAS),
            Category::Hp => Self::Known(HP),
            Category::Kunci => Self::Known(KUNCI),
            Category::Atribut => Self::Known(ATRIBUT),
            Category::Buku => Self::Known(BUKU),
            Category::Laptop => Self::Known(LAPTOP),
            Category::Lainnya => Self::Other(placeholders()),
        }
    }

    /// Whether the finder may rewrite the questions.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Other(_))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Known(templates) => templates.len(),
            Self::Other(drafts) => drafts.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The questions in order.
    #[must_use]
    pub fn into_drafts(self) -> Vec<DraftQuestion> {
        match self {
            Self::Known(templates) => templates.iter().map(DraftQuestion::from).collect(),
            Self::Other(drafts) => drafts,
        }
    }

    /// The questions in order, all unanswered.
    #[must_use]
    pub fn into_unanswered(self) -> Vec<QuestionAnswer> {
        self.into_drafts()
            .into_iter()
            .map(|draft| draft.answered(String::new()))
            .collect()
    }
}

fn placeholders() -> Vec<DraftQuestion> {
    (1..=OTHER_QUESTION_COUNT)
        .map(|i| DraftQuestion {
            question: format!("Custom Question {i}"),
            options: (1..=OTHER_OPTION_COUNT)
                .map(|j| format!("Option {j}"))
                .collect(),
        })
        .collect()
}

const COLOURS: &[&str] = &["Black", "Brown", "Blue", "Red", "Grey", "White", "Other"];

static DOMPET: &[QuestionTemplate] = &[
    QuestionTemplate {
        question: "What colour is the wallet?",
        options: COLOURS,
    },
    QuestionTemplate {
        question: "What material is the wallet made of?",
        options: &["Leather", "Synthetic leather", "Canvas", "Nylon", "Other"],
    },
    QuestionTemplate {
        question: "How does the wallet fold?",
        options: &["Bifold", "Trifold", "Long / no fold", "Card holder"],
    },
    QuestionTemplate {
        question: "Which of these cards is inside?",
        options: &["Student ID", "ATM card", "National ID (KTP)", "None of these"],
    },
    QuestionTemplate {
        question: "Roughly how much cash is inside?",
        options: &["None", "Under 50k", "50k to 200k", "Over 200k"],
    },
];

static TAS: &[QuestionTemplate] = &[
    QuestionTemplate {
        question: "What colour is the bag?",
        options: COLOURS,
    },
    QuestionTemplate {
        question: "What type of bag is it?",
        options: &["Backpack", "Sling bag", "Tote bag", "Laptop bag", "Pouch"],
    },
    QuestionTemplate {
        question: "What brand is the bag?",
        options: &["Eiger", "Consina", "Exsport", "No brand", "Other"],
    },
    QuestionTemplate {
        question: "What is in the main compartment?",
        options: &["Books", "Laptop", "Clothes", "Empty", "Other"],
    },
];

static HP: &[QuestionTemplate] = &[
    QuestionTemplate {
        question: "What brand is the phone?",
        options: &["Samsung", "Apple", "Xiaomi", "Oppo", "Vivo", "Realme", "Other"],
    },
    QuestionTemplate {
        question: "What colour is the phone body?",
        options: COLOURS,
    },
    QuestionTemplate {
        question: "Does the phone have a case?",
        options: &["No case", "Clear case", "Coloured case", "Wallet case"],
    },
    QuestionTemplate {
        question: "What is on the lock screen?",
        options: &["Photo of a person", "Scenery", "Plain colour", "Anime / cartoon", "Other"],
    },
    QuestionTemplate {
        question: "Is the screen cracked?",
        options: &["No", "Slightly", "Badly"],
    },
];

static KUNCI: &[QuestionTemplate] = &[
    QuestionTemplate {
        question: "What kind of key is it?",
        options: &["Motorcycle", "Car", "House / room", "Locker", "Other"],
    },
    QuestionTemplate {
        question: "How many keys are on the ring?",
        options: &["1", "2", "3", "4 or more"],
    },
    QuestionTemplate {
        question: "Is there a keychain attached?",
        options: &["No", "Doll / figure", "Brand logo", "Bottle opener", "Other"],
    },
];

static ATRIBUT: &[QuestionTemplate] = &[
    QuestionTemplate {
        question: "What kind of item is it?",
        options: &["Student ID card", "Lanyard", "Almamater jacket", "Name tag", "Other"],
    },
    QuestionTemplate {
        question: "Which faculty does it belong to?",
        options: &["Sains dan Teknologi", "Ushuluddin", "Syariah dan Hukum", "Other"],
    },
    QuestionTemplate {
        question: "What colour is it?",
        options: COLOURS,
    },
];

static BUKU: &[QuestionTemplate] = &[
    QuestionTemplate {
        question: "What kind of book is it?",
        options: &["Textbook", "Notebook", "Novel", "Quran / religious", "Other"],
    },
    QuestionTemplate {
        question: "What colour is the cover?",
        options: COLOURS,
    },
    QuestionTemplate {
        question: "Is a name written inside?",
        options: &["Yes, on the first page", "Yes, on the cover", "No"],
    },
    QuestionTemplate {
        question: "Roughly how thick is it?",
        options: &["Under 100 pages", "100 to 300 pages", "Over 300 pages"],
    },
];

static LAPTOP: &[QuestionTemplate] = &[
    QuestionTemplate {
        question: "What brand is the laptop?",
        options: &["Asus", "Acer", "Lenovo", "HP", "Apple", "Dell", "Other"],
    },
    QuestionTemplate {
        question: "What colour is the laptop?",
        options: &["Black", "Silver", "Grey", "White", "Other"],
    },
    QuestionTemplate {
        question: "Are there stickers on the lid?",
        options: &["None", "One or two", "Many"],
    },
    QuestionTemplate {
        question: "Was it in a sleeve or bag?",
        options: &["No", "Sleeve", "Laptop bag"],
    },
    QuestionTemplate {
        question: "What screen size is it?",
        options: &["Under 13 inch", "13 to 14 inch", "15 inch or larger"],
    },
];
