//! Localized Question / Answer / Solution labels.

use serde::Deserialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lang {
    #[default]
    En,
    Hi,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    Question,
    Answer,
    Solution,
}

impl LabelKind {
    pub fn word(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (LabelKind::Question, Lang::En) => "Question",
            (LabelKind::Question, Lang::Hi) => "प्रश्‍न",
            (LabelKind::Answer, Lang::En) => "Answer",
            (LabelKind::Answer, Lang::Hi) => "उत्तर",
            (LabelKind::Solution, Lang::En) => "Solution",
            (LabelKind::Solution, Lang::Hi) => "हल",
        }
    }
}

/// `"Question 3:"`, or `"Question :"` when `number` is 0.
pub fn question_text(number: u32, lang: Lang) -> String {
    let word = LabelKind::Question.word(lang);
    if number == 0 {
        format!("{word} :")
    } else {
        format!("{word} {number}:")
    }
}

/// `"Answer :"` / `"Solution :"`.
pub fn answer_text(kind: LabelKind, lang: Lang) -> String {
    format!("{} :", kind.word(lang))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_numbering() {
        assert_eq!(question_text(1, Lang::En), "Question 1:");
        assert_eq!(question_text(0, Lang::En), "Question :");
        assert_eq!(question_text(12, Lang::Hi), "प्रश्‍न 12:");
    }

    #[test]
    fn answer_and_solution_differ() {
        assert_eq!(answer_text(LabelKind::Answer, Lang::Hi), "उत्तर :");
        assert_eq!(answer_text(LabelKind::Solution, Lang::Hi), "हल :");
        assert_eq!(answer_text(LabelKind::Answer, Lang::En), "Answer :");
        assert_eq!(answer_text(LabelKind::Solution, Lang::En), "Solution :");
    }
}
