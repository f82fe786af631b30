use mcq_core::model::{AnswerReview, SubmissionReport};
use mcq_core::normalize_display_text;

/// Which slice of the review list is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResultsFilter {
    #[default]
    All,
    Correct,
    Incorrect,
}

/// The score banner at the top of the results screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreboardVm {
    /// e.g. `"70.0%"`.
    pub score_text: String,
    /// CSS hook for the 80/60 color thresholds.
    pub score_class: &'static str,
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
}

/// One graded question in the review list.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewCardVm {
    /// 1-based position in the original test, stable across filters.
    pub number: usize,
    pub question: String,
    pub is_correct: bool,
    pub status_text: &'static str,
    pub not_answered: bool,
    /// `"B) some text"`, or the not-answered phrase.
    pub user_answer: String,
    pub correct_answer: String,
    /// The correct answer row only shows for misses.
    pub show_correct: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultsVm {
    pub scoreboard: ScoreboardVm,
    pub show_ai_disclaimer: bool,
}

#[must_use]
pub fn map_results(report: &SubmissionReport) -> ResultsVm {
    let score_class = if report.score >= 80.0 {
        "score-high"
    } else if report.score >= 60.0 {
        "score-mid"
    } else {
        "score-low"
    };
    ResultsVm {
        scoreboard: ScoreboardVm {
            score_text: report.score_display(),
            score_class,
            correct: report.correct_answers,
            incorrect: report.incorrect_answers(),
            total: report.total_questions,
        },
        show_ai_disclaimer: report.is_generated(),
    }
}

fn map_review(number: usize, review: &AnswerReview) -> ReviewCardVm {
    let not_answered = !review.user_answer_letter.is_answered();
    let user_answer = if not_answered {
        review.user_answer_letter.to_string()
    } else {
        format!(
            "{}) {}",
            review.user_answer_letter,
            normalize_display_text(&review.user_answer_text)
        )
    };
    ReviewCardVm {
        number,
        question: normalize_display_text(&review.question).into_owned(),
        is_correct: review.is_correct,
        status_text: if review.is_correct {
            "Correct"
        } else {
            "Incorrect"
        },
        not_answered,
        user_answer,
        correct_answer: format!(
            "{}) {}",
            review.correct_answer_letter,
            normalize_display_text(&review.correct_answer_text)
        ),
        show_correct: !review.is_correct,
    }
}

/// Review cards for the chosen filter, numbered by original position.
#[must_use]
pub fn filter_reviews(report: &SubmissionReport, filter: ResultsFilter) -> Vec<ReviewCardVm> {
    report
        .results
        .iter()
        .enumerate()
        .filter(|(_, review)| match filter {
            ResultsFilter::All => true,
            ResultsFilter::Correct => review.is_correct,
            ResultsFilter::Incorrect => !review.is_correct,
        })
        .map(|(index, review)| map_review(index + 1, review))
        .collect()
}

#[must_use]
pub fn filter_heading(filter: ResultsFilter, count: usize) -> String {
    match filter {
        ResultsFilter::All => "Detailed Review".to_string(),
        ResultsFilter::Correct => format!("Correct Answers ({count})"),
        ResultsFilter::Incorrect => format!("Incorrect Answers ({count})"),
    }
}
