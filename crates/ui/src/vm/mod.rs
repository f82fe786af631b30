mod history_vm;
mod results_vm;
mod test_vm;

pub use history_vm::{HistoryRowVm, HistoryStatsVm, map_history_rows, map_history_stats};
pub use results_vm::{
    ResultsFilter, ResultsVm, ReviewCardVm, ScoreboardVm, filter_heading, filter_reviews,
    map_results,
};
pub use test_vm::{OptionVm, QuestionCardVm, TestPageVm, TestVm, start_test};
