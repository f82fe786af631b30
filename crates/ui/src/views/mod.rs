mod history;
mod home;
mod results;
mod state;

pub use history::HistoryView;
pub use home::HomeView;
pub use results::ResultsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use test::TestView;
