pub mod results;
pub mod search_index;

pub use results::ResultsView;
pub use search_index::{SearchIndex, SearchMode};
