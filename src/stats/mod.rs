pub mod branches;
pub mod churn;
pub mod contributors;
pub mod frequency;

pub use branches::{branch_commit_counts, branch_stats};
pub use churn::{directory_stats, file_stats};
pub use contributors::{contributor_line_stats, contributors};
pub use frequency::{average_per_day, frequency, frequency_by_author};
