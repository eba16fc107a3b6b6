pub mod comments;
pub mod filters;
pub mod institutions;
pub mod requests;
pub mod research_changes;
pub mod researches;
pub mod schools;
