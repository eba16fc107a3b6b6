pub mod review;
pub mod submission;
