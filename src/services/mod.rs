pub mod distribution;
pub mod git_platforms;
pub mod readme;
pub mod report;
pub mod report_pipeline;
pub mod wakatime;
