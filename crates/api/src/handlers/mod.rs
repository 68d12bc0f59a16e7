pub mod actors;
pub mod form;
pub mod jobs;
pub mod scripts;
