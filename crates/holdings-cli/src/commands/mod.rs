pub mod departments;
pub mod matching;
pub mod merge;
pub mod resolve;
pub mod standardize;
