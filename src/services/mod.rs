pub mod article;
pub mod catalog;
pub mod comment;
pub mod seed;
pub mod topic;
pub mod user;
pub mod validation;
