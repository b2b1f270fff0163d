pub mod candidate_repository;

pub use candidate_repository::*;
