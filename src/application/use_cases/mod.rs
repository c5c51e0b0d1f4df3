/// Use cases module containing application business logic orchestration
mod generate_rating_tree;

pub use generate_rating_tree::GenerateRatingTreeUseCase;
