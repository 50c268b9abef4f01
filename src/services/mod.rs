pub mod embedding_index;
pub mod generator;
pub mod prompts;
pub mod recommendation;
pub mod steamship;

// Re-export public types
pub use embedding_index::EmbeddingIndex;
pub use generator::GeneratorModel;
pub use recommendation::RecommendationService;
pub use steamship::{PackageClient, SteamshipClient};
