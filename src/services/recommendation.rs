use crate::{
    error::Result,
    models::{ScoredTag, Tag},
    services::{prompts, EmbeddingIndex, GeneratorModel},
};
use log::{debug, info};
use serde_json::Value;

/// Facade over the embedding index and generation model, backing the three
/// HTTP-invocable operations.
pub struct RecommendationService {
    index: EmbeddingIndex,
    generator: GeneratorModel,
}

impl RecommendationService {
    pub fn new(index: EmbeddingIndex, generator: GeneratorModel) -> Self {
        Self { index, generator }
    }

    /// Embed and index the given tags.
    pub async fn insert(&self, items: Vec<Tag>) -> Result<bool> {
        info!("Indexing {} tags", items.len());
        self.index.insert(&items).await?;
        Ok(true)
    }

    /// Return the `k` closest items in the embedding index.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredTag>> {
        self.index.search(query, k).await
    }

    /// Return the `k` closest items, each enriched with a derived topic,
    /// audience, location and explanation.
    ///
    /// The four generation calls per hit run strictly one after another,
    /// each awaited to completion before the next is issued. A failed call
    /// aborts the whole invocation; no partially-enriched hits escape.
    pub async fn suggest_story(&self, query: &str, k: usize) -> Result<Vec<ScoredTag>> {
        let mut hits = self.index.search(query, k).await?;
        info!("Enriching {} hits for suggestion", hits.len());

        for hit in &mut hits {
            let story = hit.tag.text.clone();

            let location = self.generator.generate(&prompts::location(&story)).await?;
            let audience = self.generator.generate(&prompts::audience(&story)).await?;
            let topic = self.generator.generate(&prompts::topic(&story)).await?;

            debug!(
                "Derived fields for {:?}: location={location:?} audience={audience:?} topic={topic:?}",
                hit.tag.value.get("slug")
            );

            hit.tag
                .value
                .insert("topic".to_string(), Value::String(topic));
            hit.tag
                .value
                .insert("audience".to_string(), Value::String(audience));
            hit.tag
                .value
                .insert("location".to_string(), Value::String(location));

            // TODO: fill the explanation prompt with the derived location,
            // audience and topic above; all three placeholders currently
            // receive the raw logline.
            let explanation = self
                .generator
                .generate(&prompts::explanation(&story, &story, &story))
                .await?;
            hit.tag
                .value
                .insert("explanation".to_string(), Value::String(explanation));
        }

        Ok(hits)
    }
}
