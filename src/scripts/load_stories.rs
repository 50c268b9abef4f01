use crate::{
    config::Config,
    error::{ApiError, Result},
    models::{InsertRequest, StoryRecord, Tag, TagItems},
    services::PackageClient,
};
use csv::ReaderBuilder;
use indicatif::ProgressBar;
use log::{error, info, warn};
use serde::Deserialize;
use std::{fs::File, path::Path};

pub const INSERT_BATCH_SIZE: usize = 10;

#[derive(Debug, Deserialize)]
struct StoryCsvRecord {
    #[serde(rename = "Short Story Title")]
    title: Option<String>,
    #[serde(rename = "Logline (Short Summary)")]
    logline: Option<String>,
    #[serde(rename = "Author")]
    author: Option<String>,
}

/// Validate and clean one CSV row.
///
/// Rows without a title or logline are dropped. A row that does name a
/// story but carries no author is an error rather than a degraded slug.
fn validate_story_record(record: StoryCsvRecord) -> Result<Option<StoryRecord>> {
    let title = record
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    let logline = record
        .logline
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());

    let (Some(title), Some(logline)) = (title, logline) else {
        return Ok(None);
    };

    let author = record
        .author
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ApiError::Ingest(format!("story {title:?} has no author")))?;

    Ok(Some(StoryRecord {
        author,
        title,
        logline,
    }))
}

pub fn read_stories(csv_path: &Path) -> Result<Vec<StoryRecord>> {
    let file = File::open(csv_path)?;
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut stories = Vec::new();
    let mut record_count = 0;
    let mut skipped_count = 0;

    for result in rdr.deserialize() {
        record_count += 1;

        let record: StoryCsvRecord = match result {
            Ok(record) => record,
            Err(e) => {
                error!("Error parsing record {record_count}: {e}");
                skipped_count += 1;
                continue;
            }
        };

        match validate_story_record(record)? {
            Some(story) => stories.push(story),
            None => skipped_count += 1,
        }
    }

    info!(
        "CSV parsing complete: {} records, {} valid, {} skipped",
        record_count,
        stories.len(),
        skipped_count
    );

    Ok(stories)
}

/// Read the configured CSV and submit every valid story to the deployed
/// service's insert operation, in fixed-size batches.
///
/// Any failed batch aborts the run with the error; there is no retry and
/// no resumption checkpoint.
pub async fn load_stories(config: &Config) -> Result<()> {
    info!("Loading stories from {}", config.story_data.display());

    let stories = read_stories(&config.story_data)?;
    if stories.is_empty() {
        warn!("No valid stories found in {}", config.story_data.display());
        return Ok(());
    }

    let tags: Vec<Tag> = stories.into_iter().map(StoryRecord::into_tag).collect();
    let client = PackageClient::new(config)?;

    let total_batches = (tags.len() + INSERT_BATCH_SIZE - 1) / INSERT_BATCH_SIZE;
    info!(
        "Submitting {} tags in {} batches of {}",
        tags.len(),
        total_batches,
        INSERT_BATCH_SIZE
    );

    let progress = ProgressBar::new(total_batches as u64);
    for batch in tags.chunks(INSERT_BATCH_SIZE) {
        let request = InsertRequest {
            items: TagItems::Many(batch.to_vec()),
        };
        let _: bool = client.invoke("insert", &request).await?;
        progress.inc(1);
    }
    progress.finish();

    info!("Submitted {total_batches} batches");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Short Story Title,Logline (Short Summary),Author,Genre\n";

    fn csv_file(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        for row in rows {
            file.write_all(row.as_bytes()).unwrap();
            file.write_all(b"\n").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn rows_missing_title_or_logline_are_dropped() {
        let file = csv_file(&[
            "The Long Walk,A woman walks until the road runs out.,Jane Q. Doe,Drama",
            ",An orphaned logline.,Jane Q. Doe,Drama",
            "A Title Without A Logline,,Jane Q. Doe,Drama",
        ]);

        let stories = read_stories(file.path()).unwrap();

        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].title, "The Long Walk");
        assert_eq!(stories[0].slug(), "jane-q--doe--the-long-walk");
    }

    #[test]
    fn missing_author_fails_the_load() {
        let file = csv_file(&["The Long Walk,A woman walks until the road runs out.,,Drama"]);

        let result = read_stories(file.path());
        assert!(matches!(result, Err(ApiError::Ingest(_))));
    }

    #[test]
    fn batching_preserves_order_and_count() {
        let tags: Vec<Tag> = (0..23)
            .map(|i| {
                StoryRecord {
                    author: format!("Author {i}"),
                    title: format!("Title {i}"),
                    logline: format!("Logline number {i}."),
                }
                .into_tag()
            })
            .collect();

        let batches: Vec<&[Tag]> = tags.chunks(INSERT_BATCH_SIZE).collect();

        assert_eq!(
            batches.len(),
            (tags.len() + INSERT_BATCH_SIZE - 1) / INSERT_BATCH_SIZE
        );
        assert!(batches.iter().all(|batch| batch.len() <= INSERT_BATCH_SIZE));

        let rejoined: Vec<Tag> = batches.concat();
        assert_eq!(rejoined, tags);
    }

    #[tokio::test]
    async fn load_submits_one_invocation_per_batch() {
        let mut server = mockito::Server::new_async().await;
        let insert_mock = server
            .mock("POST", "/insert")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("true")
            .expect(2)
            .create_async()
            .await;

        let rows: Vec<String> = (0..12)
            .map(|i| format!("Title {i},Logline {i}.,Author {i},Drama"))
            .collect();
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let file = csv_file(&rows);

        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 3000,
            steamship_api_key: "test-key".to_string(),
            steamship_base_url: "http://unused.invalid".to_string(),
            workspace_handle: "test-workspace".to_string(),
            instance_handle: "test-instance".to_string(),
            version_handle: "1.0.0".to_string(),
            index_handle: "story-embedding-index".to_string(),
            generator_handle: "gpt-4".to_string(),
            package_base_url: server.url(),
            story_data: file.path().to_path_buf(),
        };

        load_stories(&config).await.unwrap();
        insert_mock.assert_async().await;
    }
}
