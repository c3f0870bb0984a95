use crate::duration::format_duration;
use crate::kaltura::{KalturaError, MetadataSource};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Ordering key supplied by the caller, either numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaKey {
    Number(i64),
    Text(String),
}

impl Default for MediaKey {
    fn default() -> Self {
        MediaKey::Number(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaReference {
    #[serde(alias = "src")]
    pub id: String,
    pub key: MediaKey,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub title: String,
    pub duration: String,
    pub key: MediaKey,
}

pub type DisplayRecords = Arc<Vec<DisplayRecord>>;

#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Published(DisplayRecords),
    /// The type tag does not describe video content.
    Skipped,
    /// A newer cycle was issued before this one finished.
    Superseded,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Aggregation failed on {media_id}: {source}")]
pub struct AggregationFailure {
    pub media_id: String,
    pub source: KalturaError,
}

/// Case-sensitive substring match; `"video"` itself and tags such as
/// `"video-playlist"` both qualify.
pub fn is_video_type(type_tag: &str) -> bool {
    type_tag.contains("video")
}

/// Turns `(type, references)` requests into a published list of display
/// records. Only the most recently started cycle may publish.
pub struct VideoTitleAggregator {
    source: Arc<dyn MetadataSource>,
    generation: AtomicU64,
    state: watch::Sender<DisplayRecords>,
}

impl VideoTitleAggregator {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        let (state, _) = watch::channel(Arc::new(vec![DisplayRecord::default()]));
        Self {
            source,
            generation: AtomicU64::new(0),
            state,
        }
    }

    pub fn current(&self) -> DisplayRecords {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayRecords> {
        self.state.subscribe()
    }

    pub async fn run_cycle(
        &self,
        type_tag: &str,
        references: &[MediaReference],
    ) -> Result<CycleOutcome, AggregationFailure> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if !is_video_type(type_tag) {
            tracing::debug!("[aggregator] Cycle {} skipped for type {:?}", generation, type_tag);
            return Ok(CycleOutcome::Skipped);
        }

        tracing::info!(
            "[aggregator] Cycle {} fetching {} videos",
            generation,
            references.len()
        );

        let fetches = references.iter().map(|reference| async move {
            let metadata = self
                .source
                .fetch_metadata(&reference.id)
                .await
                .map_err(|source| AggregationFailure {
                    media_id: reference.id.clone(),
                    source,
                })?;
            Ok::<_, AggregationFailure>(DisplayRecord {
                title: metadata.name,
                duration: format_duration(metadata.duration_ms, true),
                key: reference.key.clone(),
            })
        });

        let records = match try_join_all(fetches).await {
            Ok(records) => Arc::new(records),
            Err(e) => {
                if self.generation.load(Ordering::SeqCst) != generation {
                    tracing::info!(
                        "[aggregator] Cycle {} superseded, failure dropped: {}",
                        generation,
                        e
                    );
                    return Ok(CycleOutcome::Superseded);
                }
                tracing::error!("[aggregator] Cycle {} failed: {}", generation, e);
                return Err(e);
            }
        };

        // The generation check happens under the channel's write lock so a
        // newer cycle can never be overwritten by an older one.
        let published = self.state.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *current = records.clone();
            true
        });

        if published {
            tracing::info!("[aggregator] Cycle {} published {} records", generation, records.len());
            Ok(CycleOutcome::Published(records))
        } else {
            tracing::info!("[aggregator] Cycle {} superseded, result dropped", generation);
            Ok(CycleOutcome::Superseded)
        }
    }
}
