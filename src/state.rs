use crate::aggregator::VideoTitleAggregator;
use crate::config::Config;
use crate::kaltura::{KalturaClient, MetadataSource};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub kaltura: KalturaClient,
    pub metadata: Arc<dyn MetadataSource>,
    pub aggregator: Arc<VideoTitleAggregator>,
}

impl AppState {
    pub fn new(config: Config, http: reqwest::Client) -> Self {
        let kaltura = KalturaClient::new(http, &config);
        Self::with_source(config, kaltura.clone(), Arc::new(kaltura))
    }

    pub fn with_source(
        config: Config,
        kaltura: KalturaClient,
        metadata: Arc<dyn MetadataSource>,
    ) -> Self {
        Self {
            aggregator: Arc::new(VideoTitleAggregator::new(metadata.clone())),
            config,
            kaltura,
            metadata,
        }
    }
}

#[cfg(test)]
impl AppState {
    pub fn test(source: Arc<dyn MetadataSource>) -> Self {
        let config = Config::default();
        let kaltura = KalturaClient::new(reqwest::Client::new(), &config);
        Self::with_source(config, kaltura, source)
    }
}
