use std::sync::Arc;

use dn_pipeline::NewsPipeline;

pub struct AppState {
    pub pipeline: Arc<NewsPipeline>,
}
