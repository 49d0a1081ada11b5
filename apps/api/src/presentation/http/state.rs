use crate::{application::pipeline::Pipeline, config::Config};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub config: Config,
}

impl AppState {
    pub fn new(pipeline: Pipeline, config: Config) -> Self {
        Self { pipeline, config }
    }
}
