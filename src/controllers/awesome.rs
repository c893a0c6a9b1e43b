use axum::{extract::State, http::StatusCode};
use std::sync::Arc;

use crate::domain::awesome::{scheduler, AwesomeService};

pub struct AwesomeController {
    awesome_service: Option<Arc<AwesomeService>>,
}

impl AwesomeController {
    /// `None` when no organization token is configured
    pub fn new(awesome_service: Option<Arc<AwesomeService>>) -> Self {
        Self { awesome_service }
    }

    /// GET /awesome-solo - Refresh the showcase README now
    pub async fn refresh(State(controller): State<Arc<AwesomeController>>) -> StatusCode {
        match &controller.awesome_service {
            Some(service) => {
                scheduler::run_once(service).await;
            }
            None => tracing::warn!("Awesome list refresh requested but no organization token is configured"),
        }
        StatusCode::OK
    }
}
