//! Business logic services

pub mod visitors;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub visitors: visitors::VisitorsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            visitors: visitors::VisitorsService::new(repository),
        }
    }
}
