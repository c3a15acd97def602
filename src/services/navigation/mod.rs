pub mod sidebar;

use actix_web::{HttpResponse, Result as ActixResult};

use crate::models::navigation::NavigationQuery;

pub struct NavigationService;

impl NavigationService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub async fn get_sidebar(&self, query: NavigationQuery) -> ActixResult<HttpResponse> {
        sidebar::get_sidebar(query).await
    }
}
