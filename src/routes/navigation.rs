use actix_web::{HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::navigation::NavigationQuery;
use crate::services::NavigationService;

static NAVIGATION_SERVICE: Lazy<NavigationService> = Lazy::new(NavigationService::new_lazy);

pub async fn get_sidebar(query: web::Query<NavigationQuery>) -> ActixResult<HttpResponse> {
    NAVIGATION_SERVICE.get_sidebar(query.into_inner()).await
}

pub fn configure_navigation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/navigation").route("", web::get().to(get_sidebar)));
}
