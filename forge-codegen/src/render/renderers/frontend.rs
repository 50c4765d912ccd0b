use stackforge_core::ServiceType;

use crate::{
    generation::FileEntry,
    render::{RenderError, RenderRequest, RenderedService, ServiceRenderer},
};

const API_URL: &str = "REACT_APP_API_URL";

/// Renders frontend applications.
///
/// When the frontend depends on an API service, its address is written to
/// `.env` as `REACT_APP_API_URL`.
pub struct FrontendRenderer;

impl ServiceRenderer for FrontendRenderer {
    fn service_type(&self) -> ServiceType {
        ServiceType::FrontendFramework
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<RenderedService, RenderError> {
        let mut rendered = request.base()?;
        rendered
            .environment
            .insert("PORT".to_string(), request.port().to_string());

        if let Some(api) = request.dependency(ServiceType::is_api) {
            let url = format!("http://{}", request.endpoint(api));
            rendered
                .files
                .register(FileEntry::config(".env", format!("{API_URL}={url}\n")));
            rendered.environment.insert(API_URL.to_string(), url);
        }

        Ok(rendered)
    }
}
