use stackforge_core::ServiceType;

use crate::render::{RenderError, RenderRequest, RenderedService, ServiceRenderer};

/// Renders a service from its template set alone.
pub struct GenericRenderer {
    service_type: ServiceType,
}

impl GenericRenderer {
    pub fn new(service_type: ServiceType) -> Self {
        Self { service_type }
    }
}

impl ServiceRenderer for GenericRenderer {
    fn service_type(&self) -> ServiceType {
        self.service_type
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<RenderedService, RenderError> {
        request.base()
    }
}
