use std::sync::Arc;

use portfolio_templates_contracts::{Template, TemplateService, TEMPLATES};
use tera::Tera;

#[derive(Debug, Clone, Default)]
pub struct TemplateServiceImpl {
    state: State,
}

impl TemplateServiceImpl {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl Default for State {
    fn default() -> Self {
        let mut tera = Tera::default();

        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template).unwrap();
        }

        Self(tera.into())
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.state.0.render(T::NAME, &context).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use portfolio_templates_contracts::ContactMessageTemplate;

    use super::*;

    #[test]
    fn contact_message() {
        // Arrange
        let sut = TemplateServiceImpl::new();

        // Act
        let result = sut.render(&ContactMessageTemplate {
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            message: "Hello, I would like to connect.".into(),
        });

        // Assert
        let html = result.unwrap();
        assert!(html.contains("Jane Doe"));
        assert!(html.contains("jane@example.com"));
        assert!(html.contains("Hello, I would like to connect."));
    }
}
