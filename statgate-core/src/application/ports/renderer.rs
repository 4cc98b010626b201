use crate::error::StatgateError;

pub trait TemplateEngine {
    fn render(
        &self,
        template_name: &str,
        context: &serde_json::Value,
    ) -> Result<String, StatgateError>;
}
