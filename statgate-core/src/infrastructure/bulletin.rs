// statgate-core/src/infrastructure/bulletin.rs

// Renders the human readable bulletin shipped with every release. The template
// name ends in `.html`, so minijinja escapes every interpolated value: approver
// and description are free text typed by a person.

use crate::application::ports::TemplateEngine;
use crate::error::StatgateError;
use crate::infrastructure::error::InfrastructureError;
use minijinja::Environment;

pub const BULLETIN_TEMPLATE_NAME: &str = "boletin.html";

const BULLETIN_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="utf-8">
  <title>Boletin estadistico - {{ version }}</title>
</head>
<body style="font-family: Arial, sans-serif;">
  <h2 style="color:#cc0000;">Boletin estadistico - Publicacion {{ version }}</h2>
  <p>Registros: <b>{{ records }}</b> | Calidad: <b>{{ quality }}%</b> | Aprobado por: <b>{{ approved_by }}</b></p>
  <p>Descripcion: {{ description }}</p>
  <hr>
  <p>Archivos:</p>
  <ul>
    <li>{{ data_file }}</li>
    <li>{{ metadata_file }}</li>
  </ul>
  <p style="font-size:12px;color:#666;">Este es un boletin de demostracion (prototipo). No corresponde a una publicacion oficial en produccion.</p>
</body>
</html>
"#;

pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    pub fn new() -> Result<Self, InfrastructureError> {
        let mut env = Environment::new();
        env.add_template(BULLETIN_TEMPLATE_NAME, BULLETIN_TEMPLATE)?;
        Ok(Self { env })
    }
}

impl TemplateEngine for JinjaRenderer {
    fn render(
        &self,
        template_name: &str,
        context: &serde_json::Value,
    ) -> Result<String, StatgateError> {
        let template = self
            .env
            .get_template(template_name)
            .map_err(InfrastructureError::TemplateError)?;
        template
            .render(context)
            .map_err(|e| StatgateError::Infrastructure(InfrastructureError::TemplateError(e)))
    }
}
