use serde::{Deserialize, Serialize};

/// Creation input. Fields are optional at the type level so that a missing
/// field is reported as a validation error rather than a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUsuario {
    #[serde(default)]
    pub id_expediente: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
}

impl NewUsuario {
    pub fn new(id_expediente: &str, nombre: &str, area: &str) -> Self {
        Self {
            id_expediente: Some(id_expediente.to_string()),
            nombre: Some(nombre.to_string()),
            area: Some(area.to_string()),
        }
    }
}

/// Partial update input; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsuarioPatch {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_decode_as_none() {
        let input: NewUsuario = serde_json::from_str(r#"{"nombre": "Ana"}"#).unwrap();
        assert_eq!(input.id_expediente, None);
        assert_eq!(input.nombre.as_deref(), Some("Ana"));
        assert_eq!(input.area, None);

        let patch: UsuarioPatch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch, UsuarioPatch::default());
    }
}
