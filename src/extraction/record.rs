//! Modelos del registro normalizado que produce una extracción.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Valor tipado de un tag canónico.
///
/// El passthrough crudo se conserva como `Text`; los campos derivados llevan
/// su tipo concreto (enteros de época, coordenadas decimales, banderas). En
/// JSON cada variante se serializa como el escalar plano equivalente.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl TagValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            TagValue::Text(_) => "Texto",
            TagValue::Integer(_) => "Entero",
            TagValue::Float(_) => "Decimal",
            TagValue::Boolean(_) => "Booleano",
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Text(value) => f.write_str(value),
            TagValue::Integer(value) => write!(f, "{value}"),
            TagValue::Float(value) => write!(f, "{value}"),
            TagValue::Boolean(value) => write!(f, "{value}"),
        }
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        TagValue::Text(value)
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::Text(value.to_string())
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        TagValue::Integer(value)
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        TagValue::Float(value)
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        TagValue::Boolean(value)
    }
}

/// Mapa de tags canónicos que preserva el orden de inserción.
///
/// Los nombres son únicos: insertar un nombre existente reemplaza el valor
/// sin mover su posición. Se serializa como objeto JSON en el mismo orden en
/// que el catálogo pobló las entradas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagMap {
    entries: Vec<(String, TagValue)>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<TagValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl Serialize for TagMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TagMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TagMapVisitor;

        impl<'de> Visitor<'de> for TagMapVisitor {
            type Value = TagMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("un objeto de tags canónicos")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TagMap, A::Error> {
                let mut map = TagMap::new();
                while let Some((name, value)) = access.next_entry::<String, TagValue>()? {
                    map.insert(name, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(TagMapVisitor)
    }
}

/// Desenlace de una llamada de extracción.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    Success,
    FileNotFound,
    DecodeError,
    Failure,
}

impl ExtractionStatus {
    /// Etiqueta legible para consola y reportes exportados.
    pub fn label(self) -> &'static str {
        match self {
            ExtractionStatus::Success => "Éxito",
            ExtractionStatus::FileNotFound => "Archivo inexistente",
            ExtractionStatus::DecodeError => "Error de decodificación",
            ExtractionStatus::Failure => "Falla",
        }
    }
}

/// Registro normalizado que recibe el llamador.
///
/// Se construye completo en una sola llamada, no retiene referencias a la
/// fuente de atributos y los opcionales ausentes se omiten del JSON en lugar
/// de serializarse como null.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractionRecord {
    pub success: bool,
    pub status: ExtractionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(rename = "allTags")]
    pub fields: TagMap,
    #[serde(rename = "totalTags")]
    pub tag_count: usize,
}

impl ExtractionRecord {
    /// Registro exitoso; `tag_count` queda fijado al tamaño final del mapa.
    pub fn completed(fields: TagMap, warning: Option<String>) -> Self {
        let tag_count = fields.len();
        Self {
            success: true,
            status: ExtractionStatus::Success,
            error: None,
            warning,
            fields,
            tag_count,
        }
    }

    /// Registro terminal de falla: nunca lleva campos parciales.
    pub fn failure(status: ExtractionStatus, message: impl Into<String>) -> Self {
        Self {
            success: false,
            status,
            error: Some(message.into()),
            warning: None,
            fields: TagMap::new(),
            tag_count: 0,
        }
    }
}
