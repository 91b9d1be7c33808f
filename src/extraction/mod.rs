//! Motor de normalización: recorre el catálogo contra la fuente de
//! atributos y arma el registro final.
//!
//! Cada llamada es síncrona e independiente: se abre la fuente, se hace una
//! pasada lineal por el catálogo y se entrega el registro. No hay estado
//! compartido entre llamadas, así que extracciones concurrentes sobre rutas
//! iguales o distintas son seguras.

mod advanced;
mod basic;
pub mod record;

pub use record::{ExtractionRecord, ExtractionStatus, TagMap, TagValue};

use crate::source::{ExifAttributeSource, SourceError};
use std::path::Path;

/// Nivel de extracción solicitado por el llamador.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExtractionMode {
    /// Subconjunto del catálogo, passthrough de texto solamente.
    Basic,
    /// Catálogo completo con coerciones, derivados y datos del archivo.
    Advanced,
}

/// Punto de entrada del motor: función pura de `(ruta, modo)`.
///
/// Todo error queda capturado aquí y convertido en un registro terminal; la
/// llamada nunca propaga errores al llamador ni devuelve campos parciales
/// tras una falla dura.
pub fn extract(path: &Path, mode: ExtractionMode) -> ExtractionRecord {
    let source = match ExifAttributeSource::open(path) {
        Ok(source) => source,
        Err(SourceError::NotFound) => {
            return ExtractionRecord::failure(
                ExtractionStatus::FileNotFound,
                SourceError::NotFound.to_string(),
            );
        }
        Err(error @ SourceError::Decode(_)) => {
            return ExtractionRecord::failure(ExtractionStatus::DecodeError, error.to_string());
        }
        Err(error) => {
            return ExtractionRecord::failure(ExtractionStatus::Failure, error.to_string());
        }
    };

    let outcome = match mode {
        ExtractionMode::Basic => Ok(basic::extract(&source)),
        ExtractionMode::Advanced => advanced::extract(&source, path),
    };
    outcome.unwrap_or_else(|error| {
        ExtractionRecord::failure(ExtractionStatus::Failure, error.to_string())
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::source::AttributeSource;
    use std::collections::HashMap;

    /// Miniatura simulada para los casos de prueba.
    pub struct FakeThumbnail {
        pub compressed: bool,
        pub range: Option<(u64, u64)>,
    }

    /// Fuente sintética: permite probar el motor sin decodificar archivos.
    #[derive(Default)]
    pub struct FakeSource {
        attributes: HashMap<String, String>,
        pub thumbnail: Option<FakeThumbnail>,
        pub lat_long: Option<(f64, f64)>,
        pub timestamp_original: Option<i64>,
        pub timestamp_digitized: Option<i64>,
        pub gps_timestamp: Option<i64>,
        pub supported_mimes: Vec<&'static str>,
    }

    impl FakeSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
            self.attributes.insert(name.to_string(), value.to_string());
            self
        }

        pub fn with_thumbnail(mut self, compressed: bool, range: Option<(u64, u64)>) -> Self {
            self.thumbnail = Some(FakeThumbnail { compressed, range });
            self
        }

        pub fn with_lat_long(mut self, latitude: f64, longitude: f64) -> Self {
            self.lat_long = Some((latitude, longitude));
            self
        }

        pub fn with_supported_mimes(mut self, mimes: &[&'static str]) -> Self {
            self.supported_mimes = mimes.to_vec();
            self
        }
    }

    impl AttributeSource for FakeSource {
        fn attribute(&self, name: &str) -> Option<String> {
            self.attributes.get(name).cloned()
        }

        fn has_attribute(&self, name: &str) -> bool {
            self.attributes.contains_key(name)
        }

        fn has_thumbnail(&self) -> bool {
            self.thumbnail.is_some()
        }

        fn thumbnail_is_compressed(&self) -> bool {
            self.thumbnail
                .as_ref()
                .is_some_and(|thumbnail| thumbnail.compressed)
        }

        fn thumbnail_byte_range(&self) -> Option<(u64, u64)> {
            self.thumbnail.as_ref().and_then(|thumbnail| thumbnail.range)
        }

        fn lat_long(&self) -> Option<(f64, f64)> {
            self.lat_long
        }

        fn timestamp_original(&self) -> Option<i64> {
            self.timestamp_original
        }

        fn timestamp_digitized(&self) -> Option<i64> {
            self.timestamp_digitized
        }

        fn gps_timestamp(&self) -> Option<i64> {
            self.gps_timestamp
        }

        fn supports_mime(&self, mime: &str) -> bool {
            self.supported_mimes.contains(&mime)
        }
    }
}
