//! Motor de ExifLens: extracción y normalización de metadata EXIF/TIFF/GPS.
//!
//! El motor consume una fuente de atributos ya decodificada y produce un
//! registro normalizado y tipado por llamada, en dos niveles: básico
//! (passthrough de texto) y avanzado (catálogo completo con campos
//! derivados). Nunca interpreta los bytes del contenedor por sí mismo.

pub mod catalog;
pub mod export;
pub mod extraction;
pub mod hashing;
pub mod mime;
pub mod renderer;
pub mod search;
pub mod source;
pub mod ui;

pub use extraction::{
    ExtractionMode, ExtractionRecord, ExtractionStatus, TagMap, TagValue, extract,
};
