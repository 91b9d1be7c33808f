//! Extracción avanzada: catálogo completo, coerciones y campos derivados.

use crate::catalog::{self, tag};
use crate::mime;
use crate::source::{AttributeSource, SourceError};
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use super::record::{ExtractionRecord, TagMap};

const NO_METADATA_WARNING: &str = "No EXIF data found in image";

/// Pasada completa del catálogo en orden de categoría. Los campos del
/// archivo y la bandera de MIME se almacenan siempre; todo lo demás solo si
/// la fuente lo reporta presente.
pub(crate) fn extract(
    source: &dyn AttributeSource,
    path: &Path,
) -> Result<ExtractionRecord, SourceError> {
    let warning = probe_warning(source);

    let mut fields = TagMap::new();
    collect_orientation(&mut fields, source);
    collect_passthrough(&mut fields, source, &catalog::CAMERA_TAGS);
    collect_passthrough(&mut fields, source, &catalog::DATETIME_TAGS);
    collect_gps(&mut fields, source);
    collect_passthrough(&mut fields, source, &catalog::DIMENSION_TAGS);
    collect_passthrough(&mut fields, source, &catalog::EXPOSURE_TAGS);
    collect_passthrough(&mut fields, source, &catalog::FLASH_LENS_TAGS);
    collect_passthrough(&mut fields, source, &catalog::AUTHORSHIP_TAGS);
    collect_thumbnail(&mut fields, source);
    collect_decimal_position(&mut fields, source);
    collect_epoch_timestamps(&mut fields, source);
    collect_file_details(&mut fields, path)?;
    collect_mime_support(&mut fields, source, path);

    Ok(ExtractionRecord::completed(fields, warning))
}

/// Una imagen sin ninguno de los tags de sondeo se considera sin metadata;
/// el aviso es informativo y la extracción continúa igual.
fn probe_warning(source: &dyn AttributeSource) -> Option<String> {
    let any_present = catalog::METADATA_PROBE_TAGS
        .iter()
        .any(|&name| source.has_attribute(name));
    (!any_present).then(|| NO_METADATA_WARNING.to_string())
}

fn collect_passthrough(fields: &mut TagMap, source: &dyn AttributeSource, names: &[&str]) {
    for &name in names {
        if let Some(raw) = source.attribute(name) {
            fields.insert(name, raw);
        }
    }
}

fn collect_orientation(fields: &mut TagMap, source: &dyn AttributeSource) {
    let Some(raw) = source.attribute(tag::ORIENTATION) else {
        return;
    };
    // Texto no numérico degrada a 0 en el derivado; el crudo se conserva.
    let coerced = raw.trim().parse::<i64>().unwrap_or(0);
    fields.insert(tag::ORIENTATION, raw);
    fields.insert(tag::ORIENTATION_VALUE, coerced);
}

fn collect_gps(fields: &mut TagMap, source: &dyn AttributeSource) {
    for coordinate in catalog::GPS_COORDINATES {
        // Sin coordenada no se almacena nada, aunque la referencia exista sola.
        let Some(value) = source.attribute(coordinate.value) else {
            continue;
        };
        let reference = source
            .attribute(coordinate.reference)
            .unwrap_or_else(|| coordinate.default_reference.to_string());
        fields.insert(coordinate.value, value);
        fields.insert(coordinate.reference, reference);
    }
    collect_passthrough(fields, source, &catalog::GPS_EXTRA_TAGS);
}

fn collect_thumbnail(fields: &mut TagMap, source: &dyn AttributeSource) {
    if !source.has_thumbnail() {
        fields.insert(tag::HAS_THUMBNAIL, false);
        return;
    }

    fields.insert(tag::HAS_THUMBNAIL, true);
    fields.insert(tag::THUMBNAIL_COMPRESSED, source.thumbnail_is_compressed());
    if let Some((offset, length)) = source.thumbnail_byte_range() {
        fields.insert(tag::THUMBNAIL_OFFSET, offset as i64);
        fields.insert(tag::THUMBNAIL_LENGTH, length as i64);
    }
}

/// Latitud y longitud decimales del accesor dedicado. Conviven con los tags
/// racionales crudos sin conciliarse entre sí.
fn collect_decimal_position(fields: &mut TagMap, source: &dyn AttributeSource) {
    if let Some((latitude, longitude)) = source.lat_long() {
        fields.insert(tag::LATITUDE, latitude);
        fields.insert(tag::LONGITUDE, longitude);
    }
}

fn collect_epoch_timestamps(fields: &mut TagMap, source: &dyn AttributeSource) {
    if let Some(epoch_ms) = source.timestamp_original() {
        fields.insert(tag::DATE_TIME_ORIGINAL_MS, epoch_ms);
    }
    if let Some(epoch_ms) = source.timestamp_digitized() {
        fields.insert(tag::DATE_TIME_DIGITIZED_MS, epoch_ms);
    }
    if let Some(epoch_ms) = source.gps_timestamp() {
        fields.insert(tag::GPS_DATE_TIME_MS, epoch_ms);
    }
}

/// Tamaño y última modificación provienen del sistema de archivos y se
/// almacenan exista o no metadata EXIF en la imagen.
fn collect_file_details(fields: &mut TagMap, path: &Path) -> Result<(), SourceError> {
    let metadata = fs::metadata(path)?;
    fields.insert(tag::FILE_SIZE, metadata.len() as i64);

    let modified_ms = metadata
        .modified()
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|duration| duration.as_millis() as i64)
        .unwrap_or(0);
    fields.insert(tag::FILE_LAST_MODIFIED, modified_ms);
    Ok(())
}

fn collect_mime_support(fields: &mut TagMap, source: &dyn AttributeSource, path: &Path) {
    let mime = mime::mime_for_path(path);
    fields.insert(tag::SUPPORTED_MIME_TYPE, source.supports_mime(mime));
}
