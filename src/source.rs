//! Fuente de atributos: la capa que entrega metadata ya decodificada.
//!
//! El motor de normalización consulta este contrato y nunca toca los bytes
//! del contenedor. La implementación concreta envuelve al parser de
//! `kamadak-exif`; una imagen que abre bien pero no trae bloque EXIF produce
//! una fuente vacía (todos los atributos ausentes), no un error.

use chrono::{NaiveDate, NaiveDateTime};
use exif::{In, Rational, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

use crate::catalog::tag;

/// Errores al abrir la fuente. El mensaje de `NotFound` es parte del
/// contrato con el llamador; los demás conservan el texto del error
/// subyacente tal cual.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("File does not exist")]
    NotFound,
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Capacidades que el motor exige del decodificador de metadata.
///
/// Sin efectos colaterales después del decode inicial: todas las consultas
/// son de solo lectura sobre el estado capturado al abrir.
pub trait AttributeSource {
    /// Valor crudo del tag canónico, normalizado a texto.
    fn attribute(&self, name: &str) -> Option<String>;

    fn has_attribute(&self, name: &str) -> bool;

    fn has_thumbnail(&self) -> bool;

    fn thumbnail_is_compressed(&self) -> bool;

    /// Rango `(offset, largo)` en bytes de la miniatura comprimida.
    fn thumbnail_byte_range(&self) -> Option<(u64, u64)>;

    /// Par decimal `(latitud, longitud)`, independiente de los tags
    /// racionales crudos. Solo existe si ambas coordenadas están presentes.
    fn lat_long(&self) -> Option<(f64, f64)>;

    fn timestamp_original(&self) -> Option<i64>;

    fn timestamp_digitized(&self) -> Option<i64>;

    fn gps_timestamp(&self) -> Option<i64>;

    /// Si el decodificador declara soporte para el tipo MIME dado.
    fn supports_mime(&self, mime: &str) -> bool;
}

/// Tipos MIME que el decodificador subyacente sabe abrir.
const DECODER_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/tiff",
    "image/heif",
];

/// Fuente respaldada por `kamadak-exif`.
pub struct ExifAttributeSource {
    exif: Option<exif::Exif>,
}

impl ExifAttributeSource {
    /// Abre y decodifica la imagen. El descriptor del archivo se libera al
    /// salir de esta función: la fuente solo retiene los campos parseados.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        if !path.exists() {
            return Err(SourceError::NotFound);
        }

        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        match Reader::new().read_from_container(&mut reader) {
            Ok(exif) => Ok(Self { exif: Some(exif) }),
            Err(exif::Error::NotFound(_)) => Ok(Self { exif: None }),
            Err(exif::Error::Io(error)) => Err(SourceError::Io(error)),
            Err(error) => Err(SourceError::Decode(error.to_string())),
        }
    }

    fn field(&self, tag: Tag, ifd: In) -> Option<&exif::Field> {
        self.exif.as_ref()?.get_field(tag, ifd)
    }

    fn signed_coordinate(&self, value_tag: Tag, ref_tag: Tag, negative: &str) -> Option<f64> {
        let degrees = match &self.field(value_tag, In::PRIMARY)?.value {
            Value::Rational(parts) => dms_to_decimal(parts)?,
            _ => return None,
        };
        let reference = self
            .field(ref_tag, In::PRIMARY)
            .and_then(|field| value_to_text(&field.value));
        match reference.as_deref() {
            Some(hemisphere) if hemisphere.eq_ignore_ascii_case(negative) => Some(-degrees),
            _ => Some(degrees),
        }
    }

    fn datetime_epoch_ms(&self, tag: Tag) -> Option<i64> {
        let raw = value_to_text(&self.field(tag, In::PRIMARY)?.value)?;
        parse_exif_datetime(&raw).map(|datetime| datetime.and_utc().timestamp_millis())
    }
}

impl AttributeSource for ExifAttributeSource {
    fn attribute(&self, name: &str) -> Option<String> {
        let field = self.field(resolve(name)?, In::PRIMARY)?;
        value_to_text(&field.value)
    }

    fn has_attribute(&self, name: &str) -> bool {
        resolve(name).is_some_and(|tag| self.field(tag, In::PRIMARY).is_some())
    }

    fn has_thumbnail(&self) -> bool {
        self.field(Tag::JPEGInterchangeFormat, In::THUMBNAIL).is_some()
            || self.field(Tag::StripOffsets, In::THUMBNAIL).is_some()
    }

    fn thumbnail_is_compressed(&self) -> bool {
        self.field(Tag::JPEGInterchangeFormat, In::THUMBNAIL).is_some()
    }

    fn thumbnail_byte_range(&self) -> Option<(u64, u64)> {
        let offset = uint_value(&self.field(Tag::JPEGInterchangeFormat, In::THUMBNAIL)?.value)?;
        let length = uint_value(&self.field(Tag::JPEGInterchangeFormatLength, In::THUMBNAIL)?.value)?;
        Some((offset, length))
    }

    fn lat_long(&self) -> Option<(f64, f64)> {
        let latitude = self.signed_coordinate(Tag::GPSLatitude, Tag::GPSLatitudeRef, "S")?;
        let longitude = self.signed_coordinate(Tag::GPSLongitude, Tag::GPSLongitudeRef, "W")?;
        Some((latitude, longitude))
    }

    fn timestamp_original(&self) -> Option<i64> {
        self.datetime_epoch_ms(Tag::DateTimeOriginal)
    }

    fn timestamp_digitized(&self) -> Option<i64> {
        self.datetime_epoch_ms(Tag::DateTimeDigitized)
    }

    fn gps_timestamp(&self) -> Option<i64> {
        let raw_date = value_to_text(&self.field(Tag::GPSDateStamp, In::PRIMARY)?.value)?;
        let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y:%m:%d").ok()?;
        let parts = match &self.field(Tag::GPSTimeStamp, In::PRIMARY)?.value {
            Value::Rational(parts) if parts.len() >= 3 => parts.clone(),
            _ => return None,
        };
        let datetime = date.and_hms_opt(
            parts[0].to_f64() as u32,
            parts[1].to_f64() as u32,
            parts[2].to_f64() as u32,
        )?;
        Some(datetime.and_utc().timestamp_millis())
    }

    fn supports_mime(&self, mime: &str) -> bool {
        DECODER_MIME_TYPES.contains(&mime)
    }
}

/// Mapa del nombre canónico al tag del decodificador.
fn resolve(name: &str) -> Option<Tag> {
    let tag = match name {
        tag::ORIENTATION => Tag::Orientation,
        tag::MAKE => Tag::Make,
        tag::MODEL => Tag::Model,
        tag::DEVICE_SETTING_DESCRIPTION => Tag::DeviceSettingDescription,
        tag::DATE_TIME => Tag::DateTime,
        tag::DATE_TIME_ORIGINAL => Tag::DateTimeOriginal,
        tag::DATE_TIME_DIGITIZED => Tag::DateTimeDigitized,
        tag::GPS_LATITUDE => Tag::GPSLatitude,
        tag::GPS_LATITUDE_REF => Tag::GPSLatitudeRef,
        tag::GPS_LONGITUDE => Tag::GPSLongitude,
        tag::GPS_LONGITUDE_REF => Tag::GPSLongitudeRef,
        tag::GPS_ALTITUDE => Tag::GPSAltitude,
        tag::GPS_ALTITUDE_REF => Tag::GPSAltitudeRef,
        tag::GPS_TIMESTAMP => Tag::GPSTimeStamp,
        tag::GPS_PROCESSING_METHOD => Tag::GPSProcessingMethod,
        tag::IMAGE_WIDTH => Tag::ImageWidth,
        tag::IMAGE_LENGTH => Tag::ImageLength,
        tag::EXPOSURE_TIME => Tag::ExposureTime,
        tag::F_NUMBER => Tag::FNumber,
        tag::EXPOSURE_PROGRAM => Tag::ExposureProgram,
        tag::SPECTRAL_SENSITIVITY => Tag::SpectralSensitivity,
        tag::ISO => Tag::PhotographicSensitivity,
        tag::OECF => Tag::OECF,
        tag::FLASH => Tag::Flash,
        tag::METERING_MODE => Tag::MeteringMode,
        tag::LIGHT_SOURCE => Tag::LightSource,
        tag::FOCAL_LENGTH => Tag::FocalLength,
        tag::SUBJECT_AREA => Tag::SubjectArea,
        tag::MAKER_NOTE => Tag::MakerNote,
        tag::USER_COMMENT => Tag::UserComment,
        tag::SOFTWARE => Tag::Software,
        tag::ARTIST => Tag::Artist,
        tag::COPYRIGHT => Tag::Copyright,
        _ => return None,
    };
    Some(tag)
}

/// Normaliza cualquier valor del decodificador a su forma de texto cruda:
/// ASCII tal cual, números unidos por coma, racionales como `num/denom`.
fn value_to_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Ascii(lines) => {
            String::from_utf8_lossy(lines.first()?).trim().to_string()
        }
        Value::Byte(items) => join_numbers(items),
        Value::Short(items) => join_numbers(items),
        Value::Long(items) => join_numbers(items),
        Value::SByte(items) => join_numbers(items),
        Value::SShort(items) => join_numbers(items),
        Value::SLong(items) => join_numbers(items),
        Value::Float(items) => join_numbers(items),
        Value::Double(items) => join_numbers(items),
        Value::Rational(items) => join_rationals(items.iter().map(|r| (i64::from(r.num), i64::from(r.denom)))),
        Value::SRational(items) => join_rationals(items.iter().map(|r| (i64::from(r.num), i64::from(r.denom)))),
        Value::Undefined(bytes, _) => undefined_text(bytes)?,
        _ => return None,
    };
    if text.is_empty() { None } else { Some(text) }
}

fn uint_value(value: &Value) -> Option<u64> {
    match value {
        Value::Short(items) => items.first().map(|&item| u64::from(item)),
        Value::Long(items) => items.first().map(|&item| u64::from(item)),
        _ => None,
    }
}

fn join_numbers<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn join_rationals(items: impl Iterator<Item = (i64, i64)>) -> String {
    items
        .map(|(num, denom)| format!("{num}/{denom}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Campos `Undefined` como UserComment anteponen un código de codificación
/// de ocho bytes; se descarta antes de interpretar el resto como texto.
fn undefined_text(bytes: &[u8]) -> Option<String> {
    let payload = bytes
        .strip_prefix(b"ASCII\0\0\0")
        .or_else(|| bytes.strip_prefix(b"UNICODE\0"))
        .unwrap_or(bytes);
    let text = String::from_utf8_lossy(payload);
    let text = text.trim_matches('\0').trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Grados/minutos/segundos racionales a grados decimales.
fn dms_to_decimal(parts: &[Rational]) -> Option<f64> {
    if parts.len() < 3 {
        return None;
    }
    Some(parts[0].to_f64() + parts[1].to_f64() / 60.0 + parts[2].to_f64() / 3600.0)
}

/// Formato EXIF `"YYYY:MM:DD HH:MM:SS"`, con el separador alternativo que
/// algunos editores escriben.
fn parse_exif_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim().trim_matches('"');
    NaiveDateTime::parse_from_str(raw, "%Y:%m:%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dms_conversion_matches_expected_degrees() {
        let parts = vec![
            Rational { num: 40, denom: 1 },
            Rational { num: 26, denom: 1 },
            Rational { num: 46, denom: 1 },
        ];
        let decimal = dms_to_decimal(&parts).expect("la conversión no debería fallar");
        assert!((decimal - 40.44611).abs() < 0.001, "obtenido {decimal}");
    }

    #[test]
    fn dms_conversion_rejects_short_input() {
        assert!(dms_to_decimal(&[]).is_none());
        let parts = vec![Rational { num: 40, denom: 1 }];
        assert!(dms_to_decimal(&parts).is_none());
    }

    #[test]
    fn datetime_parsing_accepts_exif_and_dashed_forms() {
        let epoch = parse_exif_datetime("2024:01:15 14:30:00")
            .map(|datetime| datetime.and_utc().timestamp_millis());
        assert_eq!(epoch, Some(1_705_329_000_000));

        assert!(parse_exif_datetime("2024-01-15 14:30:00").is_some());
        assert!(parse_exif_datetime("\"2024:01:15 14:30:00\"").is_some());
        assert!(parse_exif_datetime("sin fecha").is_none());
    }

    #[test]
    fn ascii_values_pass_through_trimmed() {
        let value = Value::Ascii(vec![b"  Acme ".to_vec()]);
        assert_eq!(value_to_text(&value), Some("Acme".to_string()));

        let empty = Value::Ascii(vec![b"".to_vec()]);
        assert_eq!(value_to_text(&empty), None);
    }

    #[test]
    fn numeric_values_join_with_commas() {
        assert_eq!(value_to_text(&Value::Short(vec![4000])), Some("4000".to_string()));
        assert_eq!(
            value_to_text(&Value::Short(vec![1, 2, 3])),
            Some("1,2,3".to_string())
        );
        let rationals = Value::Rational(vec![
            Rational { num: 40, denom: 1 },
            Rational { num: 26, denom: 1 },
            Rational { num: 46, denom: 1 },
        ]);
        assert_eq!(value_to_text(&rationals), Some("40/1,26/1,46/1".to_string()));
    }

    #[test]
    fn undefined_values_drop_encoding_prefix() {
        let mut bytes = b"ASCII\0\0\0".to_vec();
        bytes.extend_from_slice(b"nota de prueba\0");
        assert_eq!(
            undefined_text(&bytes),
            Some("nota de prueba".to_string())
        );
        assert_eq!(undefined_text(b"\0\0"), None);
    }

    #[test]
    fn canonical_names_resolve_to_decoder_tags() {
        assert_eq!(resolve(tag::ISO), Some(Tag::PhotographicSensitivity));
        assert_eq!(resolve(tag::GPS_TIMESTAMP), Some(Tag::GPSTimeStamp));
        assert_eq!(resolve(tag::MAKE), Some(Tag::Make));
        assert_eq!(resolve("NoExiste"), None);
    }
}
