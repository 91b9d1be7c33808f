//! Catálogo cerrado de tags canónicos que reconoce el motor.
//!
//! Las tablas son estáticas y ordenadas: la extracción avanzada recorre las
//! categorías en el orden en que aparecen aquí, y ese orden es el que
//! conserva el registro resultante.

/// Nombres canónicos, independientes de la plataforma decodificadora.
pub mod tag {
    pub const ORIENTATION: &str = "Orientation";
    pub const ORIENTATION_VALUE: &str = "OrientationValue";

    pub const MAKE: &str = "Make";
    pub const MODEL: &str = "Model";
    pub const DEVICE_SETTING_DESCRIPTION: &str = "DeviceSettingDescription";

    pub const DATE_TIME: &str = "DateTime";
    pub const DATE_TIME_ORIGINAL: &str = "DateTimeOriginal";
    pub const DATE_TIME_DIGITIZED: &str = "DateTimeDigitized";

    pub const GPS_LATITUDE: &str = "GPSLatitude";
    pub const GPS_LATITUDE_REF: &str = "GPSLatitudeRef";
    pub const GPS_LONGITUDE: &str = "GPSLongitude";
    pub const GPS_LONGITUDE_REF: &str = "GPSLongitudeRef";
    pub const GPS_ALTITUDE: &str = "GPSAltitude";
    pub const GPS_ALTITUDE_REF: &str = "GPSAltitudeRef";
    pub const GPS_TIMESTAMP: &str = "GPSTimestamp";
    pub const GPS_PROCESSING_METHOD: &str = "GPSProcessingMethod";

    pub const IMAGE_WIDTH: &str = "ImageWidth";
    pub const IMAGE_LENGTH: &str = "ImageLength";

    pub const EXPOSURE_TIME: &str = "ExposureTime";
    pub const F_NUMBER: &str = "FNumber";
    pub const EXPOSURE_PROGRAM: &str = "ExposureProgram";
    pub const SPECTRAL_SENSITIVITY: &str = "SpectralSensitivity";
    pub const ISO: &str = "ISO";
    pub const OECF: &str = "OECF";

    pub const FLASH: &str = "Flash";
    pub const METERING_MODE: &str = "MeteringMode";
    pub const LIGHT_SOURCE: &str = "LightSource";
    pub const FOCAL_LENGTH: &str = "FocalLength";
    pub const SUBJECT_AREA: &str = "SubjectArea";
    pub const MAKER_NOTE: &str = "MakerNote";
    pub const USER_COMMENT: &str = "UserComment";

    pub const SOFTWARE: &str = "Software";
    pub const ARTIST: &str = "Artist";
    pub const COPYRIGHT: &str = "Copyright";

    pub const HAS_THUMBNAIL: &str = "HasThumbnail";
    pub const THUMBNAIL_COMPRESSED: &str = "ThumbnailCompressed";
    pub const THUMBNAIL_OFFSET: &str = "ThumbnailOffset";
    pub const THUMBNAIL_LENGTH: &str = "ThumbnailLength";

    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";

    pub const DATE_TIME_ORIGINAL_MS: &str = "DateTimeOriginalMs";
    pub const DATE_TIME_DIGITIZED_MS: &str = "DateTimeDigitizedMs";
    pub const GPS_DATE_TIME_MS: &str = "GPSDateTimeMs";

    pub const FILE_SIZE: &str = "FileSize";
    pub const FILE_LAST_MODIFIED: &str = "FileLastModified";

    pub const SUPPORTED_MIME_TYPE: &str = "SupportedMimeType";
}

use tag::*;

/// Subconjunto de la extracción básica: passthrough de texto, sin coerción.
pub const BASIC_TAGS: [&str; 16] = [
    ORIENTATION,
    MAKE,
    MODEL,
    DATE_TIME,
    DATE_TIME_ORIGINAL,
    GPS_LATITUDE,
    GPS_LONGITUDE,
    IMAGE_WIDTH,
    IMAGE_LENGTH,
    EXPOSURE_TIME,
    F_NUMBER,
    ISO,
    FOCAL_LENGTH,
    SOFTWARE,
    ARTIST,
    COPYRIGHT,
];

/// Si ninguno de estos tres está presente, la imagen se considera sin
/// metadata EXIF y la extracción avanzada adjunta un aviso no fatal.
pub const METADATA_PROBE_TAGS: [&str; 3] = [ORIENTATION, MAKE, MODEL];

pub const CAMERA_TAGS: [&str; 3] = [MAKE, MODEL, DEVICE_SETTING_DESCRIPTION];

pub const DATETIME_TAGS: [&str; 3] = [DATE_TIME, DATE_TIME_ORIGINAL, DATE_TIME_DIGITIZED];

/// Tags GPS escalares que siguen a las coordenadas dentro de la categoría.
pub const GPS_EXTRA_TAGS: [&str; 2] = [GPS_TIMESTAMP, GPS_PROCESSING_METHOD];

pub const DIMENSION_TAGS: [&str; 2] = [IMAGE_WIDTH, IMAGE_LENGTH];

pub const EXPOSURE_TAGS: [&str; 6] = [
    EXPOSURE_TIME,
    F_NUMBER,
    EXPOSURE_PROGRAM,
    SPECTRAL_SENSITIVITY,
    ISO,
    OECF,
];

pub const FLASH_LENS_TAGS: [&str; 7] = [
    FLASH,
    METERING_MODE,
    LIGHT_SOURCE,
    FOCAL_LENGTH,
    SUBJECT_AREA,
    MAKER_NOTE,
    USER_COMMENT,
];

pub const AUTHORSHIP_TAGS: [&str; 3] = [SOFTWARE, ARTIST, COPYRIGHT];

/// Coordenada GPS con su tag de referencia y el valor por defecto que se
/// sustituye cuando la coordenada existe pero la referencia no.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateSpec {
    pub value: &'static str,
    pub reference: &'static str,
    pub default_reference: &'static str,
}

pub const GPS_COORDINATES: [CoordinateSpec; 3] = [
    CoordinateSpec {
        value: GPS_LATITUDE,
        reference: GPS_LATITUDE_REF,
        default_reference: "N",
    },
    CoordinateSpec {
        value: GPS_LONGITUDE,
        reference: GPS_LONGITUDE_REF,
        default_reference: "E",
    },
    CoordinateSpec {
        value: GPS_ALTITUDE,
        reference: GPS_ALTITUDE_REF,
        default_reference: "0",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_subset_has_no_duplicates() {
        for (index, name) in BASIC_TAGS.iter().enumerate() {
            assert!(
                !BASIC_TAGS[index + 1..].contains(name),
                "tag duplicado en el subconjunto básico: {name}"
            );
        }
    }

    #[test]
    fn probe_tags_belong_to_basic_subset() {
        for name in METADATA_PROBE_TAGS {
            assert!(BASIC_TAGS.contains(&name));
        }
    }

    #[test]
    fn coordinate_defaults_match_hemisphere_convention() {
        assert_eq!(GPS_COORDINATES[0].default_reference, "N");
        assert_eq!(GPS_COORDINATES[1].default_reference, "E");
        assert_eq!(GPS_COORDINATES[2].default_reference, "0");
    }
}
