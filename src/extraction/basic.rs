//! Extracción básica: passthrough de texto del subconjunto del catálogo.

use crate::catalog;
use crate::source::AttributeSource;

use super::record::{ExtractionRecord, TagMap, TagValue};

/// Recorre el subconjunto básico e inserta cada atributo presente tal cual
/// lo entrega la fuente. Sin coerción, sin derivados, sin miniatura y sin
/// datos del archivo: este nivel es deliberadamente barato.
pub(crate) fn extract(source: &dyn AttributeSource) -> ExtractionRecord {
    let mut fields = TagMap::new();
    for name in catalog::BASIC_TAGS {
        if let Some(raw) = source.attribute(name) {
            fields.insert(name, TagValue::Text(raw));
        }
    }
    ExtractionRecord::completed(fields, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tag;
    use crate::extraction::fixtures::FakeSource;
    use crate::extraction::record::ExtractionStatus;

    #[test]
    fn present_attributes_pass_through_unchanged() {
        let source = FakeSource::new()
            .with_attribute(tag::MAKE, "Acme")
            .with_attribute(tag::EXPOSURE_TIME, "1/250")
            .with_attribute(tag::GPS_LATITUDE, "40/1,26/1,46/1");

        let record = extract(&source);

        assert!(record.success);
        assert_eq!(record.status, ExtractionStatus::Success);
        assert_eq!(record.fields.get(tag::MAKE), Some(&TagValue::Text("Acme".into())));
        assert_eq!(
            record.fields.get(tag::EXPOSURE_TIME),
            Some(&TagValue::Text("1/250".into()))
        );
        assert_eq!(
            record.fields.get(tag::GPS_LATITUDE),
            Some(&TagValue::Text("40/1,26/1,46/1".into()))
        );
    }

    #[test]
    fn absent_attributes_stay_omitted() {
        let source = FakeSource::new().with_attribute(tag::MODEL, "X100");

        let record = extract(&source);

        assert_eq!(record.tag_count, 1);
        assert!(!record.fields.contains(tag::MAKE));
        assert!(!record.fields.contains(tag::ORIENTATION));
    }

    #[test]
    fn basic_tier_never_adds_derived_fields() {
        let source = FakeSource::new()
            .with_attribute(tag::ORIENTATION, "6")
            .with_thumbnail(true, Some((100, 400)))
            .with_lat_long(40.5, -3.7);

        let record = extract(&source);

        assert!(!record.fields.contains(tag::ORIENTATION_VALUE));
        assert!(!record.fields.contains(tag::HAS_THUMBNAIL));
        assert!(!record.fields.contains(tag::LATITUDE));
        assert!(!record.fields.contains(tag::FILE_SIZE));
        assert!(!record.fields.contains(tag::SUPPORTED_MIME_TYPE));
    }

    #[test]
    fn tag_count_matches_stored_fields() {
        let source = FakeSource::new()
            .with_attribute(tag::MAKE, "Acme")
            .with_attribute(tag::MODEL, "X100")
            .with_attribute(tag::SOFTWARE, "Editor 2.0");

        let record = extract(&source);

        assert_eq!(record.tag_count, 3);
        assert_eq!(record.tag_count, record.fields.len());
    }

    #[test]
    fn fields_follow_catalog_order() {
        let source = FakeSource::new()
            .with_attribute(tag::COPYRIGHT, "© Acme")
            .with_attribute(tag::ORIENTATION, "1")
            .with_attribute(tag::IMAGE_WIDTH, "4000");

        let record = extract(&source);

        let names: Vec<&str> = record.fields.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec![tag::ORIENTATION, tag::IMAGE_WIDTH, tag::COPYRIGHT]);
    }
}
