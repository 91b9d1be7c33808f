//! Tipos MIME: mapeo por extensión para el contrato del motor y detección
//! por contenido para el detalle de archivo en consola.

use infer::Infer;
use std::path::Path;

/// Centinela para extensiones fuera del mapeo soportado.
pub const MIME_UNKNOWN: &str = "unknown";

/// Deriva el MIME de la extensión del archivo, sin tocar su contenido. El
/// mapeo es cerrado: jpg/jpeg, png y webp sin distinguir mayúsculas;
/// cualquier otra cosa cae al centinela.
pub fn mime_for_path(path: &Path) -> &'static str {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return MIME_UNKNOWN;
    };
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        _ => MIME_UNKNOWN,
    }
}

/// Intenta detectar el tipo MIME del archivo a partir de su contenido.
pub fn sniff_mime(path: &Path) -> Option<String> {
    let infer = Infer::new();
    infer
        .get_from_path(path)
        .ok()
        .flatten()
        .map(|kind| kind.mime_type().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_ignores_case() {
        assert_eq!(mime_for_path(Path::new("photo.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("captura.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("sticker.webp")), "image/webp");
    }

    #[test]
    fn unmapped_extensions_fall_back_to_sentinel() {
        assert_eq!(mime_for_path(Path::new("photo.tiff")), MIME_UNKNOWN);
        assert_eq!(mime_for_path(Path::new("documento.pdf")), MIME_UNKNOWN);
        assert_eq!(mime_for_path(Path::new("sin_extension")), MIME_UNKNOWN);
    }
}
