//! Búsqueda de imágenes soportadas dentro de un directorio.

use crate::mime;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

const SEARCH_MAX_DEPTH: usize = 15;

/// Recorre el directorio y devuelve las imágenes cuya extensión reconoce el
/// mapeo MIME, ordenadas y sin duplicados.
pub fn find_images(root: &Path) -> Vec<PathBuf> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["▹▹▹", "▸▹▹", "▹▸▹", "▹▹▸", "▹▹▹"])
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(
        style(format!("Buscando imágenes en {}...", root.display()))
            .dim()
            .to_string(),
    );

    let mut results: Vec<PathBuf> = WalkDir::new(root)
        .max_depth(SEARCH_MAX_DEPTH)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| mime::mime_for_path(path) != mime::MIME_UNKNOWN)
        .collect();

    spinner.finish_and_clear();

    results.sort();
    results.dedup();
    results
}
