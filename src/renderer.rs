//! Presenta en consola un registro de extracción junto al detalle del
//! archivo consultado.

use crate::catalog::tag;
use crate::extraction::ExtractionRecord;
use crate::hashing::file_digest;
use crate::mime::sniff_mime;
use crate::ui::{base_table, header_cell};
use chrono::{DateTime, Local};
use comfy_table::{Cell, Color, Row};
use console::style;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

pub fn render_record(path: &Path, record: &ExtractionRecord) {
    println!();

    if !record.success {
        let message = record.error.as_deref().unwrap_or("Error desconocido");
        println!(
            "{} {}",
            style("✗").red().bold(),
            style(format!("{}: {message}", record.status.label())).red()
        );
        println!();
        return;
    }

    render_file_details(path);

    if let Some(warning) = &record.warning {
        println!("\n{}", style(format!("  ⚠  {warning}")).yellow());
    }

    render_tag_table(record);

    if record.fields.contains(tag::GPS_LATITUDE) || record.fields.contains(tag::LATITUDE) {
        println!(
            "{}",
            style("  ⚠  Esta imagen contiene datos de ubicación que pueden revelar información sensible")
                .yellow()
        );
    }

    println!(
        "{}\n",
        style(format!("  {} tags normalizados", record.tag_count)).dim()
    );
}

fn render_file_details(path: &Path) {
    print_property("Ruta", &path.display().to_string(), Color::White);

    let Ok(metadata) = fs::metadata(path) else {
        return;
    };

    print_property("Tamaño", &format_size(metadata.len()), Color::White);

    if let Some(mime) = sniff_mime(path) {
        print_property("MIME detectado", &mime, Color::White);
    }

    print_property("SHA-256", &file_digest(path, &metadata), Color::White);
    print_property(
        "Última modificación",
        &format_optional_time(metadata.modified().ok()),
        Color::White,
    );
}

fn render_tag_table(record: &ExtractionRecord) {
    if record.fields.is_empty() {
        println!("\n{}", style("  Sin tags que mostrar.").dim());
        return;
    }

    let mut table = base_table();
    table.set_header(vec![
        header_cell("Tag"),
        header_cell("Valor"),
        header_cell("Tipo"),
    ]);

    for (name, value) in record.fields.iter() {
        let value_color = if is_position_tag(name) {
            Color::Yellow
        } else {
            Color::White
        };
        table.add_row(Row::from(vec![
            Cell::new(name).fg(Color::Rgb {
                r: 160,
                g: 196,
                b: 255,
            }),
            Cell::new(value.to_string()).fg(value_color),
            Cell::new(value.kind_label()).fg(Color::Cyan),
        ]));
    }

    println!("\n{table}");
}

fn is_position_tag(name: &str) -> bool {
    name.starts_with("GPS") || name == tag::LATITUDE || name == tag::LONGITUDE
}

fn print_property(label: &str, value: &str, color: Color) {
    let label_styled = style(format!("  {}", label)).cyan().bold();
    let arrow = style("→").dim();

    let value_styled = match color {
        Color::Yellow => style(value).yellow(),
        Color::Green => style(value).green(),
        Color::Red => style(value).red(),
        _ => style(value).white(),
    };

    println!("{} {} {}", label_styled, arrow, value_styled);
}

fn format_optional_time(time: Option<SystemTime>) -> String {
    match time {
        Some(value) => {
            let datetime: DateTime<Local> = value.into();
            datetime.format("%Y-%m-%d %H:%M:%S %Z").to_string()
        }
        None => "No disponible".to_string(),
    }
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["bytes", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit_index = 0;

    while value >= 1024.0 && unit_index < UNITS.len() - 1 {
        value /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} bytes", bytes)
    } else {
        format!("{value:.2} {} ({} bytes)", UNITS[unit_index], bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_formatting_scales_units() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.00 KiB (2048 bytes)");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MiB (5242880 bytes)");
    }

    #[test]
    fn position_tags_are_flagged() {
        assert!(is_position_tag(tag::GPS_LATITUDE));
        assert!(is_position_tag(tag::GPS_PROCESSING_METHOD));
        assert!(is_position_tag(tag::LATITUDE));
        assert!(!is_position_tag(tag::MAKE));
    }
}
