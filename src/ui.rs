//! Presentación compartida de la consola: encabezado, tablas y ayuda.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use console::style;

const HEADER_WIDTH: usize = 74;

pub fn render_header() {
    let border = "─".repeat(HEADER_WIDTH - 2);
    println!("\n{}", style(format!("┌{}┐", border)).cyan());
    println!(
        "{}",
        style(format!(
            "│ {:^inner_width$} │",
            "▸ ExifLens · Lector de Metadata EXIF ◂",
            inner_width = HEADER_WIDTH - 4
        ))
        .cyan()
        .bold()
    );
    println!("{}\n", style(format!("└{}┘", border)).cyan());
}

pub fn render_intro() {
    println!(
        "{}",
        style("Escribe la ruta de una imagen para extraer su metadata EXIF.").dim()
    );
    println!(
        "{}\n",
        style("Escribe 'ayuda' para ver los comandos o 'salir' para terminar.").dim()
    );
}

pub fn render_help() {
    let help_lines = [
        "┌─ Comandos disponibles:",
        "│   • <ruta>                     extracción avanzada de la imagen",
        "│   • basico <ruta>              extracción básica (solo texto crudo)",
        "│   • exportar <formato> <ruta>  guarda el reporte (json, txt, csv, xlsx)",
        "│   • buscar <directorio>        lista las imágenes soportadas",
        "│   • <número>                   extrae una imagen de la última búsqueda",
        "│   • salir                      termina la sesión",
        "└─",
    ];

    for line in help_lines.iter() {
        println!("{}", style(line).cyan().dim());
    }

    println!();
}

pub fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
        .add_attribute(Attribute::Underlined)
}
