//! Exportación del registro normalizado en distintos formatos.

use crate::extraction::ExtractionRecord;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExportFormat {
    Json,
    Txt,
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Json => "JSON",
            ExportFormat::Txt => "TXT",
            ExportFormat::Csv => "CSV",
            ExportFormat::Xlsx => "Excel",
        }
    }
}

pub fn parse_export_format(input: &str) -> Result<ExportFormat, String> {
    match input.to_lowercase().as_str() {
        "json" => Ok(ExportFormat::Json),
        "txt" | "text" | "texto" => Ok(ExportFormat::Txt),
        "csv" => Ok(ExportFormat::Csv),
        "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
        _ => Err("Formato de exportación no reconocido".to_string()),
    }
}

pub fn export_record(
    record: &ExtractionRecord,
    format: ExportFormat,
    path: &Path,
) -> Result<(), String> {
    match format {
        ExportFormat::Json => export_json(record, path),
        ExportFormat::Txt => export_txt(record, path),
        ExportFormat::Csv => export_csv(record, path),
        ExportFormat::Xlsx => export_xlsx(record, path),
    }
}

fn export_json(record: &ExtractionRecord, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(record)
        .map_err(|err| format!("No se pudo serializar JSON: {err}"))?;
    fs::write(path, json).map_err(|err| format!("No se pudo guardar el JSON: {err}"))
}

fn export_txt(record: &ExtractionRecord, path: &Path) -> Result<(), String> {
    let mut output = String::new();
    output.push_str("Reporte de extracción EXIF\n");
    output.push_str("==========================\n\n");

    output.push_str(&format!("Estado: {}\n", record.status.label()));
    if let Some(error) = &record.error {
        output.push_str(&format!("Error: {error}\n"));
    }
    if let Some(warning) = &record.warning {
        output.push_str(&format!("Aviso: {warning}\n"));
    }
    output.push('\n');

    if record.fields.is_empty() {
        output.push_str("(Sin tags)\n");
    } else {
        for (name, value) in record.fields.iter() {
            output.push_str(&format!("- {}: {} ({})\n", name, value, value.kind_label()));
        }
    }

    output.push_str(&format!("\nTotal de tags: {}\n", record.tag_count));

    fs::write(path, output).map_err(|err| format!("No se pudo guardar el TXT: {err}"))
}

fn export_csv(record: &ExtractionRecord, path: &Path) -> Result<(), String> {
    let mut writer =
        csv::Writer::from_path(path).map_err(|err| format!("No se pudo crear el CSV: {err}"))?;

    writer
        .write_record(["Etiqueta", "Valor", "Tipo"])
        .map_err(|err| format!("No se pudo escribir el CSV: {err}"))?;

    for (name, value) in record.fields.iter() {
        let rendered = value.to_string();
        writer
            .write_record([name, rendered.as_str(), value.kind_label()])
            .map_err(|err| format!("No se pudo escribir el CSV: {err}"))?;
    }

    writer
        .flush()
        .map_err(|err| format!("No se pudo guardar el CSV: {err}"))
}

fn export_xlsx(record: &ExtractionRecord, path: &Path) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Metadata EXIF")
        .map_err(|err| format!("No se pudo crear la hoja de cálculo: {err}"))?;

    worksheet
        .set_column_width(0, 26.0)
        .map_err(|err| format!("No se pudo ajustar columnas: {err}"))?;
    worksheet
        .set_column_width(1, 48.0)
        .map_err(|err| format!("No se pudo ajustar columnas: {err}"))?;
    worksheet
        .set_column_width(2, 14.0)
        .map_err(|err| format!("No se pudo ajustar columnas: {err}"))?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x1F4E78))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    let cell_format = Format::new()
        .set_text_wrap()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Left);

    for (column, title) in ["Etiqueta", "Valor", "Tipo"].iter().enumerate() {
        worksheet
            .write_with_format(0, column as u16, *title, &header_format)
            .map_err(|err| format!("No se pudo escribir el XLSX: {err}"))?;
    }

    for (index, (name, value)) in record.fields.iter().enumerate() {
        let row = (index + 1) as u32;
        worksheet
            .write_with_format(row, 0, name, &cell_format)
            .map_err(|err| format!("No se pudo escribir el XLSX: {err}"))?;
        worksheet
            .write_with_format(row, 1, value.to_string().as_str(), &cell_format)
            .map_err(|err| format!("No se pudo escribir el XLSX: {err}"))?;
        worksheet
            .write_with_format(row, 2, value.kind_label(), &cell_format)
            .map_err(|err| format!("No se pudo escribir el XLSX: {err}"))?;
    }

    workbook
        .save(path)
        .map_err(|err| format!("No se pudo guardar el XLSX: {err}"))
}
