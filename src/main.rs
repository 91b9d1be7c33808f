use console::style;
use exiflens::export::{export_record, parse_export_format};
use exiflens::extraction::{ExtractionMode, extract};
use exiflens::{renderer, search, ui};
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn main() {
    if env::args().len() > 1 {
        eprintln!(
            "ExifLens es interactivo y no acepta argumentos. Ejecuta solo `cargo run` o el binario sin parámetros."
        );
        std::process::exit(1);
    }

    ui::render_header();
    ui::render_intro();

    let mut state = AppState::default();
    let mut input = String::new();
    loop {
        match read_user_input(&mut input) {
            Ok(None) => {
                println!("\n{}", style("Fin de la entrada. ¡Hasta luego!").dim());
                break;
            }
            Ok(Some(line)) => {
                if line.is_empty() {
                    continue;
                }

                if matches_command(&line, &["exit", "salir"]) {
                    println!("{}", style("Hasta luego!").dim());
                    break;
                }

                if matches_command(&line, &["ayuda", "help"]) {
                    ui::render_help();
                    continue;
                }

                if let Err(message) = handle_input(&mut state, &line) {
                    eprintln!("{message}");
                }
            }
            Err(error) => {
                eprintln!("Error al leer la entrada: {error}");
            }
        }
    }
}

#[derive(Default)]
struct AppState {
    last_results: Vec<PathBuf>,
}

fn matches_command(input: &str, aliases: &[&str]) -> bool {
    aliases
        .iter()
        .any(|alias| input.eq_ignore_ascii_case(alias))
}

fn handle_input(state: &mut AppState, raw_input: &str) -> Result<(), String> {
    let trimmed = raw_input.trim();
    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or("");

    match command.to_ascii_lowercase().as_str() {
        "basico" | "basic" => {
            let remainder = trimmed[command.len()..].trim();
            if remainder.is_empty() {
                return Err("Debes indicar la ruta de la imagen.".to_string());
            }
            run_extraction(Path::new(remainder), ExtractionMode::Basic);
            Ok(())
        }
        "avanzado" | "advanced" => {
            let remainder = trimmed[command.len()..].trim();
            if remainder.is_empty() {
                return Err("Debes indicar la ruta de la imagen.".to_string());
            }
            run_extraction(Path::new(remainder), ExtractionMode::Advanced);
            Ok(())
        }
        "exportar" | "export" => {
            let format_token = parts
                .next()
                .ok_or_else(|| "Debes indicar el formato y la ruta de la imagen.".to_string())?;
            let source: Vec<&str> = parts.collect();
            if source.is_empty() {
                return Err("Debes indicar la ruta de la imagen.".to_string());
            }
            export_image(&source.join(" "), format_token)
        }
        "buscar" | "search" => {
            let remainder = trimmed[command.len()..].trim();
            if remainder.is_empty() {
                return Err("Debes indicar el directorio donde buscar.".to_string());
            }
            let results = search::find_images(Path::new(remainder));
            render_search_results(&results);
            state.last_results = results;
            Ok(())
        }
        _ => {
            if let Ok(index) = trimmed.parse::<usize>() {
                let zero_based = index
                    .checked_sub(1)
                    .ok_or_else(|| "El índice debe ser positivo.".to_string())?;
                let path = state.last_results.get(zero_based).ok_or_else(|| {
                    "Índice fuera de rango. Usa `buscar` para actualizar la lista.".to_string()
                })?;
                run_extraction(path, ExtractionMode::Advanced);
                return Ok(());
            }

            run_extraction(Path::new(trimmed), ExtractionMode::Advanced);
            Ok(())
        }
    }
}

fn run_extraction(path: &Path, mode: ExtractionMode) {
    let record = extract(path, mode);
    renderer::render_record(path, &record);
}

fn export_image(source: &str, format_token: &str) -> Result<(), String> {
    let format = parse_export_format(format_token)?;
    let source = Path::new(source);

    let record = extract(source, ExtractionMode::Advanced);
    if !record.success {
        let message = record.error.unwrap_or_else(|| "Error desconocido".to_string());
        return Err(format!(
            "No se pudo extraer `{}`: {message}",
            source.display()
        ));
    }

    let stem = source
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("imagen");
    let destination = source.with_file_name(format!("{stem}-exif.{}", format.extension()));

    export_record(&record, format, &destination)?;
    println!(
        "{}",
        style(format!(
            "Reporte {} guardado en {}",
            format.label(),
            destination.display()
        ))
        .green()
    );
    Ok(())
}

fn render_search_results(results: &[PathBuf]) {
    if results.is_empty() {
        println!("\n{}\n", style("No se encontraron imágenes soportadas.").dim());
        return;
    }

    println!();
    for (index, path) in results.iter().enumerate() {
        println!(
            "  {} {}",
            style(format!("{:>3}.", index + 1)).cyan(),
            path.display()
        );
    }
    println!(
        "\n{}\n",
        style("Escribe el número de una imagen para extraer su metadata.").dim()
    );
}

fn read_user_input(buffer: &mut String) -> io::Result<Option<String>> {
    print!("{} ", style("Imagen").bold().cyan());
    print!("{} ", style("›").cyan());
    io::stdout().flush()?;

    buffer.clear();
    let bytes_read = io::stdin().read_line(buffer)?;
    if bytes_read == 0 {
        return Ok(None);
    }

    Ok(Some(buffer.trim().to_string()))
}
