use std::path::Path;

use crate::codec::Format;
use crate::editor::FormEditor;
use crate::error::FormError;
use crate::navigation::{View, open_existing};
use crate::render::display::format_console_table;
use crate::render::engine::FormSession;
use crate::render::html::generate_form_page;
use crate::storage::definitions::DefinitionStore;
use crate::storage::port::FileStore;
use crate::trace::TraceLogger;

// ============================================================================
// list subcommand
// ============================================================================

pub fn cmd_list(store_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = DefinitionStore::new(FileStore::open(store_path)?);
    let titles = store.list()?;

    if titles.is_empty() {
        println!("No saved forms.");
        return Ok(());
    }
    for title in titles {
        println!("{}", title);
    }
    Ok(())
}

// ============================================================================
// save subcommand
// ============================================================================

pub fn cmd_save(
    store_path: &str,
    file: &str,
    format: Format,
    tracer: &TraceLogger,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut editor = FormEditor::new();
    editor.set_format(format);
    editor.import_file(Path::new(file), tracer)?;

    if verbose > 0 {
        eprintln!(
            "Imported \"{}\" ({} fields) from {}",
            editor.title(),
            editor.fields().len(),
            file
        );
    }

    let mut store = DefinitionStore::new(FileStore::open(store_path)?);
    let definition = editor.generate(&mut store, tracer)?;

    println!(
        "Saved form \"{}\" with {} fields",
        definition.form_title,
        definition.fields.len()
    );
    Ok(())
}

// ============================================================================
// export subcommand
// ============================================================================

pub fn cmd_export(
    store_path: &str,
    title: &str,
    format: Format,
    output_dir: &str,
    tracer: &TraceLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = DefinitionStore::new(FileStore::open(store_path)?);
    let mut editor = FormEditor::from_definition(store.load(title)?);
    editor.set_format(format);

    std::fs::create_dir_all(output_dir)?;
    let path = editor.export_to_dir(Path::new(output_dir), tracer)?;
    println!("Wrote {}", path.display());
    Ok(())
}

// ============================================================================
// render / submit / show subcommands
// ============================================================================

pub fn cmd_render(
    store_path: &str,
    title: &str,
    output: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(store_path, title)?;
    let page = generate_form_page(session.form(), &session.table());

    match output {
        Some(path) => std::fs::write(path, &page)?,
        None => print!("{}", page),
    }
    Ok(())
}

pub fn cmd_submit(
    store_path: &str,
    title: &str,
    values: &[(String, String)],
    tracer: &TraceLogger,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(store_path, title)?;
    for (name, value) in values {
        session.set_value(name, value)?;
    }
    session.submit(tracer)?;

    if verbose > 0 {
        eprintln!("Stored submission #{} for \"{}\"", session.submissions().len(), title);
    }
    print!("{}", format_console_table(&session.table()));
    Ok(())
}

pub fn cmd_show(store_path: &str, title: &str) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(store_path, title)?;
    print!("{}", format_console_table(&session.table()));
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Open the render view for a saved form.
///
/// An unknown title lands back on the builder, which on the command line
/// means reporting the title as not found.
fn open_session(store_path: &str, title: &str) -> Result<FormSession<FileStore>, FormError> {
    let store = DefinitionStore::new(FileStore::open(store_path)?);
    match open_existing(&store, title)? {
        View::Render(definition) => FormSession::open(definition, store.into_inner()),
        View::Builder => Err(FormError::NotFound(title.to_string())),
    }
}
