use clap::Parser;
use form_builder::cli::commands::{cmd_export, cmd_list, cmd_render, cmd_save, cmd_show, cmd_submit};
use form_builder::cli::config::{Cli, Commands, load_config, resolve, resolve_import_format};
use form_builder::trace::TraceLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());
    let resolved = resolve(&cli, &config);

    let tracer = match &resolved.trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };
    let store = resolved.store_path.as_str();

    if cli.verbose > 1 {
        eprintln!("Store: {}", store);
        if let Some(path) = tracer.path() {
            eprintln!("Trace: {}", path.display());
        }
    }

    match cli.command {
        Commands::List => cmd_list(store)?,
        Commands::Save { file, format } => {
            let format = resolve_import_format(format, &file, &config);
            cmd_save(store, &file, format, &tracer, cli.verbose)?;
        }
        Commands::Export {
            title,
            format,
            output_dir,
        } => {
            let format = format.unwrap_or(config.export.format);
            let output_dir = output_dir.unwrap_or_else(|| config.export.output_dir.clone());
            cmd_export(store, &title, format, &output_dir, &tracer)?;
        }
        Commands::Render { title, output } => cmd_render(store, &title, output.as_deref())?,
        Commands::Submit { title, values } => {
            cmd_submit(store, &title, &values, &tracer, cli.verbose)?;
        }
        Commands::Show { title } => cmd_show(store, &title)?,
    }

    Ok(())
}
