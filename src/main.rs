use estimate_pdf::{
    AssemblerBuilder, AssemblyError, DirectoryExportSink, FilesystemResourceProvider, FormStore,
};
use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Relative attachment paths in a form are relative to the form file.
fn resource_base(form_path: &Path) -> PathBuf {
    match form_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Assembles one page of a saved estimate into a PDF.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("Assembles one page of an estimate into a PDF.");
        eprintln!();
        eprintln!("Usage: {} <path/to/form.json> <page key> [output dir]", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} estimate.json \"Quote Details\" out/", args[0]);
        std::process::exit(1);
    }

    let form_path = &args[1];
    let page_key = &args[2];
    let output_dir = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    println!("Loading form data from {}", form_path);
    let store = FormStore::from_file(form_path)?;

    let base = resource_base(Path::new(form_path));
    log::debug!("Resolving attachments against {}", base.display());
    let sink = Arc::new(DirectoryExportSink::new(&output_dir));
    let assembler = AssemblerBuilder::new()
        .with_resource_provider(Arc::new(FilesystemResourceProvider::unconfined(base)))
        .with_export_sink(sink.clone())
        .build()?;

    println!("Assembling '{}'...", page_key);
    let document = match assembler.assemble(page_key, store.as_bag()).await {
        Ok(document) => document,
        Err(AssemblyError::NoDataForPage(key)) => {
            let known: Vec<String> = store.page_keys().map(|key| key.to_string()).collect();
            eprintln!(
                "No form data for page '{}'. Pages in {}: {}",
                key,
                form_path,
                known.join(", ")
            );
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    for skipped in &document.skipped {
        eprintln!("Skipped {} ({}): {}", skipped.path, skipped.uri, skipped.reason);
    }
    println!(
        "Successfully generated {} ({} pages)",
        sink.destination_for(&document.path)?.display(),
        document.page_count
    );
    Ok(())
}
