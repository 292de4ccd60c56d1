//! CLI logic for the isogrid scene tool.
//!
//! Loads a scene, builds and draws its grid, and writes a depth report.

pub mod config;
pub mod error_adapter;

mod args;

pub use args::{Args, Format};

use std::{fs, io::Write, path::Path};

use log::info;

use isogrid::{IsogridError, SceneBuilder};

/// Run the isogrid CLI application
///
/// This function processes the input scene through the isogrid pipeline
/// and writes the resulting report to the output path (or stdout for `-`).
///
/// # Errors
///
/// Returns `IsogridError` for unreadable files, configuration files that
/// are missing, malformed or set a zero depth step, scene parse failures and
/// the first rejected grid operation.
pub fn run(args: &Args) -> Result<(), IsogridError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let explicit = args.config.as_deref().map(Path::new);
    let app_config = config::load_config(explicit, Path::new(&args.input))?;
    let source = fs::read_to_string(&args.input)?;

    let builder = SceneBuilder::new(app_config);
    let scene_config = builder.parse(&source)?;
    let scene = builder.build(&scene_config)?;
    let report = builder.render(&scene, args.format.into());

    if args.output == "-" {
        std::io::stdout().lock().write_all(report.as_bytes())?;
    } else {
        fs::write(&args.output, report)?;
    }

    info!(output_file = args.output; "Report written successfully");

    Ok(())
}
