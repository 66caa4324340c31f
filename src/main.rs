//! doxyrst — turn extractor XML for C/C++ headers into Sphinx pages.
//!
//! Two steps, each run once per build:
//!
//! - **generate**: for one component, write a page per documented class,
//!   struct and file, a program listing per header, and the component's
//!   tables of contents:
//!   `doxyrst generate -c kernel -s /src -o docs/sphinx -d Doxyfile "a.hpp;b.hpp"`
//! - **assemble**: merge the components into `reference/cpp_api.rst`:
//!   `doxyrst assemble -o docs/sphinx --components "numerics;kernel"`

mod comments;
mod doxygen;
mod error;
mod generate;
mod model;
mod refname;
mod render;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

use crate::doxygen::config::ExtractorConfig;
use crate::generate::{component_dir, ComponentJob};
use crate::model::HeaderFile;
use crate::render::api::ApiPage;

#[derive(Parser)]
#[command(
    name = "doxyrst",
    version,
    about = "Generate Sphinx reference pages from Doxygen XML output"
)]
struct Cli {
    /// Log every page written
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the pages of one component
    Generate(GenerateArgs),
    /// Merge component pages into the project API reference
    Assemble(AssembleArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Headers to document, as paths or CMake lists ("a.hpp;b.hpp")
    #[arg(required = true)]
    headers: Vec<String>,

    /// Component name (also the breathe project name)
    #[arg(short = 'c', long)]
    component: String,

    /// Absolute path of the C/C++ sources
    #[arg(short = 's', long)]
    source_root: String,

    /// Sphinx source directory
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Doxygen configuration file used to produce the XML
    #[arg(short = 'd', long)]
    doxyfile: PathBuf,

    /// Keep comments in program listings
    #[arg(long)]
    keep_comments: bool,
}

#[derive(Args)]
struct AssembleArgs {
    /// Sphinx source directory
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Components in display order, as a CMake list ("numerics;kernel")
    #[arg(long, required = true)]
    components: Vec<String>,

    /// Project name shown in the page title
    #[arg(long, default_value = "Siconos")]
    project: String,

    /// File whose content is inserted after the introduction
    #[arg(long)]
    preamble: Option<PathBuf>,

    /// Document with class diagrams to link from the page
    #[arg(long)]
    class_diagrams: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    match &cli.command {
        Command::Generate(args) => generate_mode(args),
        Command::Assemble(args) => assemble_mode(args),
    }
}

fn generate_mode(args: &GenerateArgs) -> Result<()> {
    let extractor = ExtractorConfig::load(&args.doxyfile)?;
    tracing::debug!(
        xml_dir = %extractor.xml_dir.display(),
        case_sense = extractor.case_sense_names,
        "extractor settings"
    );

    let headers: Vec<HeaderFile> = split_lists(&args.headers)
        .into_iter()
        .map(HeaderFile::new)
        .collect();

    let job = ComponentJob {
        component: &args.component,
        source_root: &args.source_root,
        output_dir: component_dir(&args.output, &args.component),
        extractor: &extractor,
        filter_comments: !args.keep_comments,
    };
    generate::generate_component(&headers, &job)?;
    Ok(())
}

fn assemble_mode(args: &AssembleArgs) -> Result<()> {
    let preamble = match &args.preamble {
        Some(path) => read_preamble(path)?,
        None => String::new(),
    };
    let page = ApiPage {
        project: args.project.clone(),
        preamble,
        class_diagrams: args.class_diagrams.clone(),
    };
    let order = split_lists(&args.components);
    render::api::write_api_page(&args.output.join("reference"), &order, &page)?;
    Ok(())
}

fn read_preamble(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read preamble: {}", path.display()))
}

/// Flatten arguments that may each hold a CMake list.
fn split_lists(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|a| doxygen::parse_cmake_list(a))
        .collect()
}
