//! Samyama RDF Bridge CLI: load RDF into an in-memory repository and print
//! the repository back as RDF

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use samyama_rdf_bridge::graph::{MemorySession, NodeId};
use samyama_rdf_bridge::rdf::{
    IdentifierConverter, MappingConfig, PathConverter, RdfFormat, RdfParser, RdfSerializer, RdfTranslator, Triple,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "samyama-rdf-bridge", version, about = "Property graph <-> RDF translation")]
struct Cli {
    /// JSON mapping configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base IRI of repository resources, overriding the configuration
    #[arg(long, global = true)]
    base_iri: Option<String>,

    /// Output format
    #[arg(long, default_value = "turtle", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Turtle,
    Ntriples,
}

impl From<OutputFormat> for RdfFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Turtle => RdfFormat::Turtle,
            OutputFormat::Ntriples => RdfFormat::NTriples,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Apply an RDF document to a fresh repository and print its triples
    Load {
        /// Turtle (.ttl) or N-Triples (.nt) file
        file: PathBuf,

        /// Workspaces to create next to the default one
        #[arg(long = "workspace")]
        workspaces: Vec<String>,

        /// Also print the workspace triples
        #[arg(long)]
        list_workspaces: bool,
    },
    /// Print the vocabulary triples of the built-in namespaces
    Namespaces,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = load_config(cli.config.as_deref(), cli.base_iri).and_then(|config| match cli.command {
        Commands::Load {
            file,
            workspaces,
            list_workspaces,
        } => run_load(&config, &file, &workspaces, list_workspaces, cli.format.into()),
        Commands::Namespaces => run_namespaces(&config, cli.format.into()),
    });

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>, base_iri: Option<String>) -> anyhow::Result<MappingConfig> {
    let mut config = match path {
        Some(path) => MappingConfig::from_json_file(path)
            .with_context(|| format!("could not read configuration {}", path.display()))?,
        None => MappingConfig::default(),
    };
    if let Some(base_iri) = base_iri {
        config.base_iri = base_iri;
    }
    debug!("Using base IRI {}", config.base_iri);
    Ok(config)
}

fn run_load(
    config: &MappingConfig,
    file: &Path,
    workspaces: &[String],
    list_workspaces: bool,
    output: RdfFormat,
) -> anyhow::Result<()> {
    let Some(input) = RdfFormat::from_path(file) else {
        bail!("unknown RDF format for {}", file.display());
    };
    let document = RdfParser::parse_file_with_base(file, input, Some(config.base_iri.as_str()))
        .with_context(|| format!("could not parse {}", file.display()))?;
    info!("Loaded {} triples from {}", document.triples.len(), file.display());

    let mut session = MemorySession::new();
    for workspace in workspaces {
        session.create_workspace(workspace)?;
    }
    let converter = PathConverter::new(config, &config.default_workspace);
    let mut translator = RdfTranslator::new(&mut session, &converter);

    for triple in &document.triples {
        if let Some(resource) = triple.subject.as_named_node() {
            let path = converter.to_path(resource)?;
            translator.session_mut().ensure_node(&path)?;
        }
        translator
            .apply_statement(triple, &document.prefixes)
            .with_context(|| format!("could not apply {}", triple))?;
    }

    let nodes: Vec<NodeId> = translator.session().node_ids().collect();
    let mut triples = translator.property_triples(nodes, None).into_triples()?;
    triples.extend(translator.namespace_triples().into_triples()?);
    if list_workspaces {
        triples.extend(translator.workspace_triples()?.into_triples()?);
    }
    print_triples(&triples, output)
}

fn run_namespaces(config: &MappingConfig, output: RdfFormat) -> anyhow::Result<()> {
    let mut session = MemorySession::new();
    let converter = PathConverter::new(config, &config.default_workspace);
    let translator = RdfTranslator::new(&mut session, converter);
    let triples = translator.namespace_triples().into_triples()?;
    print_triples(&triples, output)
}

fn print_triples(triples: &[Triple], format: RdfFormat) -> anyhow::Result<()> {
    print!("{}", RdfSerializer::serialize(triples, format)?);
    Ok(())
}
