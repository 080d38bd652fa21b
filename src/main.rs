use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use repo_docgen::{
    config::{
        DEFAULT_GITHUB_API_URL, DEFAULT_MAX_DEPTH, DEFAULT_OPENAI_API_URL, DEFAULT_OPENAI_MODEL,
        DEFAULT_REPLICATION_FILE_LIMIT,
    },
    ClientConfig, GenerateOptions, GitHubSource, LlmConfig, OpenAiClient, ReadmeGenerator,
    RepoRef,
};

/// Generate a README for a public GitHub repository
#[derive(Parser, Debug)]
#[command(name = "repo-docgen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Repository URL, e.g. https://github.com/owner/repo
    url: String,

    /// Leave out the folder structure tree
    #[arg(long)]
    no_tree: bool,

    /// Leave out the heuristic project analysis
    #[arg(long)]
    no_analysis: bool,

    /// Include an AI code replication prompt (needs an OpenAI API key)
    #[arg(long)]
    replication: bool,

    /// How many directory levels the folder tree expands
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// How many files feed the replication prompt
    #[arg(long, default_value_t = DEFAULT_REPLICATION_FILE_LIMIT)]
    file_limit: usize,

    /// Write the document here instead of stdout (a directory gets README.md)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// GitHub token; raises API rate limits
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_GITHUB_API_URL)]
    github_api_url: String,

    /// OpenAI API key for the replication prompt
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Chat completion endpoint
    #[arg(long, env = "OPENAI_API_URL", default_value = DEFAULT_OPENAI_API_URL)]
    openai_api_url: String,

    /// Chat completion model
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_OPENAI_MODEL)]
    openai_model: String,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let repo = RepoRef::parse(&args.url)?;
    info!(%repo, "Generating documentation");

    let client_config = ClientConfig::default()
        .with_base_url(args.github_api_url)
        .with_token(args.github_token);
    let api = Arc::new(GitHubSource::new(repo, client_config));

    let options = GenerateOptions {
        include_tree: !args.no_tree,
        include_analysis: !args.no_analysis,
        include_replication: args.replication,
        max_depth: args.max_depth,
        replication_file_limit: args.file_limit,
    };

    let mut generator = ReadmeGenerator::new(api, options);
    if args.replication {
        let llm = OpenAiClient::new(LlmConfig {
            api_url: args.openai_api_url,
            api_key: args.openai_api_key,
            model: args.openai_model,
            ..Default::default()
        });
        generator = generator.with_completion(Arc::new(llm));
    }

    let document = generator
        .generate()
        .await
        .context("Failed to generate documentation")?;

    match args.output {
        Some(path) => {
            let written = document.write_to(&path).await?;
            eprintln!("Documentation written to {}", written.display());
        }
        None => print!("{}", document.as_str()),
    }

    Ok(())
}
