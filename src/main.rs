use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tenor::{
    parse_transcript_file, process, AnalysisConfig, AnnotatedTranscript, ConsoleTranscript,
    HfInferenceClient, HfInferenceConfig,
};

#[derive(Parser)]
#[command(name = "tenor")]
#[command(author, version, about = "Customer dialogue sentiment and intention annotation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate monitored utterances with sentiment and intentions
    Annotate {
        /// Analysis config file (TOML: model, monitored speaker, label sets)
        #[arg(short, long)]
        config: PathBuf,

        /// Input transcript file (JSON)
        #[arg(short, long)]
        transcript: PathBuf,

        /// Output file for the annotated transcript (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip console rendering of the annotated transcript
        #[arg(long)]
        quiet: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Summarize a transcript without classifying anything
    Inspect {
        /// Input transcript file (JSON)
        #[arg(short, long)]
        transcript: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Annotate {
            config,
            transcript,
            output,
            quiet,
            verbose,
        } => {
            setup_logging(verbose);
            annotate_transcript(config, transcript, output, quiet).await
        }
        Commands::Inspect { transcript, verbose } => {
            setup_logging(verbose);
            inspect_transcript(transcript)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn annotate_transcript(
    config_path: PathBuf,
    transcript_path: PathBuf,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    info!("Loading config from {:?}", config_path);
    let config =
        AnalysisConfig::from_file(&config_path).context("Failed to load analysis config")?;

    info!("Loading transcript from {:?}", transcript_path);
    let utterances =
        parse_transcript_file(&transcript_path).context("Failed to parse input transcript")?;

    info!(
        "Loaded {} utterances, monitoring speaker {:?}",
        utterances.len(),
        config.monitored_speaker
    );

    let api_config = HfInferenceConfig::from_env(&config.model)?;
    let classifier = HfInferenceClient::new(api_config);

    let annotated = process(
        utterances,
        &config.monitored_speaker,
        &config.sentiment_labels,
        &config.intention_labels,
        &classifier,
    )
    .await?;

    let transcript = AnnotatedTranscript::new(
        annotated,
        config.monitored_speaker.clone(),
        config.model.clone(),
    );

    info!(
        "Complete: {} of {} utterances annotated",
        transcript.metadata.annotated_utterances, transcript.metadata.total_utterances
    );

    if let Some(path) = &output {
        transcript.write_json(path)?;
        info!("Output written to {:?}", path);
    }

    if !quiet {
        print!("{}", ConsoleTranscript::new(&transcript.utterances).format());
    }

    Ok(())
}

fn inspect_transcript(path: PathBuf) -> Result<()> {
    info!("Inspecting transcript from {:?}", path);
    let utterances =
        parse_transcript_file(&path).context("Failed to parse input transcript")?;

    println!("Transcript Summary");
    println!("==================");
    println!("Total utterances: {}", utterances.len());
    println!();

    // Speaker stats, in order of first appearance
    println!("Speaker Statistics");
    println!("------------------");
    let mut speakers: Vec<&str> = Vec::new();
    for utterance in &utterances {
        if !speakers.contains(&utterance.speaker.as_str()) {
            speakers.push(&utterance.speaker);
        }
    }

    for speaker in speakers {
        let turns: Vec<_> = utterances
            .iter()
            .filter(|u| u.speaker == speaker)
            .collect();
        let word_count: usize = turns
            .iter()
            .map(|u| u.message.split_whitespace().count())
            .sum();
        let avg_words = word_count as f64 / turns.len().max(1) as f64;

        println!(
            "{}: {} utterances, {} words, avg {:.1} words per utterance",
            speaker,
            turns.len(),
            word_count,
            avg_words
        );
    }

    Ok(())
}
