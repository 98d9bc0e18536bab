use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use llm_explainer::demos::analogy::{ANALOGY_STEPS, analogy};
use llm_explainer::demos::attention::{ATTENTION_DATA, MIN_ARC_WEIGHT, TARGET_INDEX};
use llm_explainer::demos::clusters::{CLUSTERS, connections, find_cluster};
use llm_explainer::demos::embedding_space::{EMBEDDING_POINTS, cluster_members, related_words};
use llm_explainer::demos::overview::PROCESS_STEPS;
use llm_explainer::demos::probabilities::{self, PROBABILITIES, REMAINING_TOKENS};
use llm_explainer::demos::token_stats::{
    CONTEXT_TOKENS, CONTEXT_WORDS, CounterAnimation, REVEAL_DELAY, format_thousands,
    word_ratio_percent,
};
use llm_explainer::demos::tokenizer::{DEFAULT_INPUT, SAMPLE_SENTENCE, SAMPLE_TOKENS};
use llm_explainer::demos::{Cluster, TokenCounts, tokenize};
use llm_explainer::educational::{
    ExplanationLevel, GenerationNarrator, Narrator, NarratorConfig, attention_bars, box_text,
    get_explanation, pipeline_strip, probability_bars, scatter_projection, token_sequence_box,
};
use llm_explainer::sampling::{BASE_LOGITS, LOGIT_CONTEXT};
use llm_explainer::config::SPEED_STEP;
use llm_explainer::{GenerationSequencer, Sampler, SamplingConfig, SequencerConfig};

#[derive(Parser, Debug)]
#[command(name = "llm-explainer")]
#[command(about = "Watch how a language model writes, one token at a time")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print data as JSON instead of drawings
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Play the generation loop for "What is Python"
    Generate {
        /// Speed multiplier (0.5 to 3.0 in steps of 0.5)
        #[arg(short, long)]
        speed: Option<f32>,

        /// JSON file overriding prompt, response and timings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only print tokens and run controls
        #[arg(short, long)]
        quiet: bool,

        /// Read controls from stdin: p play/pause, r reset, + faster, - slower, q quit
        #[arg(short, long)]
        interactive: bool,
    },

    /// Split text into demo tokens
    Tokenize {
        /// Text to tokenize
        text: Option<String>,
    },

    /// Show the authored tokenization with token IDs
    Tokens,

    /// Show the next-token distribution for "What ### Python"
    Probabilities,

    /// Apply temperature to logits and draw tokens
    Sample {
        /// Sampling temperature (0.1 to 1.5)
        #[arg(short, long, default_value_t = 0.7)]
        temperature: f32,

        /// Seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,

        /// Number of tokens to draw
        #[arg(short = 'n', long, default_value_t = 20)]
        draws: usize,
    },

    /// Show what "it" attends to
    Attention,

    /// Show words as points in a 3D meaning-space
    Embeddings {
        /// Word whose neighbours to list
        #[arg(short, long)]
        word: Option<String>,
    },

    /// Walk through king − man + woman ≈ queen
    Analogy,

    /// Show programming concepts grouped by meaning
    Clusters {
        /// Cluster to expand
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show the five pipeline stages
    Overview,

    /// Compare tokens and words in a context window
    Stats,
}

/// A user command typed while `generate --interactive` plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    PlayPause,
    Reset,
    Faster,
    Slower,
    Quit,
}

impl Control {
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "p" | "play" | "pause" => Some(Self::PlayPause),
            "r" | "reset" => Some(Self::Reset),
            "+" | "=" | "faster" => Some(Self::Faster),
            "-" | "slower" => Some(Self::Slower),
            "q" | "quit" => Some(Self::Quit),
            _ => None,
        }
    }

    /// Apply to `sequencer`. Returns `false` when the session should end.
    fn apply(self, sequencer: &GenerationSequencer) -> bool {
        let state = sequencer.snapshot();
        match self {
            Self::PlayPause if state.is_running => sequencer.pause(),
            Self::PlayPause => sequencer.start(),
            Self::Reset => sequencer.reset(),
            Self::Faster => {
                sequencer.set_speed(state.speed_multiplier + SPEED_STEP);
            }
            Self::Slower => {
                sequencer.set_speed(state.speed_multiplier - SPEED_STEP);
            }
            Self::Quit => return false,
        }
        true
    }
}

/// Print `value` as pretty JSON on stdout.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Convert verbosity count to log level string
fn verbosity_to_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(verbosity_to_log_level(cli.verbose)),
    )
    .init();

    let json = cli.json;
    match cli.command {
        Commands::Generate {
            speed,
            config,
            quiet,
            interactive,
        } => {
            let options = GenerateOptions {
                quiet,
                interactive,
                json,
            };
            run_generate(speed, config, options).await
        }
        Commands::Tokenize { text } => {
            run_tokenize(text.as_deref().unwrap_or(DEFAULT_INPUT), json)
        }
        Commands::Tokens => run_tokens(json),
        Commands::Probabilities => run_probabilities(json),
        Commands::Sample {
            temperature,
            seed,
            draws,
        } => run_sample(temperature, seed, draws, json),
        Commands::Attention => run_attention(json),
        Commands::Embeddings { word } => run_embeddings(word.as_deref(), json),
        Commands::Analogy => run_analogy(json),
        Commands::Clusters { name } => run_clusters(name.as_deref(), json),
        Commands::Overview => run_overview(json),
        Commands::Stats => run_stats(json).await,
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct GenerateOptions {
    quiet: bool,
    interactive: bool,
    json: bool,
}

async fn run_generate(
    speed: Option<f32>,
    config: Option<PathBuf>,
    options: GenerateOptions,
) -> Result<()> {
    let mut config = match config {
        Some(path) => SequencerConfig::from_json_file(&path)?,
        None => SequencerConfig::default(),
    };
    if let Some(speed) = speed {
        config = config.with_speed(speed);
    }
    debug!("sequencer config: {config:?}");

    let sequencer = GenerationSequencer::new(config)?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    sequencer.on_state_change(move |state| {
        let _ = tx.send(state.clone());
    });

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let narrator_config = if options.quiet {
        NarratorConfig::minimal()
    } else {
        NarratorConfig::default()
    };
    let mut narrator = GenerationNarrator::new(io::stdout(), narrator_config);
    if !options.json {
        narrator.on_start(&sequencer.config().prompt, sequencer.config().response.len())?;
        if options.interactive {
            println!("Controls: p play/pause, r reset, + faster, - slower, q quit\n");
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = options.interactive;

    sequencer.start();
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("interrupted; tearing down");
                break;
            }
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => match Control::parse(&line) {
                    Some(control) => {
                        debug!("control {control:?}");
                        if !control.apply(&sequencer) {
                            break;
                        }
                    }
                    None => warn!("unknown control {:?}", line.trim()),
                },
                None => {
                    stdin_open = false;
                    // Nothing can resume a stopped run once stdin is gone.
                    if !sequencer.snapshot().is_running {
                        break;
                    }
                }
            },
            state = rx.recv() => match state {
                Some(state) => {
                    if options.json {
                        println!("{}", serde_json::to_string(&state)?);
                    } else {
                        narrator.on_state(&state)?;
                    }
                    if state.is_finished() && !stdin_open {
                        break;
                    }
                }
                None => break,
            },
        }
    }
    sequencer.shutdown();
    Ok(())
}

fn run_tokenize(text: &str, json: bool) -> Result<()> {
    let tokens = tokenize(text);
    let counts = TokenCounts::from_tokens(&tokens);
    if json {
        return print_json(&json!({ "text": text, "tokens": tokens, "counts": counts }));
    }

    println!("📖 Input: \"{text}\"\n");
    for token in &tokens {
        println!("  [{:>12}]  #{:<6} {}", token.text, token.id, token.kind.as_str());
    }
    println!(
        "\n📊 {} tokens: {} words, {} subwords, {} punctuation",
        counts.total, counts.words, counts.subwords, counts.punctuation
    );
    if let Some(explanation) = get_explanation("tokenization") {
        println!("\n💡 {}", explanation.get(ExplanationLevel::Medium));
    }
    Ok(())
}

fn run_tokens(json: bool) -> Result<()> {
    if json {
        return print_json(&json!({ "sentence": SAMPLE_SENTENCE, "tokens": SAMPLE_TOKENS }));
    }
    let texts: Vec<String> = SAMPLE_TOKENS.iter().map(|t| t.text.to_string()).collect();
    println!("📖 \"{SAMPLE_SENTENCE}\"\n");
    println!("{}", token_sequence_box(&texts, None, ""));
    let ids: Vec<String> = SAMPLE_TOKENS.iter().map(|t| t.id.to_string()).collect();
    println!("  → [{}]", ids.join(", "));
    Ok(())
}

fn run_probabilities(json: bool) -> Result<()> {
    if json {
        return print_json(&json!({
            "context": probabilities::CONTEXT,
            "probabilities": PROBABILITIES,
            "remaining_tokens": REMAINING_TOKENS,
        }));
    }
    println!("📖 Context: \"{}\"\n", probabilities::CONTEXT);
    let rows: Vec<(&str, f32)> = PROBABILITIES
        .iter()
        .map(|p| (p.token, p.probability))
        .collect();
    println!("{}", probability_bars(&rows, 40, rows.len()));

    println!();
    for p in &PROBABILITIES {
        if let Some(n) = probabilities::one_in(p.probability) {
            println!("  #{:<2} {:>8}  about 1 in {n}", p.rank, p.token);
        }
    }
    println!(
        "\n  ...plus {} more tokens sharing the remaining {:.0}%",
        format_thousands(REMAINING_TOKENS as u64),
        (1.0 - probabilities::shown_mass()) * 100.0
    );
    Ok(())
}

fn run_sample(temperature: f32, seed: Option<u64>, draws: usize, json: bool) -> Result<()> {
    let mut config = SamplingConfig::default().with_temperature(temperature);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let mut sampler = Sampler::new(&config);
    let band = sampler.band();

    if json {
        let probs = sampler.probabilities(&BASE_LOGITS)?;
        let drawn = (0..draws)
            .map(|_| sampler.sample(&BASE_LOGITS))
            .collect::<llm_explainer::Result<Vec<_>>>()?;
        return print_json(&json!({
            "context": LOGIT_CONTEXT,
            "temperature": sampler.temperature(),
            "band": band,
            "logits": BASE_LOGITS,
            "probabilities": probs,
            "draws": drawn,
        }));
    }

    println!("📖 Context: \"{LOGIT_CONTEXT}\"");
    println!(
        "🌡  Temperature {:.2} ({}): {}\n",
        sampler.temperature(),
        band.label(),
        band.description()
    );

    let probs = sampler.probabilities(&BASE_LOGITS)?;
    let rows: Vec<(&str, f32)> = BASE_LOGITS
        .iter()
        .zip(probs.iter())
        .map(|(l, p)| (l.token, *p))
        .collect();
    println!("{}", probability_bars(&rows, 40, rows.len()));

    let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
    let mut drawn = Vec::with_capacity(draws);
    for _ in 0..draws {
        let token = sampler.sample(&BASE_LOGITS)?;
        *tally.entry(BASE_LOGITS[token.index].token).or_default() += 1;
        drawn.push(token.token);
    }
    println!("\n🎲 {draws} draws: {}", drawn.join(" "));
    let mut ranked: Vec<_> = tally.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    for (token, count) in ranked {
        println!("  {token:>8} ×{count}");
    }
    Ok(())
}

fn run_attention(json: bool) -> Result<()> {
    let focus = &ATTENTION_DATA[TARGET_INDEX];
    if json {
        return print_json(&json!({
            "focus": focus,
            "weights": ATTENTION_DATA,
            "arcs": llm_explainer::demos::attention::arcs(MIN_ARC_WEIGHT),
            "referent": llm_explainer::demos::attention::strongest_referent(),
        }));
    }
    println!(
        "📖 \"{}\"\n🔍 What does \"{}\" attend to?\n",
        llm_explainer::demos::attention::sentence(),
        focus.word
    );
    println!("{}", attention_bars(&ATTENTION_DATA, TARGET_INDEX, 30));

    println!("\nArcs (weight ≥ {MIN_ARC_WEIGHT}):");
    for arc in llm_explainer::demos::attention::arcs(MIN_ARC_WEIGHT) {
        let mark = if arc.emphasized { "★" } else { " " };
        println!("  {mark} {} → {} ({:.0}%)", focus.word, arc.word, arc.weight * 100.0);
    }
    if let Some(referent) = llm_explainer::demos::attention::strongest_referent() {
        println!("\n✅ \"{}\" refers to \"{}\"", focus.word, referent.word);
    }
    Ok(())
}

fn run_embeddings(word: Option<&str>, json: bool) -> Result<()> {
    if json {
        let related = word.map(related_words).transpose()?;
        return print_json(&json!({ "points": EMBEDDING_POINTS, "related": related }));
    }
    let points: Vec<(&str, _)> = EMBEDDING_POINTS
        .iter()
        .map(|p| (p.word, p.position))
        .collect();
    println!("{}\n", scatter_projection(&points, 48, 16));

    for cluster in Cluster::ALL {
        let words: Vec<&str> = cluster_members(cluster).iter().map(|p| p.word).collect();
        println!("  {:<12} {}", cluster.as_str(), words.join(", "));
    }

    if let Some(word) = word {
        let related = related_words(word)?;
        println!("\n🔍 Near \"{word}\":");
        if related.is_empty() {
            println!("  (nothing within reach)");
        }
        for point in related {
            println!("  {} ({})", point.word, point.cluster.as_str());
        }
    }
    Ok(())
}

fn run_analogy(json: bool) -> Result<()> {
    if json {
        let result = analogy("king", "man", "woman")?;
        return print_json(&json!({ "steps": ANALOGY_STEPS, "result": result }));
    }
    for (i, step) in ANALOGY_STEPS.iter().enumerate() {
        let text = format!("{}\n\n{}", step.equation, step.description);
        println!("{}\n", box_text(&text, &format!("{}. {}", i + 1, step.title), 65));
    }

    let result = analogy("king", "man", "woman")?;
    let p = result.position;
    println!("king − man + woman = ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z);
    for (point, distance) in result.neighbours.iter().take(3) {
        println!("  {:<10} {distance:.2}", point.word);
    }
    Ok(())
}

fn run_clusters(name: Option<&str>, json: bool) -> Result<()> {
    if json {
        return match name {
            Some(name) => {
                let cluster = find_cluster(name)?;
                print_json(&json!({ "cluster": cluster, "terms": cluster.term_positions() }))
            }
            None => print_json(&json!({ "clusters": CLUSTERS, "connections": connections() })),
        };
    }
    match name {
        Some(name) => {
            let cluster = find_cluster(name)?;
            println!("{} ({})", cluster.name, cluster.color);
            for (term, position) in cluster.term_positions() {
                println!(
                    "  {term:<14} ({:5.2}, {:5.2}, {:5.2})",
                    position.x, position.y, position.z
                );
            }
        }
        None => {
            for cluster in &CLUSTERS {
                println!("  {:<10} {}", cluster.name, cluster.terms.join(", "));
            }
            println!();
            for link in connections() {
                println!("  {} ┄ {} ({:.1})", link.from, link.to, link.length);
            }
        }
    }
    Ok(())
}

fn run_overview(json: bool) -> Result<()> {
    if json {
        return print_json(&PROCESS_STEPS);
    }
    println!("{}\n", pipeline_strip(None));
    for step in &PROCESS_STEPS {
        println!("  {} {}. {}", step.icon, step.id, step.title);
        println!("     {}", step.description);
    }
    if let Some(explanation) = get_explanation("generation_loop") {
        println!("\n💡 {}", explanation.get(ExplanationLevel::Medium));
    }
    Ok(())
}

async fn run_stats(json: bool) -> Result<()> {
    if json {
        return print_json(&json!({
            "tokens": CONTEXT_TOKENS,
            "words": CONTEXT_WORDS,
            "word_ratio_percent": word_ratio_percent(),
        }));
    }
    animate_counter("Tokens", CounterAnimation::new(CONTEXT_TOKENS)).await?;
    tokio::time::sleep(REVEAL_DELAY).await;
    animate_counter("Words ", CounterAnimation::new(CONTEXT_WORDS)).await?;
    println!("\n≈{}% as many words as tokens", word_ratio_percent());
    Ok(())
}

async fn animate_counter(label: &str, counter: CounterAnimation) -> Result<()> {
    let mut stdout = io::stdout();
    let started = tokio::time::Instant::now();
    let mut ticker = tokio::time::interval(Duration::from_millis(50));
    loop {
        ticker.tick().await;
        let elapsed = started.elapsed();
        write!(
            stdout,
            "\r  {label}: {:>6}",
            format_thousands(counter.value_at(elapsed))
        )?;
        stdout.flush()?;
        if counter.is_done(elapsed) {
            break;
        }
    }
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
        let mut full_args = vec!["llm-explainer"];
        full_args.extend(args);
        Cli::try_parse_from(full_args)
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(verbosity_to_log_level(0), "warn");
        assert_eq!(verbosity_to_log_level(2), "debug");
        assert_eq!(verbosity_to_log_level(9), "trace");
    }

    #[test]
    fn test_generate_args() {
        let cli = parse_args(&["-vv", "generate", "--speed", "2"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.command,
            Commands::Generate {
                speed: Some(2.0),
                config: None,
                quiet: false,
                interactive: false,
            }
        );
        assert!(!cli.json);
    }

    #[test]
    fn test_interactive_and_json_flags() {
        let cli = parse_args(&["generate", "-i", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Generate {
                interactive: true,
                ..
            }
        ));

        let cli = parse_args(&["probabilities", "--json"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn test_parse_controls() {
        assert_eq!(Control::parse("p"), Some(Control::PlayPause));
        assert_eq!(Control::parse("  r \n"), Some(Control::Reset));
        assert_eq!(Control::parse("+"), Some(Control::Faster));
        assert_eq!(Control::parse("-"), Some(Control::Slower));
        assert_eq!(Control::parse("quit"), Some(Control::Quit));
        assert_eq!(Control::parse("x"), None);
        assert_eq!(Control::parse(""), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_controls_drive_sequencer() {
        let sequencer = GenerationSequencer::new(SequencerConfig::default()).unwrap();

        assert!(Control::PlayPause.apply(&sequencer));
        assert!(sequencer.snapshot().is_running);

        assert!(Control::Faster.apply(&sequencer));
        assert!(Control::Faster.apply(&sequencer));
        assert_eq!(sequencer.snapshot().speed_multiplier, 2.0);
        assert!(Control::Slower.apply(&sequencer));
        assert_eq!(sequencer.snapshot().speed_multiplier, 1.5);

        tokio::time::sleep(Duration::from_millis(4000)).await;
        assert!(Control::PlayPause.apply(&sequencer));
        let paused = sequencer.snapshot();
        assert!(!paused.is_running);
        assert_eq!(paused.emitted_tokens.len(), 1);

        assert!(Control::Reset.apply(&sequencer));
        assert!(sequencer.snapshot().emitted_tokens.is_empty());

        assert!(!Control::Quit.apply(&sequencer));
    }

    #[test]
    fn test_snapshot_serializes_for_json_output() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let sequencer = GenerationSequencer::with_handle(
            SequencerConfig::default(),
            runtime.handle().clone(),
        )
        .unwrap();
        sequencer.start();

        let value = serde_json::to_value(sequencer.snapshot()).unwrap();
        assert_eq!(value["is_running"], true);
        assert_eq!(value["current_sub_step"], "tokenize");
        assert_eq!(value["total_tokens"], 6);
    }

    #[test]
    fn test_sample_defaults() {
        let cli = parse_args(&["sample"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Sample {
                temperature: 0.7,
                seed: None,
                draws: 20
            }
        );
    }
}
