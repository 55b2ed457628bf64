//! Tafsir CLI - Quranic commentary viewer and translator.

use anyhow::{Context, Result};
use clap::Parser;
use tafsir::cache::{CacheKey, FileCache, TranslationCache};
use tafsir::config::{Config, JoinMode};
use tafsir::console::Console;
use tafsir::corpus::TafsirLibrary;
use tafsir::language::Language;
use tafsir::provider::GoogleTranslateProvider;
use tafsir::translator::TafsirTranslator;

/// Quranic commentary viewer and translator.
#[derive(Parser, Debug)]
#[command(name = "tafsir")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Tafsir author (directory name under the data directory).
    author: String,

    /// Surah number (1-114).
    #[arg(value_parser = clap::value_parser!(u32).range(1..=114))]
    surah: u32,

    /// Ayah number (1-based).
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    ayah: u32,

    /// Target language code; defaults to the configured language.
    #[arg(long = "to")]
    target: Option<String>,

    /// Source language (ar or ur); detected automatically when omitted.
    #[arg(long = "from")]
    source: Option<Language>,

    /// Join translated chunks as paragraphs instead of flowing text.
    #[arg(long)]
    paragraphs: bool,

    /// Bypass the translation cache for both reads and writes.
    #[arg(long)]
    no_cache: bool,

    /// Print the full translation report as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let console = Console::new();

    console.section("Tafsir - Qur'anic Commentary Translator");

    // Load configuration
    console.step("Loading configuration...");
    let config = Config::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    console.success("Configuration loaded");

    let target = args
        .target
        .clone()
        .unwrap_or_else(|| config.translation.target_lang.clone());

    // Load the corpus
    console.step("Loading tafsir corpus...");
    let library = TafsirLibrary::load(&config.paths.data_directory)
        .context("Failed to load tafsir data")?;
    console.success(&format!(
        "Loaded {} entries from {} authors",
        library.len(),
        library.authors().len()
    ));

    let entry = library
        .find(&args.author, args.surah, args.ayah)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No tafsir by '{}' for surah {} ayah {}",
                args.author,
                args.surah,
                args.ayah
            )
        })?;
    console.info(&format!(
        "Surah {} ({}) - Ayah {}",
        entry.surah_name_arabic, entry.surah_name_english, entry.ayah_number
    ));

    // Serve from cache when possible
    let cache = FileCache::new(config.cache_dir()?);
    let key = CacheKey::new(&target, &args.author, args.surah, args.ayah);
    if !args.no_cache {
        if let Some(cached) = cache.get(&key).context("Failed to read translation cache")? {
            console.success("Serving translation from cache");
            println!("\n{}", cached);
            return Ok(());
        }
    }

    // Translate
    let mut translation_config = config.translation.clone();
    if args.paragraphs {
        translation_config.join_mode = JoinMode::Paragraphs;
    }
    let provider = GoogleTranslateProvider::new(&config.provider);
    let translator = TafsirTranslator::new(Box::new(provider), translation_config);

    console.step(&format!(
        "Translating {} characters to '{}'...",
        entry.tafsir_text.chars().count(),
        target
    ));
    let report = translator
        .translate(&entry.tafsir_text, args.source, &target)
        .await;

    console.success(&format!(
        "Source language: {}",
        console.detection(&report.language_label, report.detection_confidence)
    ));
    console.info(&format!(
        "{} chunks translated, {} succeeded",
        report.total_chunks,
        console.rate(report.success_rate)
    ));
    for chunk_id in &report.failed_chunks {
        console.warning(&format!("Chunk {} failed to translate", chunk_id));
    }

    // Only fully successful translations are cached.
    if !args.no_cache && report.failed_chunks.is_empty() {
        cache
            .put(&key, &report.translated_text)
            .context("Failed to write translation cache")?;
        console.success("Translation cached");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n{}", report.translated_text);
    }

    Ok(())
}
