//! Syllabus command-line entry point.
//!
//! Loads configuration, wires the cache and datastore gateway, and prints
//! one listing:
//!
//! ```text
//! syllabus chapters <curriculum> <grade> <subject>
//! syllabus tests <curriculum> <grade> <subtype>
//! ```

use std::sync::Arc;

use anyhow::bail;
use tracing::info;
use tracing_subscriber::EnvFilter;

use syllabus::models::DEFAULT_LANG;
use syllabus::resources::chapters::{ChapterScope, chapters_view};
use syllabus::resources::papers::{TestScope, tests_view};
use syllabus::views::SortState;
use syllabus::{CacheConfig, Config, HttpGateway, ResourceCache, Services, spawn_sweeper};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const USAGE: &str = "usage: syllabus chapters <curriculum> <grade> <subject>\n       syllabus tests <curriculum> <grade> <subtype>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("syllabus=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = Config::from_env()?;
    info!("Configuration loaded, datastore at {}", config.db_service_endpoint);

    let cache = ResourceCache::new(CacheConfig::from_config(&config));
    let sweeper = spawn_sweeper(cache.clone());
    info!("Resource cache initialized");

    let gateway = Arc::new(HttpGateway::from_config(&config)?);
    let services = Services::new(&cache, gateway);
    let sort = SortState::new("1", Default::default());

    match (command.as_str(), &args[1..]) {
        ("chapters", [curriculum, grade, subject]) => {
            let scope = ChapterScope::parse(curriculum, grade, subject)?;
            for chapter in chapters_view(&services, scope, &sort).await? {
                let chapter = chapter.read();
                println!(
                    "{}\t{}\t{}\t{} topics",
                    chapter.id,
                    chapter.code,
                    chapter.name_by_lang(DEFAULT_LANG),
                    chapter.topic_count()
                );
            }
        }
        ("tests", [curriculum, grade, subtype]) => {
            let scope = TestScope::parse(curriculum, grade, subtype)?;
            for test in tests_view(&services, &scope, &sort).await? {
                let test = test.read();
                println!(
                    "{}\t{}\t{}\t{} problems\t{} marks\t{} min",
                    test.id,
                    test.code,
                    test.name_by_lang(DEFAULT_LANG),
                    test.problem_count(),
                    test.type_params.marks,
                    test.duration_minutes()
                );
            }
        }
        _ => {
            sweeper.abort();
            bail!("unknown command\n{}", USAGE);
        }
    }

    sweeper.abort();
    Ok(())
}
