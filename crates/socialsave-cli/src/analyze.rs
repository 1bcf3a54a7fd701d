use socialsave_core::AppConfig;
use socialsave_gemini::Analyzer;

use crate::history::open_history;
use crate::render;

/// Analyze `url`, record the result, and print it.
///
/// A failure to persist history is logged and does not hide the result.
///
/// # Errors
///
/// Returns the analysis error (its message is user-facing) or a
/// serialization error when `--json` output cannot be produced.
pub(crate) async fn run_analyze(config: &AppConfig, url: &str, json: bool) -> anyhow::Result<()> {
    let analyzer = Analyzer::from_config(config)?;
    let mut history = open_history(&config.data_dir);

    let platform = socialsave_core::detect_platform(url);
    if !json {
        println!("analyzing {} post...", platform.display_name());
    }

    let post = analyzer.analyze(url).await?;

    if let Err(e) = history.record(post.clone()) {
        tracing::warn!(error = %e, "analysis succeeded but history could not be saved");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        println!();
        print!("{}", render::card(&post));
    }
    Ok(())
}
