use driftwalk::report::generate_walk_report;
use driftwalk_walker::{HttpRenderer, RenderOptions, WaitUntil, Walker};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use url::Url;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = commands::command_argument_builder();
    let matches = cmd.get_matches();
    let quiet = matches.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let seed_url = matches.get_one::<Url>("url").unwrap();
    let max_depth = *matches.get_one::<u32>("max-depth").unwrap();
    let timeout_secs = *matches.get_one::<u64>("timeout").unwrap();
    let selector = matches.get_one::<String>("selector").unwrap();
    let rng_seed = matches.get_one::<u64>("rng-seed").copied();
    let output = matches.get_one::<PathBuf>("output");
    let format = matches.get_one::<String>("format").unwrap();

    let renderer = match HttpRenderer::with_selector(selector) {
        Ok(renderer) => renderer,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    if !quiet {
        println!("\n🥾 Walking from {}", seed_url);
        println!("Max depth: {}", max_depth);
        println!("Selector: {}", selector);
        match rng_seed {
            Some(seed) => println!("RNG seed: {}\n", seed),
            None => println!("RNG seed: from entropy\n"),
        }
    }

    // Spinner showing the in-flight page
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Starting walk...");

    let spinner_clone = spinner.clone();
    let progress_callback = Arc::new(move |depth: u32, url: String| {
        spinner_clone.set_message(format!("depth {}: {}", depth, url));
    });

    let options = RenderOptions {
        wait_until: WaitUntil::DomReady,
        timeout: Duration::from_secs(timeout_secs),
    };

    let mut walker = Walker::new(renderer)
        .with_max_depth(max_depth)
        .with_render_options(options)
        .with_progress_callback(progress_callback);
    if let Some(seed) = rng_seed {
        walker = walker.with_rng_seed(seed);
    }

    // The walk itself cannot fail; bad hops are folded into the report
    let report = walker.walk(seed_url.as_str()).await;

    spinner.finish_and_clear();
    info!(
        "Walk over {} page(s): {}",
        report.pages_rendered(),
        report.stopped.describe()
    );

    if !quiet {
        println!("✓ Walk complete!\n");
    }

    let rendered = match format.as_str() {
        "json" => {
            serde_json::to_string_pretty(&report).expect("walk report serializes to JSON") + "\n"
        }
        _ => generate_walk_report(&report),
    };

    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &rendered) {
                eprintln!("✗ Failed to write report to {}: {}", path.display(), e);
                std::process::exit(1);
            }
            if !quiet {
                println!("Report written to {}", path.display());
            }
        }
        None => print!("{}", rendered),
    }
}

fn print_banner() {
    println!(
        r#"
     _      _  __ _                _ _
  __| |_ __(_)/ _| |___      ____ _| | | __
 / _` | '__| | |_| __\ \ /\ / / _` | | |/ /
| (_| | |  | |  _| |_ \ V  V / (_| | |   <
 \__,_|_|  |_|_|  \__| \_/\_/ \__,_|_|_|\_\
"#
    );
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
