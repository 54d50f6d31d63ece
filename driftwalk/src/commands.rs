use crate::CLAP_STYLING;
use clap::arg;
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("driftwalk")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("driftwalk")
        .styles(CLAP_STYLING)
        .about(
            "Wanders the web from a seed URL: renders a page, picks one of its \
            links at random, and follows it until the trail runs out.",
        )
        .arg(
            arg!(-u --"url" <URL>)
                .required(false)
                .help("Seed URL to start walking from")
                .value_parser(clap::value_parser!(Url))
                .default_value("https://www.wikipedia.org/"),
        )
        .arg(
            arg!(-d --"max-depth" <DEPTH>)
                .required(false)
                .help("Maximum number of pages to walk through")
                .value_parser(clap::value_parser!(u32).range(1..))
                .default_value("3"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Per-page render timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("30"),
        )
        .arg(
            arg!(-s --"selector" <SELECTOR>)
                .required(false)
                .help("CSS selector for anchor extraction (e.g. 'a.titlelink')")
                .default_value("a"),
        )
        .arg(
            arg!(--"rng-seed" <SEED>)
                .required(false)
                .help("Seed the link-selection RNG for a reproducible walk")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Save report to file (default: display to screen)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Report format: text, json")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
}
