use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use lesson_tree_lib::snapshot::load_site;
use lesson_tree_lib::{Correction, ReferenceProblem, Repairer, Settings};

use crate::CliError;

/// Run the check command: compute corrections but apply none.
pub(crate) fn run_check(input: PathBuf, offline: bool) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let site = load_site(&input)?;
    let probe = super::build_probe(&settings, offline)?;
    let repairer = Repairer::new(probe.as_ref()).with_options(settings.repair_options());

    let missing = repairer.missing_corrections(&site);
    let empty = repairer.empty_corrections(&site);

    if missing.is_empty() && empty.is_empty() {
        log::info!(
            "{}",
            "No broken or empty references".if_supports_color(Stdout, |t| t.green()),
        );
        return Ok(());
    }

    for (problem, corrections) in [
        (ReferenceProblem::MissingReference, &missing),
        (ReferenceProblem::EmptyReference, &empty),
    ] {
        if corrections.is_empty() {
            continue;
        }
        log::info!(
            "{}",
            format!("{} {problem} references", corrections.len())
                .if_supports_color(Stdout, |t| t.bold()),
        );
        for (id, correction) in corrections {
            print_correction(id, correction);
        }
        crate::log_blank();
    }
    Ok(())
}

fn print_correction(id: &str, correction: &Correction) {
    let verdict = if correction.is_applicable() {
        "fixable".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "review".if_supports_color(Stdout, |t| t.yellow()).to_string()
    };
    log::info!("  [{verdict}] {} {id}", correction.slot);
    log::info!("    referenced by: {}", correction.parents.join(", "));

    match correction.best_guess() {
        Some(best) => {
            let mut evidence = Vec::new();
            if correction.is_404 {
                evidence.push("404");
            }
            if correction.is_confirmed {
                evidence.push("same content");
            }
            log::info!(
                "    best guess: {} {}",
                best.if_supports_color(Stdout, |t| t.cyan()),
                if evidence.is_empty() {
                    String::new()
                } else {
                    format!("({})", evidence.join(", "))
                },
            );
            if correction.guesses.len() > 1 {
                log::debug!("    other guesses: {}", correction.guesses[1..].join(", "));
            }
        }
        None => log::info!(
            "    {}",
            "no similar identifiers".if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }
}
