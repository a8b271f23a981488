// src/lib.rs

pub mod catalog;
pub mod cli;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod plan;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::catalog::loader::load_and_validate;
use crate::cli::{CliArgs, NotesFormat, OutputFormat};
use crate::plan::wire::to_prefixed;
use crate::plan::{NoteEncoding, PlanResult, encode_plan, plan_catalog};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - catalog loading
/// - the planning engine
/// - wire encoding and output
pub fn run(args: CliArgs) -> Result<()> {
    let catalog_path = PathBuf::from(&args.catalog);
    let mut catalog = load_and_validate(&catalog_path)
        .with_context(|| format!("loading catalog from {:?}", catalog_path))?;

    if let Some(cap) = args.cap {
        debug!(cap, "overriding credit cap from CLI");
        catalog.set_cap(cap);
    }

    if args.dry_run {
        print_dry_run(&catalog);
        return Ok(());
    }

    let plan = plan_catalog(&catalog);
    info!(
        feasible = plan.feasible,
        terms = plan.total_terms,
        credits = plan.total_credits,
        "plan built"
    );

    let rendered = match args.format {
        OutputFormat::Json => {
            let encoding = match args.notes {
                NotesFormat::Structured => NoteEncoding::Structured,
                NotesFormat::Prefixed => NoteEncoding::Prefixed,
            };
            let wire = encode_plan(&plan, encoding);
            serde_json::to_string_pretty(&wire).context("serializing plan to JSON")?
        }
        OutputFormat::Summary => render_summary(&plan),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered.as_bytes())
                .with_context(|| format!("writing plan to {path}"))?;
            info!(path = %path, "plan written");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Simple dry-run output: print courses, credits and references.
fn print_dry_run(catalog: &Catalog) {
    let c = catalog.constraints();
    println!("termdag dry-run");
    println!("  constraints.max_credits_per_term = {}", c.max_credits_per_term);
    if let Some(min) = c.min_credits_per_term {
        println!("  constraints.min_credits_per_term = {min}");
    }
    if let Some(max_terms) = c.max_terms {
        println!("  constraints.max_terms = {max_terms}");
    }
    println!(
        "  constraints.enforce_coreq_together = {}",
        c.enforce_coreq_together
    );
    println!();

    println!("courses ({}):", catalog.len());
    for course in catalog.courses() {
        println!("  - {}", course.id);
        if let Some(ref name) = course.name {
            println!("      name: {name}");
        }
        println!("      credits: {}", course.credits);
        if !course.prerequisites.is_empty() {
            println!("      prereq: {:?}", course.prerequisites);
        }
        if !course.corequisites.is_empty() {
            println!("      coreq: {:?}", course.corequisites);
        }
    }

    debug!("dry-run complete (no planning)");
}

/// Terse human-readable rendering for terminal use.
fn render_summary(plan: &PlanResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "plan: {} ({} terms, {} credits)\n",
        if plan.feasible { "feasible" } else { "INFEASIBLE" },
        plan.total_terms,
        plan.total_credits
    ));

    for term in &plan.terms {
        out.push_str(&format!("  term {} ({}cr):", term.index, term.credits));
        for course in &term.courses {
            out.push_str(&format!(" {}[{}cr]", course.id, course.credits));
        }
        out.push('\n');
    }

    if !plan.notes.is_empty() {
        out.push_str("notes:\n");
        for note in &plan.notes {
            out.push_str(&format!("  {}\n", to_prefixed(note)));
            if let Some(ref action) = note.action {
                out.push_str(&format!("    -> {action}\n"));
            }
        }
    }

    out
}
