use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use xml_compare_core::{
    cdata_as_text, compare_with_options, format_json, parse_file, reordered_children_as_similar,
    strip_comments, trim_text, write, write_file, DiffOptions, Document, ElementSelector,
    NodeMatcher, StopPolicy,
};

mod cli;
mod report;

use cli::{Cli, Command, DiffArgs, InspectArgs, NormalizeArgs, OutputFormat};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Diff(args) => run_diff(args),
        Command::Inspect(args) => run_inspect(args).map(|()| ExitCode::SUCCESS),
        Command::Normalize(args) => run_normalize(args).map(|()| ExitCode::SUCCESS),
    }
}

fn run_diff(args: DiffArgs) -> Result<ExitCode> {
    let control = load_path(&args, &args.control)?;
    let test = load_path(&args, &args.test)?;

    let mut options = DiffOptions {
        stop_policy: if args.fail_fast {
            StopPolicy::FailFast
        } else {
            StopPolicy::FullEnumeration
        },
        ignore_attribute_order: args.ignore_attr_order,
        ..DiffOptions::default()
    };
    if !args.key_attrs.is_empty() {
        options.matcher = NodeMatcher::new(ElementSelector::ByNameAndAttributes(
            args.key_attrs.clone(),
        ));
    }
    if args.cdata_as_text {
        options.evaluators.push(cdata_as_text());
    }
    if args.reorder_similar {
        options.evaluators.push(reordered_children_as_similar());
    }

    let result = compare_with_options(&control, &test, &options);

    match args.format {
        OutputFormat::Json => println!("{}", format_json(&result)),
        OutputFormat::Text => {
            if !args.quiet && !result.differences.is_empty() {
                println!("{}", report::render_text(&result));
            }
            println!("{}", report::render_summary(&result));
        }
    }

    Ok(if result.similar {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn load_path(args: &DiffArgs, path: &std::path::Path) -> Result<Document> {
    let mut doc =
        parse_file(path).with_context(|| format!("failed to parse {}", path.display()))?;
    if args.ignore_comments {
        doc = strip_comments(&doc);
    }
    if args.ignore_whitespace {
        doc = trim_text(&doc);
    }
    Ok(doc)
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let doc = parse_file(&args.file)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    println!("{}", report::render_tree(&doc, args.depth));
    Ok(())
}

fn run_normalize(args: NormalizeArgs) -> Result<()> {
    let mut doc = parse_file(&args.file)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    if args.strip_comments {
        doc = strip_comments(&doc);
    }
    if args.trim_text {
        doc = trim_text(&doc);
    }

    match &args.output {
        Some(path) => write_file(&doc, path)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let bytes = write(&doc).context("failed to serialize document")?;
            println!("{}", String::from_utf8_lossy(&bytes));
        }
    }
    Ok(())
}
