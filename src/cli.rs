//! Minimal CLI: check | parse | expand
use std::path::PathBuf;
use clap::{Parser, Subcommand, Args};
use colored::Colorize;
use rayon::prelude::*;

use crate::definition::ConcreteDefinition;
use crate::document::Document;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// check and parse API type expressions, and expand generic definitions of API documents
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// validate type expressions, e.g. `Page<integer#int64>[]`
    Check(CheckCmd),
    /// print the parsed tree of one type expression
    Parse(ParseCmd),
    /// expand the generic definitions of one or more JSON documents
    Expand(ExpandCmd),
}

#[derive(clap::Parser, Debug)]
struct CheckCmd {
    /// type expressions to check
    #[arg(required = true)]
    types: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct ParseCmd {
    /// type expression to parse
    typ: String,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more JSON documents. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct ExpandCmd {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Load every input document. Order follows the command line.
    fn load_documents(&self) -> anyhow::Result<Vec<(PathBuf, Document)>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        source_paths
            .into_iter()
            .map(|path| {
                let doc = crate::path_de::load_json_file::<Document>(&path)?;
                Ok((path, doc))
            })
            .collect()
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Check(target) => {
                let mut failures = 0usize;
                for typ in &target.types {
                    match crate::grammar::check_type_name(typ) {
                        Ok(()) => println!("{} {typ}", "ok".green()),
                        Err(error) => {
                            failures += 1;
                            println!("{} {typ}", "invalid".red());
                            eprintln!("  {}", error.to_string().dimmed());
                        }
                    }
                }
                if failures > 0 {
                    anyhow::bail!("{failures} of {} type(s) failed to check", target.types.len());
                }
                Ok(())
            }
            Command::Parse(target) => {
                let tree = crate::grammar::parse_api_type(&target.typ)?;
                print!("{tree}");
                Ok(())
            }
            Command::Expand(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }

                // 1) load documents
                let documents = target.input_settings.load_documents()?;

                // 2) expand, one registry per document
                let expanded = documents
                    .par_iter()
                    .map(|(path, doc)| {
                        doc.expand_definitions()
                            .map_err(|error| anyhow::anyhow!("{}: {error}", path.display()))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?;

                // 3) render listing
                let listing = documents
                    .iter()
                    .zip(&expanded)
                    .map(|((path, _), defs)| render_listing(path, defs, documents.len() > 1))
                    .collect::<Vec<_>>()
                    .join("\n");
                let total: usize = expanded.iter().map(Vec::len).sum();
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(out, &listing)?;
                    eprintln!("{} {total} definition(s) → {}", "wrote".green(), out.display());
                } else {
                    println!("{listing}");
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn render_listing(
    path: &std::path::Path,
    defs: &[ConcreteDefinition],
    with_header: bool,
) -> String {
    let mut out = String::new();
    if with_header {
        out.push_str(&format!("# {}\n", path.display()));
    }
    for def in defs {
        out.push_str(&format!("{def}\n"));
    }
    out
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                anyhow::bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
