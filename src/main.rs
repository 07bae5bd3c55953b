// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Brainwiki CLI entrypoint.
//!
//! Loads a wiki snapshot (a JSON file, or the built-in welcome wiki with `--demo`) and runs one
//! command against it. Logs go to stderr; filter them with `RUST_LOG`.

use std::error::Error;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use brainwiki::config::WikiConfig;
use brainwiki::define::{DefinitionProvider, GeminiDefiner, LookupSlot};
use brainwiki::index::TermKind;
use brainwiki::model::{demo_snapshot, FolderId, NoteId, Vault};
use brainwiki::query::{self, SearchMode, SortOrder};
use brainwiki::segment::Segment;
use brainwiki::store::{SnapshotFile, SnapshotSource, WriteDurability};
use brainwiki::wiki::{Wiki, WikiOp};

const DEFAULT_SNAPSHOT: &str = "brainwiki.json";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--snapshot <file> | --demo] [--durable-writes] <command>\n\nCommands:\n  terms                 list linkable terms, longest first\n  render <title>        print a note with links as [[note]] and {{{{folder}}}}\n  tree                  print folders and notes\n  search [--fuzzy] <q>  search note titles\n  define [--in <title>] <term>\n                        ask the definition service about a term, with the\n                        body of note <title> as context\n  apply <ops.json>      apply a JSON array of ops and save the snapshot\n\nWithout --snapshot, {DEFAULT_SNAPSHOT} in the current directory is used.\n--demo uses the built-in welcome wiki and never writes.\n--durable-writes syncs the snapshot file to disk on save."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Terms,
    Render { title: String },
    Tree,
    Search { needle: String, mode: SearchMode },
    /// `context_title` names the note the term was read in.
    Define { term: String, context_title: Option<String> },
    Apply { ops_path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    snapshot: Option<PathBuf>,
    durable_writes: bool,
    command: Command,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut demo = false;
    let mut snapshot = None;
    let mut durable_writes = false;
    let mut fuzzy = false;
    let mut context_title = None;
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if demo {
                    return Err(());
                }
                demo = true;
            }
            "--snapshot" => {
                if snapshot.is_some() {
                    return Err(());
                }
                snapshot = Some(PathBuf::from(args.next().ok_or(())?));
            }
            "--durable-writes" => {
                if durable_writes {
                    return Err(());
                }
                durable_writes = true;
            }
            "--fuzzy" => {
                if fuzzy {
                    return Err(());
                }
                fuzzy = true;
            }
            "--in" => {
                if context_title.is_some() {
                    return Err(());
                }
                context_title = Some(args.next().ok_or(())?);
            }
            _ if arg.starts_with("--") => return Err(()),
            _ => positional.push(arg),
        }
    }

    if demo && (snapshot.is_some() || durable_writes) {
        return Err(());
    }

    let mut positional = positional.into_iter();
    let name = positional.next().ok_or(())?;
    let rest = positional.collect::<Vec<_>>();
    let joined = || rest.join(" ");

    let command = match (name.as_str(), rest.len()) {
        ("terms", 0) => Command::Terms,
        ("tree", 0) => Command::Tree,
        ("render", n) if n > 0 => Command::Render { title: joined() },
        ("search", n) if n > 0 => {
            let mode = if fuzzy { SearchMode::Fuzzy } else { SearchMode::Substring };
            Command::Search { needle: joined(), mode }
        }
        ("define", n) if n > 0 => {
            Command::Define { term: joined(), context_title: context_title.take() }
        }
        ("apply", 1) => Command::Apply { ops_path: PathBuf::from(&rest[0]) },
        _ => return Err(()),
    };

    if fuzzy && !matches!(command, Command::Search { .. }) {
        return Err(());
    }
    if context_title.is_some() {
        return Err(());
    }
    if matches!(command, Command::Apply { .. }) && demo {
        return Err(());
    }

    Ok(CliOptions { demo, snapshot, durable_writes, command })
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn format_terms(wiki: &Wiki) -> String {
    let mut out = String::new();
    for term in wiki.index().terms() {
        let kind = match term.kind() {
            TermKind::Note => "note",
            TermKind::Folder => "folder",
        };
        let _ = writeln!(out, "{kind:<6}  {}", term.term());
    }
    out
}

fn format_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => text.clone(),
            Segment::NoteRef { text, .. } => format!("[[{text}]]"),
            Segment::FolderRef { text, .. } => format!("{{{{{text}}}}}"),
        })
        .collect()
}

fn format_tree(vault: &Vault) -> String {
    fn walk(vault: &Vault, parent: Option<&FolderId>, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        for folder in query::child_folders(vault, parent) {
            let _ = writeln!(out, "{indent}{}/", folder.name());
            walk(vault, Some(folder.id()), depth + 1, out);
        }
        for note in query::notes_in_folder(vault, parent, SortOrder::Alphabetical) {
            let _ = writeln!(out, "{indent}{}", note.title());
        }
    }

    let mut out = String::new();
    walk(vault, None, 0, &mut out);
    out
}

fn note_id_by_title(wiki: &Wiki, title: &str) -> Result<NoteId, Box<dyn Error>> {
    let note = wiki.vault().find_note_by_title(title);
    note.map(|note| note.id().clone()).ok_or_else(|| format!("no note titled '{title}'").into())
}

fn run_render(wiki: &mut Wiki, title: &str) -> Result<String, Box<dyn Error>> {
    let note_id = note_id_by_title(wiki, title)?;
    wiki.select_note(&note_id)?;

    let mut out = String::new();
    if let Some(note) = wiki.active_note() {
        let _ = writeln!(out, "# {}", note.title());
    }
    if let Some(path) = wiki.active_note_path() {
        let _ = writeln!(out, "in {path}");
    }
    out.push('\n');
    if let Some(segments) = wiki.render_active() {
        out.push_str(&format_segments(&segments));
        out.push('\n');
    }

    let backlinks = wiki.backlinks(&note_id);
    if !backlinks.is_empty() {
        out.push_str("\nLinked from:\n");
        for note in backlinks {
            let _ = writeln!(out, "  {}", note.title());
        }
    }
    Ok(out)
}

/// Body of the note the term was read in, which becomes the active note. Empty without one.
fn definition_context(
    wiki: &mut Wiki,
    context_title: Option<&str>,
) -> Result<String, Box<dyn Error>> {
    let Some(title) = context_title else {
        return Ok(String::new());
    };
    let note_id = note_id_by_title(wiki, title)?;
    wiki.select_note(&note_id)?;
    Ok(wiki.active_note().map(|note| note.content().to_owned()).unwrap_or_default())
}

fn run_define(
    wiki: &mut Wiki,
    term: &str,
    context_title: Option<&str>,
) -> Result<String, Box<dyn Error>> {
    let context = definition_context(wiki, context_title)?;

    let definer = GeminiDefiner::new(wiki.config().define.clone());
    let mut slot = LookupSlot::new();
    let ticket = slot.begin(term);

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let text = runtime.block_on(definer.define(term, &context));

    let definition = slot.complete(ticket, text).ok_or("definition lookup was superseded")?;
    Ok(format!("{}: {}\n", definition.term, definition.text))
}

fn run_apply(
    wiki: &mut Wiki,
    file: &SnapshotFile,
    ops_path: &Path,
) -> Result<String, Box<dyn Error>> {
    let raw = std::fs::read_to_string(ops_path)?;
    let ops: Vec<WikiOp> = serde_json::from_str(&raw)?;
    let applied = wiki.apply_all(ops)?;
    file.save(&wiki.snapshot())?;
    Ok(format!("{}\n", serde_json::to_string_pretty(&applied)?))
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "brainwiki".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_logging();
        let config = WikiConfig::from_env();

        let file = {
            let path = options.snapshot.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT));
            let durability = if options.durable_writes {
                WriteDurability::Durable
            } else {
                WriteDurability::BestEffort
            };
            SnapshotFile::new(path).with_durability(durability)
        };
        let snapshot = if options.demo { demo_snapshot() } else { file.load_or_default()? };
        let mut wiki = Wiki::from_snapshot(snapshot, config);

        let output = match &options.command {
            Command::Terms => format_terms(&wiki),
            Command::Tree => format_tree(wiki.vault()),
            Command::Render { title } => run_render(&mut wiki, title)?,
            Command::Search { needle, mode } => {
                query::search_notes(wiki.vault(), needle, *mode, SortOrder::UpdatedAt)
                    .iter()
                    .map(|note| format!("{}\n", note.title()))
                    .collect()
            }
            Command::Define { term, context_title } => {
                run_define(&mut wiki, term, context_title.as_deref())?
            }
            Command::Apply { ops_path } => run_apply(&mut wiki, &file, ops_path)?,
        };
        print!("{output}");
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("brainwiki: {err}");
        std::process::exit(1);
    }
}
