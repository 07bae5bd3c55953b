// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Brainwiki-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Brainwiki and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};

use rstest::{fixture, rstest};

use brainwiki::config::WikiConfig;
use brainwiki::define::{DefinitionProvider, LookupSlot, StaticDefiner};
use brainwiki::index::{TermIndex, TermTarget};
use brainwiki::model::{CreateNote, FolderId, NoteId, Snapshot};
use brainwiki::segment::{join, segment, Segment, WordTarget};
use brainwiki::store::{SnapshotFile, SnapshotSource};
use brainwiki::wiki::{ApplyError, Wiki, WikiOp};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn nid(value: &str) -> NoteId {
    NoteId::new(value).expect("note id")
}

fn fid(value: &str) -> FolderId {
    FolderId::new(value).expect("folder id")
}

fn text(value: &str) -> Segment {
    Segment::Text(value.to_owned())
}

fn note_ref(value: &str, id: &str) -> Segment {
    Segment::NoteRef { text: value.to_owned(), note_id: nid(id) }
}

fn folder_ref(value: &str, id: &str) -> Segment {
    Segment::FolderRef { text: value.to_owned(), folder_id: fid(id) }
}

fn load_fixture() -> Snapshot {
    SnapshotFile::new(fixture_path("overlapping_terms.json"))
        .load()
        .unwrap_or_else(|err| panic!("failed to load fixture snapshot: {err}"))
}

#[fixture]
fn snapshot() -> Snapshot {
    load_fixture()
}

#[fixture]
fn wiki(snapshot: Snapshot) -> Wiki {
    Wiki::from_snapshot(snapshot, WikiConfig::default())
}

#[rstest]
fn creating_an_existing_title_returns_the_existing_note(mut wiki: Wiki) {
    for title in ["Ownership", "OWNERSHIP", "ownership"] {
        let result = wiki.create_note(title, "new body", Default::default()).expect("create");
        assert_eq!(result, CreateNote::Existing(nid("n-ownership")));
    }
    assert_eq!(wiki.vault().note_count(), 3);
    assert_eq!(
        wiki.note(&nid("n-ownership")).map(|n| n.content()),
        Some("Ownership is how Rust manages memory. See the Getting Started Guide info.")
    );
}

#[rstest]
fn renaming_onto_another_title_fails_without_changes(mut wiki: Wiki) {
    let before = wiki.snapshot();
    let err = wiki.rename_note(&nid("n-ownership"), "getting started GUIDE").unwrap_err();

    assert_eq!(
        err,
        ApplyError::DuplicateTitle {
            title: "getting started GUIDE".to_owned(),
            existing: nid("n-guide"),
        }
    );
    assert_eq!(wiki.snapshot(), before);
}

#[rstest]
fn longest_term_wins(wiki: Wiki) {
    let segments = segment("Getting Started Guide info", wiki.index(), None);
    assert_eq!(segments, vec![note_ref("Getting Started Guide", "n-guide"), text(" info")]);

    let segments = segment("Getting Started, then the Guide", wiki.index(), None);
    assert_eq!(segments, vec![folder_ref("Getting Started", "f-start"), text(", then the Guide")]);
}

#[rstest]
fn own_title_is_not_linked(wiki: Wiki) {
    let segments = wiki.segments_for(&nid("n-guide")).expect("note exists");
    assert_eq!(
        segments,
        vec![
            text("Start with the Getting Started Guide, then browse "),
            note_ref("Projects", "n-projects"),
            text("."),
        ]
    );
}

#[rstest]
fn notes_shadow_same_named_folders(wiki: Wiki) {
    let index = wiki.index();
    assert_eq!(index.resolve("PROJECTS"), Some(TermTarget::Note(nid("n-projects"))));
    assert!(
        index.terms().iter().all(|term| term.target() != &TermTarget::Folder(fid("f-projects")))
    );

    let segments = wiki.segments_for(&nid("n-ownership")).expect("note exists");
    assert_eq!(
        segments,
        vec![
            text("Ownership is how "),
            folder_ref("Rust", "f-rust"),
            text(" manages memory. See the "),
            note_ref("Getting Started Guide", "n-guide"),
            text(" info."),
        ]
    );
    assert_eq!(wiki.resolve_word("(projects)"), Some(WordTarget::Note(nid("n-projects"))));
}

#[rstest]
fn back_returns_to_previous_note(mut wiki: Wiki) {
    wiki.apply_all(vec![
        WikiOp::SelectNote { note_id: nid("n-guide") },
        WikiOp::NavigateTo { note_id: nid("n-ownership") },
        WikiOp::NavigateTo { note_id: nid("n-ownership") },
    ])
    .expect("navigate");
    assert_eq!(wiki.navigation().len(), 2);

    wiki.apply(WikiOp::Back).expect("back");
    assert_eq!(wiki.active_note_id(), Some(&nid("n-guide")));
    assert_eq!(wiki.navigation().len(), 1);
    assert_eq!(wiki.active_folder_id(), Some(&fid("f-start")));
}

#[rstest]
fn deleting_a_folder_reparents_direct_children_only(mut wiki: Wiki) {
    wiki.apply(WikiOp::DeleteFolder { folder_id: fid("f-rust") })
    .expect("delete folder");

    let vault = wiki.vault();
    assert!(vault.folder(&fid("f-rust")).is_none());
    assert_eq!(vault.folder(&fid("f-async")).and_then(|f| f.parent_id()), None);
    assert_eq!(vault.folder(&fid("f-tokio")).and_then(|f| f.parent_id()), Some(&fid("f-async")));
    assert_eq!(vault.note(&nid("n-ownership")).and_then(|n| n.folder_id()), None);

    // "Rust" is no longer a link target.
    let segments = wiki.segments_for(&nid("n-ownership")).expect("note exists");
    assert!(segments.iter().all(|s| !matches!(s, Segment::FolderRef { .. })));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("no terms at all")]
#[case("rust RUST Rust, projects\nand\tGetting Started Guide!")]
#[case("ünïcödé Ownership ✓ and async-tokio")]
fn segments_reassemble_to_the_input(wiki: Wiki, #[case] input: &str) {
    let segments = segment(input, wiki.index(), None);
    assert_eq!(join(&segments), input);
    assert!(segments.iter().all(|s| !s.text().is_empty()));
}

#[rstest]
fn every_note_body_round_trips(wiki: Wiki) {
    for note in wiki.vault().notes() {
        let segments = wiki.segments_for(note.id()).expect("note exists");
        assert_eq!(join(&segments), note.content());
    }
}

#[rstest]
fn empty_vault_yields_single_text_segment() {
    let wiki = Wiki::default();
    assert!(wiki.index().is_empty());
    assert_eq!(segment("hello", wiki.index(), None), vec![text("hello")]);
    assert!(segment("", wiki.index(), None).is_empty());
}

#[rstest]
fn index_is_a_pure_function_of_the_vault(wiki: Wiki) {
    let rebuilt = TermIndex::build(wiki.vault());
    let terms = |index: &TermIndex| {
        index.terms().iter().map(|t| t.term().to_owned()).collect::<Vec<_>>()
    };
    assert_eq!(terms(&rebuilt), terms(wiki.index()));
    assert_eq!(
        terms(&rebuilt),
        vec![
            "Getting Started Guide",
            "Getting Started",
            "Ownership",
            "projects",
            "Async",
            "Tokio",
            "Rust",
        ]
    );
}

#[rstest]
fn snapshot_survives_a_save_and_reload(mut wiki: Wiki) {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = SnapshotFile::new(dir.path().join("wiki.json"));

    wiki.create_note("Borrowing", "Borrowing relates to Ownership.", Default::default())
        .expect("create");
    file.save(&wiki.snapshot()).expect("save");

    let reloaded = Wiki::from_snapshot(file.load().expect("load"), WikiConfig::default());
    let borrowing = reloaded
        .vault()
        .find_note_by_title("borrowing")
        .map(|n| n.id().clone())
        .expect("note survived");
    let segments = reloaded.segments_for(&borrowing).expect("note exists");
    assert!(segments.contains(&note_ref("Ownership", "n-ownership")));
}

#[tokio::test]
async fn unknown_words_go_to_the_definition_lookup() {
    let wiki = Wiki::from_snapshot(load_fixture(), WikiConfig::default());
    let Some(WordTarget::Define(term)) = wiki.resolve_word("lifetimes,") else {
        panic!("expected an unresolved word");
    };
    assert_eq!(term, "lifetimes");

    let definer = StaticDefiner::new("{term}: scopes for which references are valid");
    let mut slot = LookupSlot::new();
    let ticket = slot.begin(term.clone());
    let text = definer.define(&term, "").await;

    let definition = slot.complete(ticket, text).expect("current lookup");
    assert_eq!(definition.text, "lifetimes: scopes for which references are valid");
}
