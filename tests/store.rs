//! Project persistence flows through the session.

use absketch::geometry::SectionRect;
use absketch::session::EditorSession;
use absketch::store::{ProjectStore, SavedProject};

#[test]
fn session_round_trips_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProjectStore::new(dir.path().join("projects.json"));

    let mut session = EditorSession::from_template("clinical-trial");
    session.document.title = "Saved Trial".into();
    session.commit_rect("population", SectionRect::new(80.0, 180.0, 300.0, 220.0));

    let saved = SavedProject::from_document(&session.document, None);
    store.save(&saved).unwrap();

    let mut reopened = EditorSession::from_template("blank-canvas");
    let loaded = store.get(&saved.id).unwrap().unwrap();
    reopened.load_project(&loaded);

    assert_eq!(reopened.document.title, "Saved Trial");
    assert_eq!(reopened.document.layout_template_id, "clinical-trial");
    assert_eq!(
        reopened.document.section_rect("population").unwrap(),
        SectionRect::new(80.0, 180.0, 300.0, 220.0)
    );
    assert_eq!(reopened.project_id.as_deref(), Some(saved.id.as_str()));
    // Loading starts a fresh history.
    assert!(!reopened.can_undo());
}

#[test]
fn saving_twice_keeps_one_entry_per_project() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProjectStore::new(dir.path().join("projects.json"));

    let mut session = EditorSession::from_template("cycle-process");
    let first = SavedProject::from_document(&session.document, None);
    store.save(&first).unwrap();
    session.project_id = Some(first.id.clone());

    session.document.title = "Edited Cycle".into();
    let second = SavedProject::from_document(&session.document, session.project_id.as_deref());
    store.save(&second).unwrap();

    let list = store.list().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, first.id);
    assert_eq!(list[0].title, "Edited Cycle");
}

#[test]
fn malformed_store_file_errors_without_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    std::fs::write(&path, "{not json").unwrap();
    let store = ProjectStore::new(path);
    assert!(store.list().is_err());
    assert!(store.get("anything").is_err());
}

#[test]
fn stored_json_survives_unknown_visual_defaults() {
    // A project written before a section ever carried a visual must load
    // with the defaults the serde attributes promise.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    let json = r##"[{
        "id": "legacy",
        "title": "Legacy",
        "journal_name": "",
        "citation": "Author et al. Journal. 2024.",
        "layout_id": "blank-canvas",
        "header_color": "#C62828",
        "sections": [{
            "id": "main",
            "title": "MAIN",
            "content": "text",
            "rect": {"x": 140.0, "y": 170.0, "w": 400.0, "h": 300.0}
        }],
        "last_modified": 0
    }]"##;
    std::fs::write(&path, json).unwrap();

    let store = ProjectStore::new(path);
    let loaded = store.get("legacy").unwrap().unwrap();
    let section = &loaded.sections[0];
    assert!(section.icon().is_none());
    assert_eq!(section.image_scale, 1.0);
    assert_eq!(section.icon_position.x, 50.0);
    assert_eq!(section.layout, absketch::section::SectionLayout::Bottom);
}
