use mindmark_core::{MarkdownRepresentation, Metadata, Section, SectionAst, Taxonomy};
use std::sync::Arc;

fn section(depth: u32, title: &str, type_name: Option<&str>, tags: &[&str]) -> Section {
    Section::new(depth, Some(title.to_string())).with_metadata(Metadata {
        type_name: type_name.map(str::to_string),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        ..Metadata::default()
    })
}

#[test]
fn n_sections_yield_one_outline_and_n_minus_one_notes() {
    let taxonomy = Taxonomy::new();
    let representation = MarkdownRepresentation::new(&taxonomy);
    let ast = SectionAst::new(vec![
        section(0, "Book", Some("Book"), &[]),
        section(0, "Chapter 1", None, &[]),
        section(1, "Section 1.1", None, &[]),
        section(3, "Deep", None, &[]),
        section(0, "Chapter 2", None, &[]),
    ]);

    let outline = representation.outline(ast);

    assert_eq!(outline.title, "Book");
    assert_eq!(outline.kind.name(), "Book");
    let summary: Vec<(&str, u32)> = outline
        .notes()
        .iter()
        .map(|note| (note.title.as_str(), note.depth))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Chapter 1", 0),
            ("Section 1.1", 1),
            ("Deep", 3),
            ("Chapter 2", 0)
        ]
    );
    assert!(outline
        .notes()
        .iter()
        .all(|note| note.outline() == Some(outline.id())));
}

#[test]
fn empty_ast_yields_default_outline() {
    let taxonomy = Taxonomy::new();
    let representation = MarkdownRepresentation::new(&taxonomy);

    let outline = representation.outline(SectionAst::default());

    assert!(outline.title.is_empty());
    assert!(Arc::ptr_eq(&outline.kind, &taxonomy.default_outline_type()));
    assert!(outline.notes().is_empty());
    assert!(outline.tags().is_empty());
    assert!(outline.description.is_empty());
}

#[test]
fn header_fields_are_copied_verbatim() {
    let taxonomy = Taxonomy::new();
    let representation = MarkdownRepresentation::new(&taxonomy);
    let header = Section::new(0, Some("Plan".to_string()))
        .with_metadata(Metadata {
            type_name: Some("Project".to_string()),
            created: 10,
            modified: 20,
            read: 30,
            revision: 4,
            reads: 5,
            importance: 3,
            urgency: 2,
            progress: 60,
            tags: vec!["work".to_string(), "q3".to_string()],
        })
        .with_body(["first line", "", "third line"]);

    let outline = representation.outline(SectionAst::new(vec![header]));

    assert_eq!(outline.kind.name(), "Project");
    assert_eq!(
        (outline.created, outline.modified, outline.read),
        (10, 20, 30)
    );
    assert_eq!((outline.revision, outline.reads), (4, 5));
    assert_eq!(
        (outline.importance, outline.urgency, outline.progress),
        (3, 2, 60)
    );
    let tags: Vec<&str> = outline.tags().iter().map(|tag| tag.name()).collect();
    assert_eq!(tags, vec!["work", "q3"]);
    assert_eq!(outline.description, vec!["first line", "", "third line"]);
}

#[test]
fn unknown_and_absent_types_fall_back_to_defaults() {
    let taxonomy = Taxonomy::new();
    let representation = MarkdownRepresentation::new(&taxonomy);
    let ast = SectionAst::new(vec![
        section(0, "Doc", Some("Spaceship"), &[]),
        section(0, "Known", Some("Idea"), &[]),
        section(0, "Unknown", Some("Spaceship"), &[]),
        Section::new(0, Some("No metadata".to_string())),
    ]);

    let outline = representation.outline(ast);

    assert!(Arc::ptr_eq(&outline.kind, &taxonomy.default_outline_type()));
    let kinds: Vec<&str> = outline.notes().iter().map(|n| n.kind.name()).collect();
    assert_eq!(kinds, vec!["Idea", "Note", "Note"]);
}

#[test]
fn outline_type_names_do_not_resolve_as_note_types() {
    let taxonomy = Taxonomy::new();
    let representation = MarkdownRepresentation::new(&taxonomy);
    let ast = SectionAst::new(vec![section(0, "Fragment", Some("Book"), &[])]);

    let note = representation.note(ast).expect("note should be built");

    assert_eq!(note.kind.name(), "Note");
}

#[test]
fn same_tag_name_yields_same_instance_across_entities() {
    let taxonomy = Taxonomy::new();
    let representation = MarkdownRepresentation::new(&taxonomy);
    let ast = SectionAst::new(vec![
        section(0, "Doc", None, &["project"]),
        section(0, "Child", None, &["project", "project"]),
    ]);

    let outline = representation.outline(ast);

    let note = &outline.notes()[0];
    assert_eq!(note.tags().len(), 1);
    assert!(Arc::ptr_eq(&outline.tags()[0], &note.tags()[0]));
    let interned = taxonomy.find_tag("project").expect("tag should be interned");
    assert!(Arc::ptr_eq(&interned, &note.tags()[0]));
}

#[test]
fn shared_taxonomy_interns_consistently_across_threads() {
    let taxonomy = Taxonomy::new();
    let shared = &taxonomy;
    let tags: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(move || {
                    let representation = MarkdownRepresentation::new(shared);
                    let outline =
                        representation.outline_from_text("# Doc <!-- Metadata: tags: project; -->\n");
                    Arc::clone(&outline.tags()[0])
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread should not panic"))
            .collect()
    });

    assert!(tags.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

#[test]
fn empty_header_title_stays_empty() {
    let taxonomy = Taxonomy::new();
    let representation = MarkdownRepresentation::new(&taxonomy);
    let ast = SectionAst::new(vec![Section::new(0, Some(String::new()))]);

    let outline = representation.outline(ast);

    assert!(outline.title.is_empty());
}

#[test]
fn single_note_from_text_uses_last_section() {
    let taxonomy = Taxonomy::new();
    let representation = MarkdownRepresentation::new(&taxonomy);

    let note = representation
        .note_from_text("## First\nignored\n### Second <!-- Metadata: type: Task; progress: 50%; -->\nkept\n")
        .expect("note should be parsed");

    assert_eq!(note.title, "Second");
    assert_eq!(note.depth, 1);
    assert_eq!(note.kind.name(), "Task");
    assert_eq!(note.progress, 50);
    assert_eq!(note.description, vec!["kept"]);
    assert_eq!(note.outline(), None);

    assert!(representation.note_from_text("").is_none());
}
