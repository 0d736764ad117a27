use block_core::{
    BlockId, BlockKind, Editor, HeadlessSurface, Intent, Key, KeyDisposition, KeyEvent,
    SurfaceCommand, classify,
};

fn editor() -> (Editor<HeadlessSurface>, BlockId) {
    let editor = Editor::with_standard_kinds(HeadlessSurface::new());
    let first = editor.doc().blocks()[0].id();
    (editor, first)
}

fn key(key: Key) -> KeyEvent {
    KeyEvent::new(key)
}

#[test]
fn editor_starts_with_one_empty_paragraph() {
    let (editor, first) = editor();
    assert_eq!(editor.doc().len(), 1);
    let block = editor.doc().get(first).unwrap();
    assert!(block.kind().is_paragraph());
    assert!(block.is_empty());
    assert_eq!(
        block.placeholder,
        "Type / for blocks, @ to link docs or people"
    );
    assert!(!editor.palette().is_open());
}

#[test]
fn classification_priority() {
    let (editor, first) = editor();
    let block = editor.doc().get(first).unwrap();

    assert_eq!(
        classify(&KeyEvent::char('/'), block, '/'),
        Some(Intent::OpenPalette)
    );
    assert_eq!(classify(&key(Key::Enter), block, '/'), Some(Intent::Commit));
    assert_eq!(classify(&KeyEvent::shifted(Key::Enter), block, '/'), None);
    assert_eq!(
        classify(&key(Key::Backspace), block, '/'),
        Some(Intent::RemoveEmpty)
    );
    assert_eq!(
        classify(&key(Key::ArrowUp), block, '/'),
        Some(Intent::FocusPrevious)
    );
    assert_eq!(
        classify(&key(Key::ArrowDown), block, '/'),
        Some(Intent::FocusNext)
    );
    assert_eq!(classify(&key(Key::Escape), block, '/'), None);
    assert_eq!(classify(&KeyEvent::char('a'), block, '/'), None);
    assert_eq!(classify(&key(Key::Other("Tab".into())), block, '/'), None);
}

#[test]
fn backspace_on_non_empty_block_is_native() {
    let (mut editor, first) = editor();
    editor.handle_input(first, "abc");
    assert_eq!(
        editor.handle_key(first, &key(Key::Backspace)),
        KeyDisposition::Native
    );
    assert_eq!(editor.doc().get(first).unwrap().content(), "abc");
}

#[test]
fn plain_enter_inserts_empty_paragraph_after() {
    let (mut editor, first) = editor();
    editor.handle_input(first, "Hello");
    let tail = editor.push_block("tail", BlockKind::paragraph());

    assert_eq!(
        editor.handle_key(first, &key(Key::Enter)),
        KeyDisposition::Handled
    );

    let ids = editor.doc().ids();
    assert_eq!(ids.len(), 3);
    assert_eq!(ids[0], first);
    assert_eq!(ids[2], tail);
    let new = editor.doc().get(ids[1]).unwrap();
    assert!(new.kind().is_paragraph());
    assert!(new.is_empty());
    assert_eq!(editor.doc().get(first).unwrap().content(), "Hello");

    assert_eq!(editor.focused(), Some(ids[1]));
    assert_eq!(editor.surface().focused(), Some(ids[1]));
    assert_eq!(editor.surface().caret_block(), Some(ids[1]));
}

#[test]
fn shift_enter_is_left_to_the_surface() {
    let (mut editor, first) = editor();
    editor.handle_input(first, "Hello");
    assert_eq!(
        editor.handle_key(first, &KeyEvent::shifted(Key::Enter)),
        KeyDisposition::Native
    );
    assert_eq!(editor.doc().len(), 1);
}

#[test]
fn arrows_move_caret_to_end_of_neighbours() {
    let (mut editor, first) = editor();
    let second = editor.push_block("two", BlockKind::paragraph());
    let third = editor.push_block("three", BlockKind::paragraph());

    assert_eq!(
        editor.handle_key(second, &key(Key::ArrowUp)),
        KeyDisposition::Handled
    );
    assert_eq!(editor.focused(), Some(first));

    editor.handle_key(second, &key(Key::ArrowDown));
    assert_eq!(editor.focused(), Some(third));
    assert_eq!(
        editor.surface().commands().last(),
        Some(&SurfaceCommand::Focus(third))
    );
    assert_eq!(editor.surface().caret_block(), Some(third));
}

#[test]
fn arrows_at_document_edges_are_no_ops() {
    let (mut editor, first) = editor();
    let last = editor.push_block("last", BlockKind::paragraph());
    editor.handle_focus(first);

    editor.handle_key(first, &key(Key::ArrowUp));
    assert_eq!(editor.focused(), Some(first));
    assert!(editor.surface().commands().is_empty());

    editor.handle_focus(last);
    editor.handle_key(last, &key(Key::ArrowDown));
    assert_eq!(editor.focused(), Some(last));
    assert!(editor.surface().commands().is_empty());
}

#[test]
fn focus_and_blur_refresh_placeholder_state() {
    let (mut editor, first) = editor();
    editor.handle_focus(first);
    assert_eq!(editor.focused(), Some(first));
    assert!(editor.doc().get(first).unwrap().is_empty());

    editor.handle_input(first, "x");
    assert!(!editor.doc().get(first).unwrap().is_empty());

    editor.handle_blur(first);
    assert_eq!(editor.focused(), None);
}

#[test]
fn events_for_destroyed_blocks_are_ignored() {
    let (mut editor, first) = editor();
    editor.handle_input(first, "/1");
    editor.handle_key(first, &key(Key::Enter));
    assert!(!editor.doc().contains(first));

    let before = editor.doc().clone();
    assert_eq!(
        editor.handle_key(first, &key(Key::Enter)),
        KeyDisposition::Native
    );
    editor.handle_input(first, "/2");
    editor.handle_focus(first);
    assert_eq!(editor.doc(), &before);
    assert!(!editor.palette().is_open());
}
