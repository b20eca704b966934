//! Editor Workflow Integration Tests

use crate::helpers::{TestSurveyBuilder, container, pointer_at, question_count};
use surveycanvas::config::EditorConfig;
use surveycanvas::input::{ContainerRect, EditorMode, PixelPoint, PointerEvent, PointerOutcome};
use surveycanvas::types::{ChoiceKind, ElementRef, Question, Tool};
use surveycanvas::{Cursor, Editor, ErrorKind};

fn editor_with_page() -> Editor {
    let mut editor = Editor::new_survey("Quiz", EditorConfig::default());
    editor.add_page("bg.png").unwrap();
    editor
}

#[test]
fn test_first_page_is_selected() {
    let mut editor = Editor::new_survey("Quiz", EditorConfig::default());
    assert!(editor.current_page().is_none());

    let ids = editor.add_pages(["one.png", "two.png", "three.png"]).unwrap();
    assert_eq!(ids.len(), 3);
    assert_eq!(editor.current_page_index(), 0);
    assert_eq!(editor.current_page().unwrap().id, ids[0]);
}

#[test]
fn test_deleting_selected_last_page_moves_selection() {
    let mut editor = Editor::new_survey("Quiz", EditorConfig::default());
    editor.add_pages(["one.png", "two.png", "three.png"]).unwrap();
    assert!(editor.select_page(2));

    editor.delete_page(2).unwrap();
    assert_eq!(editor.current_page_index(), 1);

    editor.delete_page(0).unwrap();
    editor.delete_page(0).unwrap();
    assert_eq!(editor.current_page_index(), 0);
    assert!(editor.current_page().is_none());
    assert!(!editor.select_page(0));
}

#[test]
fn test_short_answer_placement_returns_to_idle() {
    let mut editor = editor_with_page();
    editor.select_tool(Tool::ShortAnswer);
    assert_eq!(editor.cursor(), Cursor::Crosshair);

    let outcome = editor.handle_pointer_up(&pointer_at(20.0, 30.0)).unwrap();
    assert!(matches!(outcome, PointerOutcome::Placed(ElementRef::ShortAnswer { .. })));
    assert_eq!(editor.mode(), &EditorMode::Idle);
    assert_eq!(editor.cursor(), Cursor::Default);

    let Question::ShortAnswer(q) = &editor.current_page().unwrap().questions[0] else {
        panic!("expected a short answer");
    };
    assert_eq!((q.x, q.y, q.width, q.height), (20.0, 30.0, 30.0, 8.0));
}

#[test]
fn test_choice_session_appends_options() {
    let mut editor = editor_with_page();
    editor.select_tool(Tool::MultipleChoice);

    let first = editor.handle_pointer_up(&pointer_at(10.0, 10.0)).unwrap();
    assert!(matches!(first, PointerOutcome::Placed(_)));
    assert!(editor.mode().is_editing_open_question());

    let second = editor.handle_pointer_up(&pointer_at(20.0, 10.0)).unwrap();
    let third = editor.handle_pointer_up(&pointer_at(30.0, 10.0)).unwrap();
    assert!(matches!(second, PointerOutcome::OptionAppended(_)));
    assert!(matches!(third, PointerOutcome::OptionAppended(_)));

    assert_eq!(question_count(editor.survey(), 0), 1);
    let question = editor.current_page().unwrap().questions[0].clone();
    assert_eq!(question.choice_kind(), Some(ChoiceKind::Multiple));
    assert_eq!(question.as_choice().unwrap().options.len(), 3);

    let finished = editor.finish_question().unwrap();
    assert_eq!(finished.question_id, question.id());
    assert_eq!(editor.tool(), Tool::None);
}

#[test]
fn test_tool_switch_finishes_open_question() {
    let mut editor = editor_with_page();
    editor.select_tool(Tool::SingleChoice);
    editor.handle_pointer_up(&pointer_at(10.0, 10.0)).unwrap();

    assert!(editor.select_tool(Tool::SingleChoice).is_some());

    // Next click starts a new question instead of appending
    editor.handle_pointer_up(&pointer_at(40.0, 40.0)).unwrap();
    assert_eq!(question_count(editor.survey(), 0), 2);
}

#[test]
fn test_page_switch_finishes_open_question() {
    let mut editor = Editor::new_survey("Quiz", EditorConfig::default());
    editor.add_pages(["one.png", "two.png"]).unwrap();
    editor.select_tool(Tool::SingleChoice);
    editor.handle_pointer_up(&pointer_at(10.0, 10.0)).unwrap();

    assert!(editor.select_page(1));
    assert!(editor.mode().is_idle());
    editor.handle_pointer_up(&pointer_at(10.0, 10.0)).unwrap();
    assert_eq!(question_count(editor.survey(), 1), 0);
}

#[test]
fn test_audio_placement_needs_pending_file() {
    let mut editor = editor_with_page();
    editor.select_tool(Tool::AudioButton);
    assert_eq!(
        editor.handle_pointer_up(&pointer_at(50.0, 50.0)).unwrap(),
        PointerOutcome::Ignored
    );

    let audio = editor.add_audio_file("Intro", "intro.mp3", Some(3.2)).unwrap();
    editor.select_pending_audio(&audio).unwrap();
    let outcome = editor.handle_pointer_up(&pointer_at(50.0, 50.0)).unwrap();
    assert!(matches!(outcome, PointerOutcome::Placed(ElementRef::AudioButton { .. })));
    assert!(editor.mode().is_idle());

    let button = &editor.current_page().unwrap().audio_buttons[0];
    assert_eq!(button.audio_file_id.as_deref(), Some(audio.as_str()));
}

#[test]
fn test_select_unknown_audio_is_reference_error() {
    let mut editor = editor_with_page();
    let err = editor.select_pending_audio("missing").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Reference);
}

#[test]
fn test_delete_tool_stays_active() {
    let survey = TestSurveyBuilder::new("Quiz")
        .with_page("p1")
        .with_choice("q1", ChoiceKind::Single, &[("o1", 10.0, 10.0), ("o2", 20.0, 20.0)])
        .with_short_answer("q2", 50.0, 50.0, 30.0, 8.0)
        .build();
    let (mut editor, _) = Editor::open(survey, EditorConfig::default());
    editor.select_tool(Tool::Delete);

    let deleted = editor.handle_pointer_up(&pointer_at(60.0, 54.0)).unwrap();
    assert_eq!(deleted, PointerOutcome::Deleted(ElementRef::short_answer("q2")));

    editor.handle_pointer_up(&pointer_at(10.0, 10.0)).unwrap();
    assert_eq!(question_count(editor.survey(), 0), 1);
    editor.handle_pointer_up(&pointer_at(20.0, 20.0)).unwrap();
    assert_eq!(question_count(editor.survey(), 0), 0);

    assert!(editor.mode().is_deleting());
    assert_eq!(
        editor.handle_pointer_up(&pointer_at(90.0, 90.0)).unwrap(),
        PointerOutcome::Ignored
    );
}

#[test]
fn test_delete_audio_file_removes_its_buttons() {
    let mut editor = editor_with_page();
    let audio = editor.add_audio_file("Intro", "intro.mp3", None).unwrap();
    editor.select_pending_audio(&audio).unwrap();
    editor.handle_pointer_up(&pointer_at(50.0, 50.0)).unwrap();

    assert_eq!(editor.delete_audio_file(&audio).unwrap(), 1);
    assert!(editor.current_page().unwrap().audio_buttons.is_empty());
    assert!(editor.survey().audio_files.is_empty());
}

#[test]
fn test_degenerate_container_ignored() {
    let mut editor = editor_with_page();
    editor.select_tool(Tool::ShortAnswer);

    let collapsed = PointerEvent::new(
        PixelPoint::new(10.0, 10.0),
        ContainerRect::new(0.0, 0.0, 0.0, 0.0),
    );
    assert_eq!(editor.handle_pointer_up(&collapsed).unwrap(), PointerOutcome::Ignored);
    assert_eq!(question_count(editor.survey(), 0), 0);
    assert!(matches!(editor.mode(), EditorMode::PlacingShortAnswer));
}

#[test]
fn test_click_outside_container_is_clamped() {
    let mut editor = editor_with_page();
    editor.select_tool(Tool::SingleChoice);
    editor.handle_pointer_up(&pointer_at(110.0, -5.0)).unwrap();

    let option = &editor.current_page().unwrap().questions[0].as_choice().unwrap().options[0];
    assert_eq!((option.x, option.y), (100.0, 0.0));
}

#[test]
fn test_required_flag_and_element_position() {
    let mut editor = editor_with_page();
    editor.select_tool(Tool::ShortAnswer);
    let PointerOutcome::Placed(element) = editor.handle_pointer_up(&pointer_at(20.0, 30.0)).unwrap()
    else {
        panic!("expected placement");
    };
    let question_id = element.question_id().unwrap().to_string();

    editor.set_required(&question_id, true).unwrap();
    assert!(editor.survey().find_question(&question_id).unwrap().is_required());

    let pixel = editor.element_pixel_position(&element, &container()).unwrap();
    assert_eq!(pixel, PixelPoint::new(300.0, 200.0));
}

#[test]
fn test_delete_question_closes_open_session() {
    let mut editor = editor_with_page();
    editor.select_tool(Tool::SingleChoice);
    let PointerOutcome::Placed(element) = editor.handle_pointer_up(&pointer_at(10.0, 10.0)).unwrap()
    else {
        panic!("expected placement");
    };

    editor.delete_question(element.question_id().unwrap()).unwrap();
    assert!(!editor.mode().is_editing_open_question());
    assert_eq!(editor.tool(), Tool::SingleChoice);
}
