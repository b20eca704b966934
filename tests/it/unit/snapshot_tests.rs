//! Snapshot tests using the insta crate.
//!
//! Snapshots capture the stored and exported shapes other clients rely on.
//! Random ids and codes are redacted.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use crate::helpers::TestSurveyBuilder;
use rand::SeedableRng;
use rand::rngs::StdRng;
use surveycanvas::Editor;
use surveycanvas::config::EditorConfig;
use surveycanvas::export::tabulate;
use surveycanvas::store::MemoryStore;
use surveycanvas::types::{Answer, AnswerValue, ChoiceKind, Submission};

#[test]
fn snapshot_result_table() {
    let survey = TestSurveyBuilder::new("Quiz")
        .with_page("p1")
        .with_choice("q1", ChoiceKind::Single, &[("o1", 10.0, 10.0), ("o2", 20.0, 20.0)])
        .with_short_answer("q2", 40.0, 40.0, 30.0, 8.0)
        .build();
    let submissions = vec![
        Submission {
            id: "r1".into(),
            survey_id: "s1".into(),
            answers: vec![
                Answer {
                    question_id: "q1".into(),
                    value: AnswerValue::Text("o2".into()),
                },
                Answer {
                    question_id: "q2".into(),
                    value: AnswerValue::Text("blue".into()),
                },
            ],
        },
        Submission {
            id: "r2".into(),
            survey_id: "s1".into(),
            answers: vec![],
        },
    ];

    insta::assert_json_snapshot!(tabulate(&survey, &submissions), @r###"
    {
      "headers": [
        "Submission ID",
        "Q1 (SINGLE_CHOICE)",
        "Q2 (SHORT_ANSWER)"
      ],
      "rows": [
        [
          "r1",
          "2",
          "blue"
        ],
        [
          "r2",
          "",
          ""
        ]
      ]
    }
    "###);
}

#[test]
fn snapshot_submission() {
    let submission = Submission {
        id: "r1".into(),
        survey_id: "s1".into(),
        answers: vec![
            Answer {
                question_id: "q1".into(),
                value: AnswerValue::Text("o2".into()),
            },
            Answer {
                question_id: "q3".into(),
                value: AnswerValue::Choices(vec!["m1".into(), "m3".into()]),
            },
        ],
    };

    insta::assert_json_snapshot!(submission, @r###"
    {
      "id": "r1",
      "surveyId": "s1",
      "answers": [
        {
          "questionId": "q1",
          "value": "o2"
        },
        {
          "questionId": "q3",
          "value": [
            "m1",
            "m3"
          ]
        }
      ]
    }
    "###);
}

#[test]
fn snapshot_created_survey() {
    let mut editor = Editor::new_survey("Spring Quiz", EditorConfig::default());
    editor.add_page("data:image/png;base64,AAAA").unwrap();
    editor.add_audio_file("Intro", "data:audio/mp3;base64,BBBB", None).unwrap();

    let store = MemoryStore::new();
    let mut rng = StdRng::seed_from_u64(3);
    let saved = editor.save(&store, &mut rng).unwrap();

    insta::assert_json_snapshot!(saved.as_ref(), {
        ".id" => "[id]",
        ".code" => "[code]",
        ".pages[].id" => "[page]",
        ".audioFiles[].id" => "[audio]",
    }, @r###"
    {
      "id": "[id]",
      "title": "Spring Quiz",
      "pages": [
        {
          "id": "[page]",
          "backgroundImage": "data:image/png;base64,AAAA",
          "questions": [],
          "audioButtons": []
        }
      ],
      "audioFiles": [
        {
          "id": "[audio]",
          "name": "Intro",
          "audioUrl": "data:audio/mp3;base64,BBBB"
        }
      ],
      "code": "[code]",
      "submissionCount": 0
    }
    "###);
}
