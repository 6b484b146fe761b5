//! Batch annotation end to end: fake provider, real table output.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sbdh_ai::{
    Annotator, AnnotatorConfig, BatchRunner, Completion, CompletionProvider, CompletionRequest,
    ProviderError,
};
use sbdh_core::{ClinicalNote, SbdhField, UsageRecord};
use sbdh_store::{read_table, string_column, total_rows, write_annotations, write_usage};

/// Answers by note text; notes mentioning "garbled" never get a usable reply.
#[derive(Default)]
struct KeyedProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl CompletionProvider for KeyedProvider {
    async fn complete(
        &self,
        request: &CompletionRequest<'_>,
    ) -> Result<Completion, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if request.user.contains("garbled") {
            return Ok(Completion {
                text: "Unable to annotate this note.".into(),
                usage: UsageRecord {
                    prompt_tokens: 500,
                    completion_tokens: 6,
                    total_tokens: 506,
                },
            });
        }
        let text = if request.user.contains("smoker") {
            "1,0,0,2,0,0,1,3"
        } else {
            "0,0,1,0,1,3,3,3"
        };
        Ok(Completion {
            text: text.into(),
            usage: UsageRecord {
                prompt_tokens: 480,
                completion_tokens: 15,
                total_tokens: 495,
            },
        })
    }
}

fn notes() -> Vec<ClinicalNote> {
    [
        ("101", "Current smoker, lives with wife."),
        ("102", "garbled scan of discharge summary"),
        ("103", "Denies alcohol. College graduate."),
    ]
    .into_iter()
    .map(|(id, text)| ClinicalNote {
        row_id: id.into(),
        text: text.into(),
    })
    .collect()
}

#[tokio::test(start_paused = true)]
async fn failing_middle_row_yields_fallback_and_zero_usage() {
    let runner = BatchRunner::new(Annotator::new(
        KeyedProvider::default(),
        AnnotatorConfig::default(),
    ));
    let output = runner.run(&notes()).await;

    assert_eq!(runner.annotator().provider().calls.load(Ordering::SeqCst), 5);
    assert_eq!(output.fallbacks, 1);

    let dir = tempfile::tempdir().unwrap();
    let annotations_path = dir.path().join("annotated.csv");
    let usage_path = dir.path().join("token_usage.csv");
    write_annotations(&annotations_path, &output.annotations).unwrap();
    write_usage(&usage_path, &output.usage, None).unwrap();

    let annotations = read_table(&annotations_path, None).unwrap();
    assert_eq!(total_rows(&annotations), 3);
    assert_eq!(annotations[0].num_columns(), 9);
    let ids = string_column(&annotations, "row_id").unwrap();
    let ids: Vec<_> = ids.iter().map(|id| id.as_deref()).collect();
    assert_eq!(ids, vec![Some("101"), Some("102"), Some("103")]);
    for field in SbdhField::ALL {
        let column = string_column(&annotations, field.name()).unwrap();
        assert_eq!(column.len(), 3);
        assert_eq!(column[1].as_deref(), Some("0"), "{field} of fallback row");
    }
    let tobacco = string_column(&annotations, SbdhField::BehaviorTobacco.name()).unwrap();
    assert_eq!(tobacco[0].as_deref(), Some("1"));

    let usage = read_table(&usage_path, None).unwrap();
    assert_eq!(total_rows(&usage), 3);
    let totals = string_column(&usage, "total_tokens").unwrap();
    let totals: Vec<_> = totals.iter().map(|t| t.as_deref()).collect();
    assert_eq!(totals, vec![Some("495"), Some("0"), Some("495")]);
}

#[tokio::test(start_paused = true)]
async fn keyed_usage_table_carries_row_ids() {
    let runner = BatchRunner::new(Annotator::new(
        KeyedProvider::default(),
        AnnotatorConfig::default(),
    ));
    let output = runner.run(&notes()).await;

    let dir = tempfile::tempdir().unwrap();
    let usage_path = dir.path().join("token_usage.csv");
    let ids = output.row_ids();
    write_usage(&usage_path, &output.usage, Some(&ids)).unwrap();

    let usage = read_table(&usage_path, None).unwrap();
    let row_ids = string_column(&usage, "row_id").unwrap();
    assert_eq!(row_ids[1].as_deref(), Some("102"));
    let prompt = string_column(&usage, "prompt_tokens").unwrap();
    assert_eq!(prompt[1].as_deref(), Some("0"));
}
