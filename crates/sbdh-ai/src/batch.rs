//! Sequential batch annotation over a table of notes.

use sbdh_core::{AnnotationRecord, ClinicalNote, UsageRecord};
use tracing::{debug, info};

use crate::annotator::Annotator;
use crate::provider::CompletionProvider;

/// Annotations and usage for a batch, positionally aligned with the input notes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchOutput {
    pub annotations: Vec<AnnotationRecord>,
    pub usage: Vec<UsageRecord>,
    /// Notes that got the fallback row after exhausting every attempt.
    pub fallbacks: usize,
}

impl BatchOutput {
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn total_usage(&self) -> UsageRecord {
        self.usage.iter().sum()
    }

    pub fn row_ids(&self) -> Vec<String> {
        self.annotations.iter().map(|a| a.row_id.clone()).collect()
    }
}

/// Runs an [`Annotator`] over notes one at a time, in input order.
///
/// Nothing is checkpointed: results live in memory until the caller writes them.
pub struct BatchRunner<P> {
    annotator: Annotator<P>,
}

impl<P: CompletionProvider> BatchRunner<P> {
    pub fn new(annotator: Annotator<P>) -> Self {
        Self { annotator }
    }

    pub fn annotator(&self) -> &Annotator<P> {
        &self.annotator
    }

    pub async fn run(&self, notes: &[ClinicalNote]) -> BatchOutput {
        self.run_with_progress(notes, |_, _| {}).await
    }

    /// Like [`run`](Self::run), calling `on_progress(done, total)` after each note.
    pub async fn run_with_progress<F>(
        &self,
        notes: &[ClinicalNote],
        mut on_progress: F,
    ) -> BatchOutput
    where
        F: FnMut(usize, usize),
    {
        let total = notes.len();
        let mut output = BatchOutput {
            annotations: Vec::with_capacity(total),
            usage: Vec::with_capacity(total),
            fallbacks: 0,
        };

        info!(total, "annotating notes");
        for (i, note) in notes.iter().enumerate() {
            let annotation = self.annotator.annotate(&note.text).await;
            debug!(
                row = i,
                row_id = %note.row_id,
                attempts = annotation.outcome.attempts(),
                fallback = annotation.outcome.is_fallback(),
                "row complete"
            );
            if annotation.outcome.is_fallback() {
                output.fallbacks += 1;
            }
            output
                .annotations
                .push(AnnotationRecord::new(note.row_id.clone(), annotation.values));
            output.usage.push(annotation.usage);
            on_progress(i + 1, total);
        }

        let usage = output.total_usage();
        info!(
            rows = output.len(),
            fallbacks = output.fallbacks,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "batch complete"
        );
        output
    }
}
