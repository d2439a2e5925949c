//! Render de una `Evaluation` para el canal de moderación.

use crate::pipeline::{Evaluation, PipelineStep};

pub fn render_evaluation(evaluation: &Evaluation, toxicity_threshold: f64) -> String {
    let mut reply = format!("Evaluated: '{}'\n", evaluation.normalized);
    if evaluation.is_likely_propaganda() {
        reply.push_str("```This message may contain misinformation or propaganda!```");
        let labels = evaluation.propaganda_labels();
        if !labels.is_empty() {
            reply.push_str(&format!("\nThis message may contain {}", labels.join(", ")));
        }
    }
    match evaluation.toxicity {
        Some(score) => {
            reply.push_str(&format!("\n\nToxicity score: {score}"));
            if evaluation.is_toxic(toxicity_threshold) {
                reply.push_str("```\nThis message could be toxic!```");
            }
        }
        None => reply.push_str("\n\nToxicity score: unavailable"),
    }
    for issue in &evaluation.degraded {
        let step = match issue.step {
            PipelineStep::Translation => "translation",
            PipelineStep::Propaganda => "propaganda check",
            PipelineStep::Toxicity => "toxicity check",
        };
        reply.push_str(&format!("\n_({step} skipped: {})_", issue.error));
    }
    reply
}
