use async_trait::async_trait;

/// Repository for speech synthesis.
/// Abstracts the underlying provider (AWS Polly, OpenAI, ...)
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Merging audio chunks into a single MP3 stream
/// - Provider-specific voice selection (chosen at random per call from a
///   fixed set of interchangeable voices; the narration content is
///   deterministic, the voice is not)
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Synthesize a narration script to MP3 audio bytes.
    ///
    /// # Errors
    /// Returns an error if synthesis fails or the provider is unavailable.
    /// Callers must treat any failure as terminal for the attempt and leave
    /// no partial state behind.
    async fn synthesize(&self, script: &str) -> Result<Vec<u8>, String>;
}

/// Split a narration script into batches that fit a provider's character
/// limit. Scripts are line-oriented (one ingredient or step per line), so
/// batches break on line boundaries; a single oversized line falls back to
/// plain character chunks.
pub(crate) fn split_into_batches(script: &str, max_batch_size: usize) -> Vec<String> {
    if script.len() <= max_batch_size {
        return vec![script.to_string()];
    }

    let mut batches = Vec::new();
    let mut current = String::new();

    for line in script.lines() {
        if !current.is_empty() && current.len() + line.len() + 1 > max_batch_size {
            batches.push(std::mem::take(&mut current));
        }

        if line.len() > max_batch_size {
            let chars: Vec<char> = line.chars().collect();
            for chunk in chars.chunks(max_batch_size) {
                batches.push(chunk.iter().collect());
            }
            continue;
        }

        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }

    if !current.is_empty() {
        batches.push(current);
    }

    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_keep_short_scripts_in_a_single_batch() {
        let script = "Tomato Soup.\nIngredients:\n6 of tomatoes.\n";
        let batches = split_into_batches(script, 3000);
        assert_eq!(batches, vec![script.to_string()]);
    }

    #[test]
    fn it_should_split_on_line_boundaries() {
        let line = "Step 1: Stir the pot gently for a while.";
        let script = vec![line; 20].join("\n");
        let batches = split_into_batches(&script, 100);

        assert!(batches.len() > 1);
        for batch in &batches {
            assert!(batch.len() <= 100, "batch of {} chars", batch.len());
            for batch_line in batch.lines() {
                assert_eq!(batch_line, line);
            }
        }
    }

    #[test]
    fn it_should_preserve_every_line_in_order() {
        let lines: Vec<String> = (1..=50).map(|i| format!("Step {}: keep stirring.", i)).collect();
        let script = lines.join("\n");
        let batches = split_into_batches(&script, 120);

        let rejoined: Vec<String> = batches
            .iter()
            .flat_map(|b| b.lines().map(str::to_string))
            .collect();
        assert_eq!(rejoined, lines);
    }

    #[test]
    fn it_should_chunk_a_single_oversized_line() {
        let script = "a".repeat(250);
        let batches = split_into_batches(&script, 100);

        assert_eq!(batches.len(), 3);
        assert!(batches.iter().all(|b| b.len() <= 100));
        assert_eq!(batches.concat(), script);
    }

    #[test]
    fn it_should_keep_a_batch_at_exactly_the_limit_whole() {
        let script = "b".repeat(100);
        let batches = split_into_batches(&script, 100);
        assert_eq!(batches, vec![script]);
    }
}
