use std::fmt;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use bg_core::{Generation, Result, TextGenerator};
use super::InferenceConfig;

const WORDS: &[&str] = &[
    "the", "battery", "price", "market", "people", "usually", "because", "new", "model",
    "range", "charging", "over", "years", "service", "owners", "report", "that", "this",
    "is", "often", "cheaper", "than", "expected", "and", "most", "drivers", "agree", "with",
    "experts", "on", "quality", "costs", "depend", "local", "rules", "in", "many", "cases",
];

/// Offline generator producing reproducible filler text. The output depends only on
/// the prompt, the seed and the requested length.
pub struct DummyModel {
    seed: u64,
}

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").field("seed", &self.seed).finish()
    }
}

impl DummyModel {
    pub async fn new(config: Option<InferenceConfig>) -> Result<Self> {
        Ok(Self {
            seed: config.map(|c| c.seed).unwrap_or(42),
        })
    }

    fn prompt_seed(&self, prompt: &str, sequence: usize) -> u64 {
        // FNV-1a, stable across platforms and releases
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in prompt.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        hash ^ self.seed.wrapping_add(sequence as u64)
    }

    fn continuation(&self, prompt: &str, sequence: usize, max_length: usize) -> String {
        let mut rng = StdRng::seed_from_u64(self.prompt_seed(prompt, sequence));
        let mut text = String::new();
        let mut words_in_sentence = 0;

        for _ in 0..max_length {
            let word = WORDS.choose(&mut rng).copied().unwrap_or("the");
            text.push(' ');
            text.push_str(word);
            words_in_sentence += 1;
            if words_in_sentence >= 6 && rng.gen_bool(0.2) {
                text.push('.');
                words_in_sentence = 0;
            }
        }
        text
    }
}

#[async_trait::async_trait]
impl TextGenerator for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, prompt: &str, max_length: usize, num_sequences: usize) -> Result<Vec<Generation>> {
        Ok((0..num_sequences)
            .map(|sequence| Generation {
                generated_text: format!("{}{}", prompt, self.continuation(prompt, sequence, max_length)),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dummy_model() {
        let model = DummyModel::new(None).await.unwrap();

        let generations = model.generate("Is tesla stock a buy?", 80, 2).await.unwrap();
        assert_eq!(generations.len(), 2);
        assert!(generations[0].generated_text.starts_with("Is tesla stock a buy? "));
        assert_ne!(generations[0], generations[1]);

        // Same seed and prompt give the same text
        let again = model.generate("Is tesla stock a buy?", 80, 1).await.unwrap();
        assert_eq!(again[0], generations[0]);
    }

    #[tokio::test]
    async fn test_seed_changes_output() {
        let a = DummyModel::new(Some(InferenceConfig { seed: 1, ..Default::default() })).await.unwrap();
        let b = DummyModel::new(Some(InferenceConfig { seed: 2, ..Default::default() })).await.unwrap();

        let a = a.generate("Why?", 40, 1).await.unwrap();
        let b = b.generate("Why?", 40, 1).await.unwrap();
        assert_ne!(a[0], b[0]);
    }
}
