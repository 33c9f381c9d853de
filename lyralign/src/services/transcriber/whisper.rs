//! Whisper transcription engine
//!
//! Wraps whisper.cpp via `whisper-rs`. The model is loaded lazily on the
//! first transcription and reused for every file after that, so batch runs
//! pay the load cost once. Token-level timestamps are enabled and BPE token
//! pieces are regrouped into whole words before they leave this module.

#[cfg(feature = "whisper")]
mod backend {
    use std::path::{Path, PathBuf};

    use lyralign_common::TranscriptWord;
    use once_cell::sync::OnceCell;
    use tracing::{debug, info};
    use whisper_rs::{
        FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, WhisperState,
    };

    use super::super::{audio, TranscribeError, Transcriber};

    /// Whisper-backed transcriber with a lazily-loaded model.
    pub struct WhisperTranscriber {
        model_path: PathBuf,
        language: Option<String>,
        context: OnceCell<WhisperContext>,
    }

    impl WhisperTranscriber {
        /// Create a transcriber for the given model file.
        ///
        /// The model is not touched until the first call to `transcribe`.
        ///
        /// # Arguments
        /// * `model_path` - Path to a ggml model file
        /// * `language` - Language hint (e.g. "en"), or `None` for auto-detect
        pub fn new(model_path: PathBuf, language: Option<String>) -> Self {
            Self {
                model_path,
                language,
                context: OnceCell::new(),
            }
        }

        /// Model file this transcriber was configured with.
        pub fn model_path(&self) -> &Path {
            &self.model_path
        }

        /// Language hint passed to the engine, if any.
        pub fn language(&self) -> Option<&str> {
            self.language.as_deref()
        }

        /// Load the model on first use, then hand back the cached context.
        fn context(&self) -> Result<&WhisperContext, TranscribeError> {
            self.context.get_or_try_init(|| {
                if !self.model_path.exists() {
                    return Err(TranscribeError::ModelNotFound(self.model_path.clone()));
                }
                let path = self.model_path.to_str().ok_or_else(|| {
                    TranscribeError::ModelLoad("model path is not valid UTF-8".to_string())
                })?;
                info!(model = %self.model_path.display(), "loading whisper model");
                WhisperContext::new_with_params(path, WhisperContextParameters::default())
                    .map_err(|e| TranscribeError::ModelLoad(e.to_string()))
            })
        }
    }

    impl Transcriber for WhisperTranscriber {
        fn transcribe(&self, path: &Path) -> Result<Vec<TranscriptWord>, TranscribeError> {
            let context = self.context()?;
            let samples = audio::decode_for_recognition(path)?;

            let mut state = context
                .create_state()
                .map_err(|e| TranscribeError::Engine(e.to_string()))?;

            let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
            params.set_translate(false);
            params.set_print_special(false);
            params.set_print_progress(false);
            params.set_print_realtime(false);
            params.set_print_timestamps(false);
            params.set_token_timestamps(true);
            if let Some(language) = self.language.as_deref() {
                params.set_language(Some(language));
            }

            state
                .full(params, &samples)
                .map_err(|e| TranscribeError::Engine(e.to_string()))?;

            let words = collect_words(context, &state)?;
            debug!(file = %path.display(), words = words.len(), "transcription complete");
            Ok(words)
        }
    }

    /// Regroup BPE token pieces into whole words with merged time spans.
    ///
    /// Token timestamps arrive in centiseconds. A piece starting with a space
    /// or a sentencepiece marker opens a new word; pieces without one extend
    /// the word in progress.
    fn collect_words(
        context: &WhisperContext,
        state: &WhisperState,
    ) -> Result<Vec<TranscriptWord>, TranscribeError> {
        let mut words = Vec::new();
        let mut current = String::new();
        let mut start = 0.0;
        let mut end = 0.0;

        let segments = state
            .full_n_segments()
            .map_err(|e| TranscribeError::Engine(e.to_string()))?;

        for segment in 0..segments {
            let tokens = state
                .full_n_tokens(segment)
                .map_err(|e| TranscribeError::Engine(e.to_string()))?;

            for token in 0..tokens {
                let data = state
                    .full_get_token_data(segment, token)
                    .map_err(|e| TranscribeError::Engine(e.to_string()))?;
                let piece = context
                    .token_to_str(data.id)
                    .map_err(|e| TranscribeError::Engine(e.to_string()))?;

                // Special tokens like [_BEG_] or <|endoftext|> carry no speech.
                if piece.starts_with('[') || piece.starts_with('<') {
                    continue;
                }

                if (piece.starts_with(' ') || piece.starts_with('▁')) && !current.is_empty() {
                    push_word(&mut words, &mut current, start, end);
                }
                if current.is_empty() {
                    start = data.t0 as f64 / 100.0;
                }
                current.push_str(piece.trim_start_matches([' ', '▁']));
                end = data.t1 as f64 / 100.0;
            }
        }
        push_word(&mut words, &mut current, start, end);

        Ok(words)
    }

    fn push_word(words: &mut Vec<TranscriptWord>, current: &mut String, start: f64, end: f64) {
        let text = current.trim();
        if !text.is_empty() {
            words.push(TranscriptWord::new(text, start, end));
        }
        current.clear();
    }
}

#[cfg(not(feature = "whisper"))]
mod backend {
    use std::path::{Path, PathBuf};

    use lyralign_common::TranscriptWord;

    use super::super::{TranscribeError, Transcriber};

    /// Stub transcriber used when the `whisper` feature is disabled.
    ///
    /// Construction succeeds so the rest of the pipeline still runs; the
    /// first transcription attempt reports the backend as unavailable and
    /// callers fall back to duration-based alignment.
    pub struct WhisperTranscriber {
        model_path: PathBuf,
        language: Option<String>,
    }

    impl WhisperTranscriber {
        /// Create a stub transcriber (never loads anything).
        pub fn new(model_path: PathBuf, language: Option<String>) -> Self {
            Self {
                model_path,
                language,
            }
        }

        /// Model file this transcriber was configured with.
        pub fn model_path(&self) -> &Path {
            &self.model_path
        }

        /// Language hint passed to the engine, if any.
        pub fn language(&self) -> Option<&str> {
            self.language.as_deref()
        }
    }

    impl Transcriber for WhisperTranscriber {
        fn transcribe(&self, _path: &Path) -> Result<Vec<TranscriptWord>, TranscribeError> {
            Err(TranscribeError::BackendDisabled)
        }
    }
}

pub use backend::WhisperTranscriber;
