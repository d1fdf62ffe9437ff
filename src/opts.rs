/// Options that control how a transcription is performed.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI is responsible for mapping user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (tests, batch jobs) can construct options programmatically
#[derive(Debug, Clone, Default)]
pub struct Opts {
    /// Optional language hint (e.g. `"en"`, `"ar"`).
    ///
    /// When `None`, we allow Whisper to auto-detect the spoken language.
    pub language: Option<String>,

    /// Whether to translate speech to English instead of transcribing verbatim.
    pub translate: bool,

    /// Number of inference threads. Defaults to the number of logical CPUs.
    pub threads: Option<usize>,
}
