use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use quill::opts::Opts;
use quill::{Output, Quill, logging};

fn main() -> Result<()> {
    logging::init();
    let params = Params::parse();

    let quill = Quill::new(&params.model_path, params.gpu)?;

    let opts = Opts {
        language: params.language.clone(),
        translate: params.translate,
        threads: params.threads,
    };

    let output = match &params.output_path {
        Some(path) => Output::File(path.clone()),
        None => Output::Stdout,
    };

    quill.run(&params.audio_path, &opts, &output)
}

#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Transcribe an audio file to timestamped JSON")]
struct Params {
    /// Path to a ggml Whisper model.
    #[arg(short = 'm', long = "model")]
    model_path: String,

    /// Path to the audio file to transcribe.
    #[arg(short = 'a', long = "audio")]
    audio_path: PathBuf,

    /// Language hint (e.g. "en", "ar"). Auto-detect when omitted.
    #[arg(short = 'l', long = "language")]
    language: Option<String>,

    /// Translate speech to English instead of transcribing verbatim.
    #[arg(short = 't', long = "translate", default_value_t = false)]
    translate: bool,

    /// Offload inference to the GPU when available.
    #[arg(long = "gpu", default_value_t = false)]
    gpu: bool,

    /// Inference thread count. Defaults to the number of logical CPUs.
    #[arg(long = "threads")]
    threads: Option<usize>,

    /// Write the JSON transcript to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output_path: Option<PathBuf>,
}
