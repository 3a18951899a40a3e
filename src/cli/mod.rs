use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Check the model runtime, then serve the chat API (default)
    Serve,

    /// Verify Ollama is reachable and the model is installed, then exit
    Check,
}
